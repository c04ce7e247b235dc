use serde::{Deserialize, Serialize};

/// JSON body returned by the endpoint on a 200
///
/// Every key is optional; unknown keys are ignored and `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Transcription of uploaded audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Synthesized speech, base64 encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,

    /// Failure reported by the endpoint itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponsePayload {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.audio_base64.is_none() && self.error.is_none()
    }
}
