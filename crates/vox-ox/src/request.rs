use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::VoxRequestError;

/// What the user chose to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    /// Text to synthesize into speech
    Text(String),
    /// Raw audio bytes to transcribe
    Audio(Vec<u8>),
}

/// Which side of the conversion a submission started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    Text,
    Audio,
}

impl InputSelection {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn audio(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Audio(bytes.into())
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Self::Text(_) => InputKind::Text,
            Self::Audio(_) => InputKind::Audio,
        }
    }
}

/// JSON body sent to the endpoint
///
/// Serializes as `{"text": ...}` or `{"audio_base64": ...}`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPayload {
    Text(String),
    #[serde(rename = "audio_base64")]
    AudioBase64(String),
}

impl RequestPayload {
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Text(_) => InputKind::Text,
            Self::AudioBase64(_) => InputKind::Audio,
        }
    }
}

impl TryFrom<&InputSelection> for RequestPayload {
    type Error = VoxRequestError;

    fn try_from(selection: &InputSelection) -> Result<Self, Self::Error> {
        build_payload(selection)
    }
}

/// Shape a selection into the wire payload.
///
/// Text goes through verbatim; whitespace-only text and empty audio are
/// rejected so no request is sent.
pub fn build_payload(selection: &InputSelection) -> Result<RequestPayload, VoxRequestError> {
    match selection {
        InputSelection::Text(text) if text.trim().is_empty() => Err(VoxRequestError::EmptyInput),
        InputSelection::Text(text) => Ok(RequestPayload::Text(text.clone())),
        InputSelection::Audio(bytes) if bytes.is_empty() => Err(VoxRequestError::EmptyInput),
        InputSelection::Audio(bytes) => Ok(RequestPayload::AudioBase64(BASE64_STANDARD.encode(bytes))),
    }
}
