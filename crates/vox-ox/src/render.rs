//! Maps a response onto the two result panes.
//!
//! Pure data: nothing here performs IO. Front ends decide how a pane is shown.

use crate::{
    audio::DecodedAudio,
    error::VoxRequestError,
    request::InputKind,
    response::ResponsePayload,
};

/// Informational message for a pane with nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Notice {
    /// Audio was submitted but no transcription came back
    TranscriptionPending,
    /// Text was submitted, so no text result is expected
    NoTextToDisplay,
    /// Text was submitted but no audio came back
    AudioPending,
    /// Audio was submitted, so no audio result is expected
    NoAudioToDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPane {
    Text(String),
    Error(String),
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPane {
    Audio(DecodedAudio),
    Error(String),
    /// `audio_base64` was present but not decodable. Holds the decoder's
    /// own message, without any prefix.
    DecodeFailed(String),
    Notice(Notice),
}

/// Both panes for one settled submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub kind: InputKind,
    pub text: TextPane,
    pub audio: AudioPane,
}

impl Rendered {
    /// True when either pane carries an error reported by the endpoint or a
    /// decode failure.
    pub fn has_error(&self) -> bool {
        matches!(self.text, TextPane::Error(_))
            || matches!(self.audio, AudioPane::Error(_) | AudioPane::DecodeFailed(_))
    }
}

/// Render a 200 response for a submission that started from `kind`.
///
/// An `error` key takes precedence over any `text` or `audio_base64` in the
/// same body: it is shown in the pane the flow was meant to fill and the
/// other pane gets its "nothing to display" notice.
pub fn render(response: &ResponsePayload, kind: InputKind) -> Rendered {
    if let Some(error) = &response.error {
        return match kind {
            InputKind::Text => Rendered {
                kind,
                text: TextPane::Notice(Notice::NoTextToDisplay),
                audio: AudioPane::Error(error.clone()),
            },
            InputKind::Audio => Rendered {
                kind,
                text: TextPane::Error(error.clone()),
                audio: AudioPane::Notice(Notice::NoAudioToDisplay),
            },
        };
    }

    Rendered {
        kind,
        text: render_text_pane(response, kind),
        audio: render_audio_pane(response, kind),
    }
}

fn render_text_pane(response: &ResponsePayload, kind: InputKind) -> TextPane {
    match (&response.text, kind) {
        (Some(text), _) => TextPane::Text(text.clone()),
        (None, InputKind::Audio) => TextPane::Notice(Notice::TranscriptionPending),
        (None, InputKind::Text) => TextPane::Notice(Notice::NoTextToDisplay),
    }
}

fn render_audio_pane(response: &ResponsePayload, kind: InputKind) -> AudioPane {
    match (&response.audio_base64, kind) {
        (Some(encoded), _) => match DecodedAudio::decode(encoded) {
            Ok(audio) => AudioPane::Audio(audio),
            Err(e) => {
                tracing::warn!(error = %e, "audio in response could not be decoded");
                let detail = match e {
                    VoxRequestError::AudioDecode(detail) => detail,
                    other => other.to_string(),
                };
                AudioPane::DecodeFailed(detail)
            }
        },
        (None, InputKind::Text) => AudioPane::Notice(Notice::AudioPending),
        (None, InputKind::Audio) => AudioPane::Notice(Notice::NoAudioToDisplay),
    }
}
