use serde::{Deserialize, Serialize};

use crate::{VoxRequestError, render::Notice};

/// Language of user-facing messages
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn text_pane_title(self) -> &'static str {
        match self {
            Self::Es => "Texto Resultante",
            Self::En => "Resulting Text",
        }
    }

    pub fn audio_pane_title(self) -> &'static str {
        match self {
            Self::Es => "Audio Resultante",
            Self::En => "Resulting Audio",
        }
    }

    pub fn processing(self) -> &'static str {
        match self {
            Self::Es => "Procesando... Esto puede tardar unos segundos para audios largos.",
            Self::En => "Processing... This may take a while for long recordings.",
        }
    }

    pub fn notice(self, notice: Notice) -> &'static str {
        match (self, notice) {
            (Self::Es, Notice::TranscriptionPending) => {
                "La transcripción no generó texto o aún está en proceso."
            }
            (Self::Es, Notice::NoTextToDisplay) => {
                "No hay texto para mostrar (procesaste de texto a audio)."
            }
            (Self::Es, Notice::AudioPending) => "El audio no fue generado o está en proceso.",
            (Self::Es, Notice::NoAudioToDisplay) => {
                "No hay audio para mostrar (procesaste de audio a texto)."
            }
            (Self::En, Notice::TranscriptionPending) => {
                "The transcription produced no text or is still in progress."
            }
            (Self::En, Notice::NoTextToDisplay) => {
                "No text to display (you converted text to audio)."
            }
            (Self::En, Notice::AudioPending) => "The audio was not generated or is still in progress.",
            (Self::En, Notice::NoAudioToDisplay) => {
                "No audio to display (you converted audio to text)."
            }
        }
    }

    /// Inline message for a failed submission.
    pub fn describe_error(self, err: &VoxRequestError) -> String {
        match (self, err) {
            (Self::Es, VoxRequestError::EmptyInput) => {
                "Debes escribir texto o subir un archivo de audio para procesar.".to_string()
            }
            (Self::Es, VoxRequestError::Timeout) => {
                "La solicitud ha excedido el tiempo de espera.".to_string()
            }
            (Self::Es, VoxRequestError::Connection(_)) => {
                "Error de conexión. Revisa la URL de Lambda y tu red.".to_string()
            }
            (Self::Es, VoxRequestError::Transport(detail)) => format!("Error general: {detail}"),
            (Self::Es, VoxRequestError::Server { message, .. }) => {
                format!("Error del servidor: {message}")
            }
            (Self::Es, VoxRequestError::AudioDecode(detail)) => {
                format!("No se pudo reproducir el audio: {detail}")
            }
            (Self::Es, VoxRequestError::UnsupportedAudioFormat(ext)) => {
                format!("Formato de audio no admitido ({ext}); usa MP3 o WAV.")
            }
            (Self::En, VoxRequestError::Connection(_)) => {
                "Connection error. Check the endpoint URL and your network.".to_string()
            }
            (Self::En, VoxRequestError::UnsupportedAudioFormat(ext)) => {
                format!("Unsupported audio format ({ext}); use MP3 or WAV.")
            }
            (_, other) => other.to_string(),
        }
    }

    /// Decode failure detail as shown inside the audio pane.
    pub fn decode_failed(self, detail: &str) -> String {
        match self {
            Self::Es => format!("No se pudo reproducir el audio: {detail}"),
            Self::En => format!("Could not play the audio: {detail}"),
        }
    }
}
