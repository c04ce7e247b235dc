use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::{VoxRequestError, request::InputSelection};

/// Audio container accepted for upload and recognised in responses
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Resolve a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Result<Self, VoxRequestError> {
        ext.parse()
            .map_err(|_| VoxRequestError::UnsupportedAudioFormat(ext.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VoxRequestError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| VoxRequestError::UnsupportedAudioFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Guess the container from the leading bytes.
    ///
    /// Anything that is not a RIFF/WAVE file is treated as mp3, which is what
    /// the synthesizer returns.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            Self::Wav
        } else {
            Self::Mp3
        }
    }

    pub fn extension(self) -> String {
        self.to_string()
    }

    pub fn mime_type(self) -> String {
        mime_guess::from_ext(&self.extension())
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// An uploaded audio file, ready to be submitted for transcription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// File name as shown to the user
    pub name: String,
    pub format: AudioFormat,
    pub bytes: Vec<u8>,
}

impl AudioFile {
    /// Wrap bytes under a file name; the name's extension picks the format.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, VoxRequestError> {
        let name = name.into();
        let format = AudioFormat::from_path(&name)?;
        Ok(Self {
            name,
            format,
            bytes,
        })
    }

    /// Read an mp3 or wav file from disk.
    ///
    /// The extension is checked before the file is touched. No size or
    /// duration limit is applied here; the endpoint enforces its own.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, VoxRequestError> {
        let path = path.as_ref();
        let format = AudioFormat::from_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        tracing::debug!(file = %name, %format, size = bytes.len(), "loaded audio file");

        Ok(Self {
            name,
            format,
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<AudioFile> for InputSelection {
    fn from(file: AudioFile) -> Self {
        InputSelection::Audio(file.bytes)
    }
}

/// Audio decoded from a response's `audio_base64`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub bytes: Vec<u8>,
    pub format: AudioFormat,
}

impl DecodedAudio {
    /// Decode standard base64. Embedded whitespace and line breaks are skipped.
    pub fn decode(encoded: &str) -> Result<Self, VoxRequestError> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = BASE64_STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| VoxRequestError::AudioDecode(e.to_string()))?;

        let format = AudioFormat::sniff(&bytes);
        Ok(Self { bytes, format })
    }

    /// `<stem>.<ext>` for saving the clip.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
