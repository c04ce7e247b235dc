use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use vox_ox::{AudioFile, AudioPane, DecodedAudio, Locale, Rendered, TextPane, VoxRequestError};

/// Prints results to a terminal and saves synthesized audio to disk
#[derive(Debug)]
pub struct Presenter {
    locale: Locale,
    output_dir: PathBuf,
}

impl Presenter {
    pub fn new(locale: Locale, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            locale,
            output_dir: output_dir.into(),
        }
    }

    pub fn processing(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "⏳ {}", self.locale.processing())
    }

    /// One-line summary of the uploaded file before it is sent.
    pub fn input_preview(&self, file: &AudioFile, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "🎤 {} ({}, {} bytes)",
            file.name,
            file.format.mime_type(),
            file.len()
        )
    }

    pub fn failure(&self, err: &VoxRequestError, out: &mut impl Write) -> io::Result<()> {
        let icon = match err {
            VoxRequestError::EmptyInput => "⚠️",
            VoxRequestError::Timeout => "⏳",
            VoxRequestError::Connection(_) => "🔌",
            _ => "❌",
        };
        writeln!(out, "{icon} {}", self.locale.describe_error(err))
    }

    /// Print both panes. Returns where the audio was written, if any.
    pub fn rendered(&self, rendered: &Rendered, out: &mut impl Write) -> io::Result<Option<PathBuf>> {
        writeln!(out, "📝 {}", self.locale.text_pane_title())?;
        match &rendered.text {
            TextPane::Text(text) => writeln!(out, "{text}")?,
            TextPane::Error(message) => writeln!(out, "❌ {message}")?,
            TextPane::Notice(notice) => writeln!(out, "ℹ️ {}", self.locale.notice(*notice))?,
        }

        writeln!(out)?;
        writeln!(out, "🔊 {}", self.locale.audio_pane_title())?;
        let saved = match &rendered.audio {
            AudioPane::Audio(audio) => self.save_audio(audio, out)?,
            AudioPane::Error(message) => {
                writeln!(out, "❌ {message}")?;
                None
            }
            AudioPane::DecodeFailed(detail) => {
                writeln!(out, "❌ {}", self.locale.decode_failed(detail))?;
                None
            }
            AudioPane::Notice(notice) => {
                writeln!(out, "ℹ️ {}", self.locale.notice(*notice))?;
                None
            }
        };

        Ok(saved)
    }

    /// Write to the first free `vox-output[-N].<ext>` in the output
    /// directory. Existing files are never overwritten.
    fn save_audio(&self, audio: &DecodedAudio, out: &mut impl Write) -> io::Result<Option<PathBuf>> {
        match write_audio(&self.output_dir, audio) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), size = audio.len(), "saved audio");
                writeln!(
                    out,
                    "{} ({}, {} bytes)",
                    path.display(),
                    audio.format.mime_type(),
                    audio.len()
                )?;
                Ok(Some(path))
            }
            Err(e) => {
                tracing::warn!(dir = %self.output_dir.display(), error = %e, "could not save audio");
                writeln!(out, "❌ {}: {e}", self.output_dir.display())?;
                Ok(None)
            }
        }
    }
}

fn write_audio(dir: &Path, audio: &DecodedAudio) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut n = 0usize;
    loop {
        n += 1;
        let stem = match n {
            1 => "vox-output".to_string(),
            n => format!("vox-output-{n}"),
        };
        let path = dir.join(audio.file_name(&stem));

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        file.write_all(&audio.bytes)?;
        return Ok(path);
    }
}
