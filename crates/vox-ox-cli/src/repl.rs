use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use vox_ox::{InputSelection, Session};

use crate::{cli, output::Presenter};

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Text(String),
    Audio(PathBuf),
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a prompt line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        match word.to_ascii_lowercase().as_str() {
            // The text is kept as typed; blank text is rejected later as empty input.
            "text" | "texto" => Ok(Some(Self::Text(rest.to_string()))),
            "audio" => {
                let path = rest.trim();
                if path.is_empty() {
                    Err("usage: audio <file.mp3|file.wav>".to_string())
                } else {
                    Ok(Some(Self::Audio(PathBuf::from(path))))
                }
            }
            "help" | "ayuda" | "?" => Ok(Some(Self::Help)),
            "quit" | "exit" | "salir" => Ok(Some(Self::Quit)),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

const HELP: &str = "\
commands:
  text <words>     convert text to speech
  audio <file>     transcribe an mp3 or wav file
  help             show this message
  quit             leave";

/// Read commands from stdin until `quit` or end of input. Failed submissions
/// are reported and the loop carries on.
pub async fn run(session: &mut Session, presenter: &mut Presenter) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = io::stdout();

    writeln!(out, "{HELP}")?;

    loop {
        write!(out, "vox> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                writeln!(out, "{usage}")?;
                continue;
            }
        };

        match command {
            ReplCommand::Text(text) => {
                cli::submit_and_present(session, presenter, &InputSelection::Text(text), &mut out)
                    .await?;
            }
            ReplCommand::Audio(path) => {
                cli::submit_file(session, presenter, &path, &mut out).await?;
            }
            ReplCommand::Help => writeln!(out, "{HELP}")?,
            ReplCommand::Quit => break,
        }

        writeln!(out)?;
    }

    Ok(())
}
