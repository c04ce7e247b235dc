//! Command-line interface for vox using Clap v4.

use std::{io::Write, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use vox_ox::{
    AudioFile, InputSelection, Locale, Session, SubmissionState, VoxBridge, validate_endpoint,
};

use crate::{output::Presenter, repl};

/// vox - text to speech and speech to text through a serverless endpoint
#[derive(Parser, Debug)]
#[command(name = "vox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the conversion endpoint [env: VOX_ENDPOINT] [default: the conversion Lambda]
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Seconds to wait for the endpoint before giving up [env: VOX_TIMEOUT_SECS] [default: 300]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Directory where synthesized audio is written
    #[arg(short, long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Language of messages (es, en)
    #[arg(long, global = true, env = "VOX_LANG", default_value = "es")]
    pub lang: Locale,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert text to speech
    Text {
        /// Text to synthesize; read from stdin when omitted
        text: Option<String>,
    },

    /// Transcribe an mp3 or wav file
    Audio {
        /// Audio file to upload
        file: PathBuf,
    },

    /// Interactive loop: submit as many times as you like
    Repl,
}

impl Cli {
    /// Client configured from the endpoint and timeout flags. Whatever is
    /// not given on the command line comes from `VoxBridge::load_from_env`.
    pub fn bridge(&self) -> Result<VoxBridge> {
        let (endpoint, timeout) = match (&self.endpoint, self.timeout_secs) {
            (Some(endpoint), Some(secs)) => (endpoint.clone(), Duration::from_secs(secs)),
            (endpoint, secs) => {
                let from_env = VoxBridge::load_from_env()?;
                (
                    endpoint
                        .clone()
                        .unwrap_or_else(|| from_env.endpoint().to_string()),
                    secs.map_or(from_env.timeout(), Duration::from_secs),
                )
            }
        };

        validate_endpoint(&endpoint)?;

        Ok(VoxBridge::builder()
            .endpoint(endpoint)
            .timeout(timeout)
            .build())
    }
}

/// Run the parsed command. The exit code reports whether the last
/// submission rendered.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let bridge = cli.bridge()?;
    tracing::debug!(?bridge, "configured client");

    let mut session = Session::new(bridge);
    let mut presenter = Presenter::new(cli.lang, cli.output_dir);

    match cli.command {
        Commands::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin().await?,
            };

            let mut out = std::io::stdout();
            let ok = submit_and_present(&mut session, &mut presenter, &InputSelection::Text(text), &mut out)
                .await?;
            Ok(exit_code(ok))
        }
        Commands::Audio { file } => {
            let mut out = std::io::stdout();
            let ok = submit_file(&mut session, &mut presenter, &file, &mut out).await?;
            Ok(exit_code(ok))
        }
        Commands::Repl => {
            repl::run(&mut session, &mut presenter).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read text from stdin")?;
    Ok(text)
}

/// Load an audio file, preview it and submit it.
pub async fn submit_file(
    session: &mut Session,
    presenter: &mut Presenter,
    path: &std::path::Path,
    out: &mut impl Write,
) -> Result<bool> {
    let file = match AudioFile::load(path).await {
        Ok(file) => file,
        Err(e) => {
            presenter.failure(&e, out)?;
            return Ok(false);
        }
    };

    presenter.input_preview(&file, out)?;
    submit_and_present(session, presenter, &InputSelection::from(file), out).await
}

/// Submit one selection and print the outcome. Returns `true` when the
/// response rendered.
pub async fn submit_and_present(
    session: &mut Session,
    presenter: &mut Presenter,
    selection: &InputSelection,
    out: &mut impl Write,
) -> Result<bool> {
    presenter.processing(out)?;
    out.flush()?;

    match session.submit(selection).await? {
        SubmissionState::Success(rendered) => {
            presenter.rendered(rendered, out)?;
            Ok(true)
        }
        SubmissionState::Failed(err) => {
            presenter.failure(err, out)?;
            Ok(false)
        }
        SubmissionState::Idle | SubmissionState::Submitting(_) => Ok(false),
    }
}
