use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use vox_ox_cli::{cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load .env file before anything else (silently ignore if missing)
    dotenvy::dotenv().ok();

    let cli_args = cli::Cli::parse();

    logging::init_logging(cli_args.verbose);

    cli::run(cli_args).await
}
