use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when it parses; otherwise `--verbose` picks debug for the
/// vox crates and warn for everything else. Output goes to stderr so piped
/// stdout stays clean.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "warn,vox_ox=debug,vox_ox_cli=debug"
    } else {
        "warn"
    };

    let filter = match std::env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => EnvFilter::try_new(&spec).unwrap_or_else(|err| {
            eprintln!("Ignoring invalid RUST_LOG value '{spec}': {err}");
            EnvFilter::new(fallback)
        }),
        _ => EnvFilter::new(fallback),
    };

    // A second init (tests) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
