//! Logging initialization.
//!
//! Logs go to stderr; stdout is kept for the build summary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the level follows the
/// `--verbose` / `--quiet` flags, defaulting to INFO so each stage and
/// converted file is reported.
pub fn initialize_logging(verbose: bool, quiet: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
