use std::io::IsTerminal;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for the report. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("hostsnap={level}")))
        .map_err(|e| eyre!("invalid log filter: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
    } else {
        let ansi = std::io::stderr().is_terminal();
        tracing::subscriber::set_global_default(builder.with_ansi(ansi).finish())
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}
