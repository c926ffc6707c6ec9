use tracing_subscriber::EnvFilter;

use crate::{LoggingConfig, StartupError};

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence
/// over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), StartupError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| StartupError::Logging(format!("bad level {:?}: {}", config.level, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        other => {
            return Err(StartupError::Logging(format!(
                "unknown log format {other:?}, expected json or pretty"
            )));
        }
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}
