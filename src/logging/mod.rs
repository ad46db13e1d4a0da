use std::io::IsTerminal;

use thiserror::Error;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::format::PrettyFields;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("init logging error: `{0}`")]
    TryInitError(String),
}

/// Process-wide log output of an update run.
///
/// Command output is logged line for line, so events are written to stdout next to it,
/// without module targets and with colours only when stdout is a terminal.
pub struct Logging;

impl Logging {
    /// Installs the global subscriber at `level`. Directives in `RUST_LOG` take precedence.
    pub fn try_init(level: LevelFilter) -> Result<(), LoggingError> {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        tracing_subscriber::fmt()
            .with_env_filter(Self::filter(level, directives.as_deref()))
            .fmt_fields(PrettyFields::new())
            .with_target(false)
            .with_ansi(std::io::stdout().is_terminal())
            .try_init()
            .map_err(|err| LoggingError::TryInitError(err.to_string()))
    }

    fn filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(level.into())
            .parse_lossy(directives.unwrap_or_default())
    }
}
