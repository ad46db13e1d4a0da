use std::path::PathBuf;
use thiserror::Error;

use super::Phase;
use crate::command::CommandError;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to change working directory to `{path}`: {source}")]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute pre-upgrade command: {0}")]
    PreUpgrade(#[source] CommandError),

    #[error("failed to execute upgrade command: {0}")]
    Upgrade(#[source] CommandError),

    #[error("failed to execute service restart command: {0}")]
    Restart(#[source] CommandError),

    #[error("{cause}; service restart also failed: {restart}")]
    RestartAfterFailure {
        cause: Box<ExecutionError>,
        #[source]
        restart: CommandError,
    },
}

impl ExecutionError {
    /// The phase that failed first, none when the run never reached a phase.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ExecutionError::WorkingDirectory { .. } => None,
            ExecutionError::PreUpgrade(_) => Some(Phase::PreUpgrade),
            ExecutionError::Upgrade(_) => Some(Phase::Upgrade),
            ExecutionError::Restart(_) => Some(Phase::Restart),
            ExecutionError::RestartAfterFailure { cause, .. } => cause.phase(),
        }
    }
}
