use std::{process::ExitStatus, sync::mpsc::SendError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("process exited with error: `{0}`")]
    ProcessError(ExitStatus),

    #[error("command has an empty executable name")]
    EmptyExecutable,

    #[error("`{0}` not piped")]
    StreamPipeError(String),

    #[error("could not send output line")]
    StreamOutputError(#[source] SendError<String>),

    #[error("io error: `{0}`")]
    IOError(#[source] std::io::Error),
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> CommandError {
        CommandError::IOError(value)
    }
}

impl From<SendError<String>> for CommandError {
    fn from(e: SendError<String>) -> Self {
        CommandError::StreamOutputError(e)
    }
}

impl From<ExitStatus> for CommandError {
    fn from(value: ExitStatus) -> Self {
        CommandError::ProcessError(value)
    }
}
