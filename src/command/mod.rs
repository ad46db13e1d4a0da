mod error;
mod processrunner;

use std::fmt;

use serde::Deserialize;

pub use error::CommandError;
pub use processrunner::ProcessRunner;

/// An executable plus its ordered arguments.
///
/// Both parts are kept apart as decoded from the configuration, so a command is never
/// split or re-quoted by a shell.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Command {
    #[serde(rename = "command", default)]
    executable: String,
    #[serde(default)]
    args: Vec<String>,
}

impl Command {
    pub fn new<S, I, A>(executable: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            executable: executable.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable)?;
        for arg in &self.args {
            write!(f, " {:?}", arg)?;
        }
        Ok(())
    }
}

/// Trait that specifies the interface for running one external command to completion.
pub trait CommandRunner {
    /// Runs the command and blocks until it exits.
    ///
    /// The returned text is the combined stdout and stderr of the process. It is returned
    /// even when the command fails so callers can always log it.
    fn run(&self, command: &Command) -> (String, Result<(), CommandError>);
}
