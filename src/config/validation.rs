use std::path::PathBuf;

use thiserror::Error;

use super::update_config::UpdateConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing service name on config")]
    MissingServiceName,

    #[error("missing upgrade command on config")]
    MissingUpgradeCommand,

    #[error("working directory `{0}` requires exitOnError to be enabled")]
    WorkingDirectoryWithoutExitOnError(PathBuf),
}

impl UpdateConfig {
    /// Checks the invariants a configuration must hold before it can be executed.
    ///
    /// Returns the first violated invariant. The executor relies on these and does not
    /// check them again.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name().is_empty() {
            return Err(ValidationError::MissingServiceName);
        }

        if self.upgrade_command().executable().is_empty() {
            return Err(ValidationError::MissingUpgradeCommand);
        }

        // a directory change cannot be unwound, so failures must stop the run
        if let Some(dir) = self.working_directory() {
            if !self.exit_on_error() {
                return Err(ValidationError::WorkingDirectoryWithoutExitOnError(
                    dir.to_path_buf(),
                ));
            }
        }

        Ok(())
    }
}
