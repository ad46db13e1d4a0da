//! Runs one service's update recipe.
//!
//! Phases run strictly in order: an optional change of working directory, the pre-upgrade
//! commands, the upgrade command, the post-upgrade commands and finally the restart of the
//! managed service. The restart is attempted whatever happened before it, except when the
//! working directory could not be changed.
mod directory;
mod error;

use std::fmt;

use tracing::{error, info, warn};

use crate::command::{Command, CommandError, CommandRunner, ProcessRunner};
use crate::config::UpdateConfig;
use crate::supervisor::ServiceManager;

pub use directory::{DirectoryChanger, ProcessDirectory};
pub use error::ExecutionError;

/// A named stage of an update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreUpgrade,
    Upgrade,
    PostUpgrade,
    Restart,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PreUpgrade => "pre-upgrade",
            Phase::Upgrade => "upgrade",
            Phase::PostUpgrade => "post-upgrade",
            Phase::Restart => "restart",
        };
        f.write_str(name)
    }
}

pub struct UpdateExecutor<R = ProcessRunner, D = ProcessDirectory>
where
    R: CommandRunner,
    D: DirectoryChanger,
{
    runner: R,
    directory: D,
    service_manager: ServiceManager,
}

impl Default for UpdateExecutor {
    fn default() -> Self {
        Self::new(ProcessRunner, ProcessDirectory, ServiceManager::default())
    }
}

impl<R, D> UpdateExecutor<R, D>
where
    R: CommandRunner,
    D: DirectoryChanger,
{
    pub fn new(runner: R, directory: D, service_manager: ServiceManager) -> Self {
        Self {
            runner,
            directory,
            service_manager,
        }
    }

    /// Executes every phase of an already validated configuration, blocking until done.
    ///
    /// Post-upgrade failures are only logged. Any other failure is returned once the
    /// restart has been attempted.
    pub fn execute(&self, config: &UpdateConfig) -> Result<(), ExecutionError> {
        let service = config.service_name();
        info!(service, "Executing update for service");

        if let Some(dir) = config.working_directory() {
            if let Err(source) = self.directory.change_dir(dir) {
                let err = ExecutionError::WorkingDirectory {
                    path: dir.to_path_buf(),
                    source,
                };
                error!(service, "{}, no phase will run", err);
                return Err(err);
            }
            info!(service, "changed working directory to {}", dir.display());
        }

        let upgrade_result = self.upgrade(config);
        if upgrade_result.is_err() {
            warn!(service, "Skipping remaining phases. Restarting service...");
        }

        match (upgrade_result, self.restart(service)) {
            (Ok(()), Ok(())) => {
                info!(service, "Upgrade of service {} complete", service);
                Ok(())
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(()), Err(restart)) => Err(ExecutionError::Restart(restart)),
            (Err(err), Err(restart)) => Err(ExecutionError::RestartAfterFailure {
                cause: Box::new(err),
                restart,
            }),
        }
    }

    /// Runs the pre-upgrade, upgrade and post-upgrade phases.
    fn upgrade(&self, config: &UpdateConfig) -> Result<(), ExecutionError> {
        let service = config.service_name();

        for command in config.pre_upgrade_commands() {
            let Err(err) = self.run_command(service, Phase::PreUpgrade, command) else {
                continue;
            };
            if config.exit_on_error() {
                error!(service, phase = %Phase::PreUpgrade, %command, "{}", err);
                return Err(ExecutionError::PreUpgrade(err));
            }
            warn!(service, phase = %Phase::PreUpgrade, %command, "{}", err);
        }
        info!(service, "Pre-upgrade commands complete. Executing upgrade...");

        let command = config.upgrade_command();
        if let Err(err) = self.run_command(service, Phase::Upgrade, command) {
            error!(service, phase = %Phase::Upgrade, %command, "{}", err);
            return Err(ExecutionError::Upgrade(err));
        }
        info!(service, "Upgrade command complete. Performing post-upgrade commands...");

        for command in config.post_upgrade_commands() {
            if let Err(err) = self.run_command(service, Phase::PostUpgrade, command) {
                warn!(service, phase = %Phase::PostUpgrade, %command, "{}", err);
            }
        }
        info!(service, "Post-upgrade commands complete. Restarting service...");

        Ok(())
    }

    fn restart(&self, service: &str) -> Result<(), CommandError> {
        let command = self.service_manager.restart_command(service);
        self.run_command(service, Phase::Restart, &command)
            .map_err(|err| {
                error!(service, phase = %Phase::Restart, %command, "{}", err);
                err
            })
    }

    /// Runs a single command, logging its captured output whatever the outcome.
    fn run_command(
        &self,
        service: &str,
        phase: Phase,
        command: &Command,
    ) -> Result<(), CommandError> {
        info!(service, %phase, %command, "running command");
        let (output, result) = self.runner.run(command);
        if !output.is_empty() {
            info!(service, %phase, %command, "{}", output);
        }
        result
    }
}
