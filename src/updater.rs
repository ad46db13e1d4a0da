use std::path::Path;

use tracing::{error, info};

use crate::command::CommandRunner;
use crate::config::file_reader::FileReader;
use crate::config::{ConfigLoader, ConfigLoaderError};
use crate::executor::{DirectoryChanger, UpdateExecutor};

/// Outcome of a batch run, by service name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl UpdateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Updater drives a batch: every accepted configuration is executed in turn, one at a time.
pub struct Updater<F, R, D>
where
    F: FileReader,
    R: CommandRunner,
    D: DirectoryChanger,
{
    loader: ConfigLoader<F>,
    executor: UpdateExecutor<R, D>,
}

impl<F, R, D> Updater<F, R, D>
where
    F: FileReader,
    R: CommandRunner,
    D: DirectoryChanger,
{
    pub fn new(loader: ConfigLoader<F>, executor: UpdateExecutor<R, D>) -> Self {
        Self { loader, executor }
    }

    /// Loads the configurations at `path` and executes each of them.
    ///
    /// Individual service failures end up in the report. Only a discovery failure is
    /// returned as an error.
    pub fn run(&self, path: &Path, is_directory: bool) -> Result<UpdateReport, ConfigLoaderError> {
        let configs = self.loader.load(path, is_directory)?;
        info!("{} service(s) to update", configs.len());

        let mut report = UpdateReport::default();
        for config in configs {
            let service = config.service_name().to_string();
            match self.executor.execute(&config) {
                Ok(()) => report.succeeded.push(service),
                Err(err) => {
                    error!(
                        service,
                        phase = err.phase().map(|p| p.to_string()),
                        source = %config.source().display(),
                        "Failed to update service: {}",
                        err
                    );
                    report.failed.push((service, err.to_string()));
                }
            }
        }
        Ok(report)
    }
}
