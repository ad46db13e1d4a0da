use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::error::ConfigLoaderError;
use super::file_reader::{FileReader, LocalFile};
use super::update_config::UpdateConfig;

/// ConfigLoader discovers configuration files, decodes them and keeps the valid ones.
pub struct ConfigLoader<F = LocalFile>
where
    F: FileReader,
{
    reader: F,
}

impl Default for ConfigLoader<LocalFile> {
    fn default() -> Self {
        Self::new(LocalFile)
    }
}

impl<F> ConfigLoader<F>
where
    F: FileReader,
{
    pub fn new(reader: F) -> Self {
        Self { reader }
    }

    /// Loads every accepted configuration found at `path`.
    ///
    /// When `is_directory` is set each non-directory entry of `path` is one configuration
    /// file, otherwise `path` itself is. Files that cannot be decoded or fail validation are
    /// logged and left out. An error is only returned when `path` cannot be read at all.
    pub fn load(
        &self,
        path: &Path,
        is_directory: bool,
    ) -> Result<Vec<UpdateConfig>, ConfigLoaderError> {
        let config_files = self.discover(path, is_directory)?;
        debug!("found {} config file(s) at {}", config_files.len(), path.display());

        let mut configs = Vec::with_capacity(config_files.len());
        for file in config_files {
            match self.load_file(&file) {
                Ok(config) => {
                    info!(
                        service = config.service_name(),
                        "loaded config file {}",
                        file.display()
                    );
                    configs.push(config);
                }
                Err(err) => {
                    let err = match err {
                        // a single config path that cannot be read means nothing was discovered
                        ConfigLoaderError::Read { path, source } if !is_directory => {
                            ConfigLoaderError::Discovery { path, source }
                        }
                        err => err,
                    };
                    if err.is_fatal() {
                        return Err(err);
                    }
                    error!("skipping config file: {}", err);
                }
            }
        }
        Ok(configs)
    }

    fn discover(&self, path: &Path, is_directory: bool) -> Result<Vec<PathBuf>, ConfigLoaderError> {
        if !is_directory {
            return Ok(vec![path.to_path_buf()]);
        }
        self.reader
            .read_dir(path)
            .map_err(|source| ConfigLoaderError::Discovery {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads, decodes and validates one configuration file.
    pub fn load_file(&self, path: &Path) -> Result<UpdateConfig, ConfigLoaderError> {
        let content = self
            .reader
            .read(path)
            .map_err(|source| ConfigLoaderError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = serde_yaml::from_str::<UpdateConfig>(&content)
            .map_err(|source| ConfigLoaderError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .with_source(path);

        config
            .validate()
            .map_err(|source| ConfigLoaderError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::command::Command;
    use crate::config::file_reader::test::MockFileReaderMock;
    use crate::config::validation::ValidationError;

    const GOOD_CONFIG: &str = r#"
serviceName: test-matrix-component
exitOnError: false
preUpgradeCmds:
  - command: echo
    args: ["first pre-upgrade command"]
  - command: echo
    args: ["second pre-upgrade command"]
upgradeCmd:
  command: echo
  args: ["this is an upgradeCmd"]
postUpgradeCmds:
  - command: echo
    args: ["only post-upgrade command"]
"#;

    const MISSING_SERVICE: &str = r#"
upgradeCmd:
  command: echo
  args: ["this is an upgradeCmd"]
"#;

    const EMPTY_UPGRADE: &str = r#"
serviceName: test-matrix-component
upgradeCmd:
  command: ""
"#;

    const WORKING_DIRECTORY_NO_EXIT: &str = r#"
serviceName: test-matrix-component
workingDirectory: /opt/matrix
exitOnError: false
upgradeCmd:
  command: echo
"#;

    fn expected_good_config(path: &Path) -> UpdateConfig {
        UpdateConfig::new(
            "test-matrix-component",
            Command::new("echo", ["this is an upgradeCmd"]),
        )
        .with_pre_upgrade_commands(vec![
            Command::new("echo", ["first pre-upgrade command"]),
            Command::new("echo", ["second pre-upgrade command"]),
        ])
        .with_post_upgrade_commands(vec![Command::new("echo", ["only post-upgrade command"])])
        .with_source(path)
    }

    #[test]
    fn load_single_good_config() {
        let path = Path::new("/etc/updater/good_config.yaml");
        let mut reader = MockFileReaderMock::new();
        reader.should_read(path, GOOD_CONFIG);

        let configs = ConfigLoader::new(reader).load(path, false).unwrap();

        assert_eq!(vec![expected_good_config(path)], configs);
    }

    #[test]
    fn invalid_single_configs_are_excluded() {
        for content in [MISSING_SERVICE, EMPTY_UPGRADE, WORKING_DIRECTORY_NO_EXIT] {
            let path = Path::new("/etc/updater/bad_config.yaml");
            let mut reader = MockFileReaderMock::new();
            reader.should_read(path, content);

            let configs = ConfigLoader::new(reader).load(path, false).unwrap();
            assert!(configs.is_empty(), "expected {content} to be rejected");
        }
    }

    #[test]
    fn load_file_reports_validation_error() {
        let path = Path::new("/etc/updater/bad_config.yaml");
        let mut reader = MockFileReaderMock::new();
        reader.should_read(path, WORKING_DIRECTORY_NO_EXIT);

        let err = ConfigLoader::new(reader).load_file(path).unwrap_err();

        assert_matches!(err, ConfigLoaderError::Invalid { source, .. } => {
            assert_eq!(
                ValidationError::WorkingDirectoryWithoutExitOnError(PathBuf::from("/opt/matrix")),
                source
            );
        });
    }

    #[test]
    fn load_file_reports_decode_error() {
        let path = Path::new("/etc/updater/not_yaml.yaml");
        let mut reader = MockFileReaderMock::new();
        reader.should_read(path, "upgradeCmd: [\n");

        let err = ConfigLoader::new(reader).load_file(path).unwrap_err();

        assert_matches!(err, ConfigLoaderError::Decode { .. });
        assert!(!err.is_fatal());
    }

    #[test]
    fn unreadable_single_config_is_fatal() {
        let path = Path::new("/etc/updater/good_config.yaml");
        let mut reader = MockFileReaderMock::new();
        reader.should_not_read_io_error(path);

        let err = ConfigLoader::new(reader).load(path, false).unwrap_err();

        assert!(err.is_fatal());
    }

    #[test]
    fn unlistable_directory_is_fatal() {
        let path = Path::new("/etc/updater");
        let mut reader = MockFileReaderMock::new();
        reader.should_not_read_dir(path);

        let err = ConfigLoader::new(reader).load(path, true).unwrap_err();

        assert_matches!(err, ConfigLoaderError::Discovery { .. });
    }

    #[test]
    fn directory_keeps_only_accepted_configs() {
        let dir = Path::new("/etc/updater");
        let good = dir.join("good_config.yaml");
        let missing_service = dir.join("bad_config_missing_service.yaml");
        let empty_upgrade = dir.join("bad_config_empty_upgrade.yaml");
        let unreadable = dir.join("unreadable.yaml");
        let not_yaml = dir.join("notes.txt");

        let mut reader = MockFileReaderMock::new();
        reader.should_read_dir(
            dir,
            vec![
                empty_upgrade.clone(),
                good.clone(),
                missing_service.clone(),
                not_yaml.clone(),
                unreadable.clone(),
            ],
        );
        reader.should_read(&empty_upgrade, EMPTY_UPGRADE);
        reader.should_read(&good, GOOD_CONFIG);
        reader.should_read(&missing_service, MISSING_SERVICE);
        reader.should_read(&not_yaml, "just some notes");
        reader.should_not_read_io_error(&unreadable);

        let configs = ConfigLoader::new(reader).load(dir, true).unwrap();

        assert_eq!(vec![expected_good_config(&good)], configs);
    }
}
