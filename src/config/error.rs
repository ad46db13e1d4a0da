use std::path::PathBuf;
use thiserror::Error;

use super::file_reader::FileReaderError;
use super::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ConfigLoaderError {
    #[error("cannot discover config files at `{path}`: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: FileReaderError,
    },

    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: FileReaderError,
    },

    #[error("failed to decode config file `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file `{path}` is invalid: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigLoaderError {
    /// Only discovery errors stop the whole batch, everything else skips a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigLoaderError::Discovery { .. })
    }
}
