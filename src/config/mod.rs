pub mod error;
pub mod file_reader;
pub mod loader;
pub mod update_config;
pub mod validation;

pub use error::ConfigLoaderError;
pub use loader::ConfigLoader;
pub use update_config::UpdateConfig;
pub use validation::ValidationError;
