use std::path::PathBuf;

use clap::Parser;
use tracing::metadata::LevelFilter;

use crate::supervisor::DEFAULT_SERVICE_MANAGER;

/// Runs the upgrade recipes of supervised services and restarts them.
///
/// Each YAML file describes one service: `serviceName` (the supervised service to restart)
/// and `upgradeCmd` (the command performing the upgrade) are required.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Path to an update configuration file, or to a directory of them with --config-directory
    #[arg(required_unless_present = "print_debug_info")]
    path: Option<PathBuf>,

    /// Treat PATH as a directory: every file directly inside it is one configuration
    #[arg(short = 'd', long)]
    config_directory: bool,

    /// Binary of the service supervisor, invoked as `<BIN> restart <serviceName>`
    #[arg(long, value_name = "BIN", default_value_t = String::from(DEFAULT_SERVICE_MANAGER))]
    service_manager: String,

    /// Least severe level logged (off, error, warn, info, debug, trace), `RUST_LOG` overrides it
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    #[arg(long)]
    print_debug_info: bool,
}

impl Cli {
    /// Parses command line arguments
    pub fn init_updater_cli() -> Self {
        // Get command line args
        Self::parse()
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn is_directory(&self) -> bool {
        self.config_directory
    }

    pub fn service_manager(&self) -> &str {
        &self.service_manager
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn print_debug_info(&self) -> bool {
        self.print_debug_info
    }
}
