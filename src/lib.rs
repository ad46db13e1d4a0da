pub mod cli;
pub mod command;
pub mod config;
pub mod executor;
pub mod logging;
pub mod supervisor;
pub mod updater;
