use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::Command;

/// UpdateConfig is one service's update recipe as decoded from a YAML file.
///
/// `serviceName` and `upgradeCmd` are decoded leniently so that their absence is reported
/// by [`UpdateConfig::validate`] rather than as a decoding failure.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfig {
    #[serde(skip)]
    source: PathBuf,

    #[serde(default)]
    service_name: String,

    #[serde(default)]
    working_directory: Option<PathBuf>,

    #[serde(default)]
    exit_on_error: bool,

    #[serde(default, rename = "preUpgradeCmds")]
    pre_upgrade_commands: Vec<Command>,

    #[serde(default, rename = "upgradeCmd")]
    upgrade_command: Command,

    #[serde(default, rename = "postUpgradeCmds")]
    post_upgrade_commands: Vec<Command>,
}

impl UpdateConfig {
    pub fn new<S: Into<String>>(service_name: S, upgrade_command: Command) -> Self {
        Self {
            service_name: service_name.into(),
            upgrade_command,
            ..Default::default()
        }
    }

    pub fn with_source<P: Into<PathBuf>>(mut self, source: P) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_working_directory<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.exit_on_error = exit_on_error;
        self
    }

    pub fn with_pre_upgrade_commands(mut self, commands: Vec<Command>) -> Self {
        self.pre_upgrade_commands = commands;
        self
    }

    pub fn with_post_upgrade_commands(mut self, commands: Vec<Command>) -> Self {
        self.post_upgrade_commands = commands;
        self
    }

    /// Path of the file this configuration was decoded from. Only used for diagnostics.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The directory to change into before running any command. An empty value counts as unset.
    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    pub fn exit_on_error(&self) -> bool {
        self.exit_on_error
    }

    pub fn pre_upgrade_commands(&self) -> &[Command] {
        &self.pre_upgrade_commands
    }

    pub fn upgrade_command(&self) -> &Command {
        &self.upgrade_command
    }

    pub fn post_upgrade_commands(&self) -> &[Command] {
        &self.post_upgrade_commands
    }
}
