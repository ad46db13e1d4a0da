use crate::command::Command;

/// Default binary of the host's service supervisor.
pub const DEFAULT_SERVICE_MANAGER: &str = "systemctl";

/// ServiceManager builds the commands sent to the host's service supervisor.
///
/// The restart command is never read from a service's configuration file: it is always
/// `<binary> restart <service>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceManager {
    binary: String,
}

impl Default for ServiceManager {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_MANAGER)
    }
}

impl ServiceManager {
    pub fn new<S: Into<String>>(binary: S) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn restart_command(&self, service_name: &str) -> Command {
        Command::new(self.binary.as_str(), ["restart", service_name])
    }
}
