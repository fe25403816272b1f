//! Inbound commands to the application service.
//!
//! Actions requested from outside the control loop (a provisioning tool,
//! a test harness, the main loop itself) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::JoystickConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Drop any gesture in progress and release every direction.
    Reset,

    /// Hot-reload configuration.  Rejected if it fails validation.
    UpdateConfig(JoystickConfig),

    /// Persist the current config on the next auto-save check.
    SaveConfig,
}
