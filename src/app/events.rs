//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the shipped one logs to serial.

use serde::Serialize;

use crate::command::Command;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The asserted command set changed.
    CommandChanged { from: Command, to: Command },

    /// The gesture FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// An `UpdateConfig` was refused; the live config is unchanged.
    ConfigRejected(&'static str),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryData {
    pub state: StateId,
    pub command: Command,
    pub x_raw: u16,
    pub y_raw: u16,
    pub button_pressed: bool,
    pub ticks: u64,
    pub uptime_secs: f32,
    pub config_dirty: bool,
}
