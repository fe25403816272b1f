//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).  Telemetry goes out
//! as one JSON object per line so it can be scraped off the serial port.

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Render telemetry as a single JSON line.
pub fn telemetry_json(t: &TelemetryData) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::Telemetry(t) => match telemetry_json(t) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | serialise failed: {}", e),
            },
            AppEvent::CommandChanged { from, to } => {
                info!("CMD | {} -> {} (0x{:02x})", from, to, to.bits());
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::ConfigRejected(reason) => {
                warn!("CONFIG | rejected: {}", reason);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
