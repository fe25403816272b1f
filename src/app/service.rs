//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the gesture FSM and its shared context.  All I/O
//! flows through port traits injected at call sites, so the whole service
//! is testable with mock adapters.
//!
//! ```text
//!  InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                │       AppService        │
//!                │ classify · FSM · config │ ◀─▶ ConfigPort
//!                └────────────────────────┘
//! ```

use log::{info, warn};

use crate::command::Command;
use crate::config::JoystickConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::translate::classify;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ConfigError, ConfigPort, EventSink, InputPort};

/// How long a config change may stay unsaved before it is written to flash.
const AUTO_SAVE_DELAY_MS: u64 = 5_000;

pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    tick_count: u64,
    /// Control time elapsed, summed tick by tick at the interval in force.
    elapsed_ms: u64,
    /// Axis inversion changed and has not been pushed to the input port yet.
    inversion_pending: bool,
    config_dirty: bool,
    dirty_since_ms: u64,
    save_requested: bool,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: JoystickConfig) -> Self {
        let inversion_pending = config.invert_x || config.invert_y;
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            tick_count: 0,
            elapsed_ms: 0,
            inversion_pending,
            config_dirty: false,
            dirty_since_ms: 0,
            save_requested: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read inputs → classify → FSM → events.
    pub fn tick(&mut self, input: &mut impl InputPort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.elapsed_ms += u64::from(self.ctx.config.control_loop_interval_ms);

        if self.inversion_pending {
            input.set_inversion(self.ctx.config.invert_x, self.ctx.config.invert_y);
            self.inversion_pending = false;
        }

        // 1. Read inputs via InputPort
        let snapshot = input.read_all();
        self.ctx.input = snapshot;

        // 2. Classify the stick position
        self.ctx.direction = classify(snapshot.x_raw, snapshot.y_raw, &self.ctx.config);

        // 3. FSM tick (gesture logic writes ctx.command)
        let prev_state = self.fsm.current_state();
        let prev_command = self.ctx.command;
        let transitioned = self.fsm.tick(&mut self.ctx);

        // 4. Emit what changed
        if self.ctx.command != prev_command {
            sink.emit(&AppEvent::CommandChanged {
                from: prev_command,
                to: self.ctx.command,
            });
        }
        if let Some(to) = transitioned {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to,
            });
        }

        // 5. Remember this tick for edge detection
        self.ctx.latch_history();
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::Reset => {
                let prev_state = self.fsm.current_state();
                let prev_command = self.ctx.command;
                // Edge history is kept so a stick held through the reset
                // does not immediately retrigger a gesture.
                self.fsm.force_transition(StateId::Idle, &mut self.ctx);
                self.ctx.command = Command::RESET;
                self.ctx.jump_pending = false;

                if prev_command != Command::RESET {
                    sink.emit(&AppEvent::CommandChanged {
                        from: prev_command,
                        to: Command::RESET,
                    });
                }
                if prev_state != StateId::Idle {
                    sink.emit(&AppEvent::StateChanged {
                        from: prev_state,
                        to: StateId::Idle,
                    });
                }
                info!("Reset: outputs released");
            }
            AppCommand::UpdateConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    let reason = match e {
                        ConfigError::ValidationFailed(msg) => msg,
                        _ => "invalid config",
                    };
                    warn!("Config update rejected: {}", reason);
                    sink.emit(&AppEvent::ConfigRejected(reason));
                    return;
                }
                if new_config.invert_x != self.ctx.config.invert_x
                    || new_config.invert_y != self.ctx.config.invert_y
                {
                    self.inversion_pending = true;
                }
                self.ctx.tick_period_secs = new_config.tick_secs();
                self.ctx.config = new_config;
                self.mark_config_dirty();
                info!("Configuration updated at runtime");
            }
            AppCommand::SaveConfig => {
                self.mark_config_dirty();
                self.save_requested = true;
                info!("Explicit config save requested (will flush on next auto-save check)");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            command: self.ctx.command,
            x_raw: self.ctx.input.x_raw,
            y_raw: self.ctx.input.y_raw,
            button_pressed: self.ctx.input.button_pressed,
            ticks: self.tick_count,
            uptime_secs: self.elapsed_ms as f32 / 1000.0,
            config_dirty: self.config_dirty,
        }
    }

    /// Current gesture state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Command set currently asserted.
    pub fn command(&self) -> Command {
        self.ctx.command
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn current_config(&self) -> JoystickConfig {
        self.ctx.config.clone()
    }

    /// Borrow the live configuration without cloning.
    pub fn config(&self) -> &JoystickConfig {
        &self.ctx.config
    }

    // ── Config dirty-flag management ──────────────────────────

    /// Mark the config as modified.  The auto-save clock starts on the
    /// first change and is not pushed back by later ones.
    pub fn mark_config_dirty(&mut self) {
        if !self.config_dirty {
            self.config_dirty = true;
            self.dirty_since_ms = self.elapsed_ms;
        }
    }

    /// Save once the config has been dirty for 5 seconds, or right away
    /// after an explicit `SaveConfig`.  Returns `true` if it saved.
    pub fn auto_save_if_needed(&mut self, storage: &impl ConfigPort) -> bool {
        if !self.config_dirty {
            return false;
        }
        if !self.save_requested {
            let dirty_for_ms = self.elapsed_ms.saturating_sub(self.dirty_since_ms);
            if dirty_for_ms < AUTO_SAVE_DELAY_MS {
                return false;
            }
        }
        match storage.save(&self.ctx.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.save_requested = false;
                info!("Config auto-saved to NVS");
                true
            }
            Err(e) => {
                warn!("Config auto-save failed: {}", e);
                false
            }
        }
    }

    /// Save now if dirty (call before restart).
    pub fn force_save_if_dirty(&mut self, storage: &impl ConfigPort) {
        if !self.config_dirty {
            return;
        }
        match storage.save(&self.ctx.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.save_requested = false;
                info!("Config force-saved");
            }
            Err(e) => {
                warn!("Config force-save failed: {}", e);
            }
        }
    }

    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }
}
