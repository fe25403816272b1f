//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest input snapshot, the classified direction (this
//! tick and last), the outgoing command, timing, and configuration.

use crate::command::Command;
use crate::config::JoystickConfig;

// ---------------------------------------------------------------------------
// Input snapshot (read-only to state handlers; written by the input hub)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every input on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Raw X axis reading (0 – 4095), after clamping and inversion.
    pub x_raw: u16,
    /// Raw Y axis reading (0 – 4095), after clamping and inversion.
    pub y_raw: u16,
    /// Button held this tick.
    pub button_pressed: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            x_raw: 2048,
            y_raw: 2048,
            button_pressed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Duration of one tick in seconds.
    pub tick_period_secs: f32,

    // -- Inputs --
    pub input: InputSnapshot,
    /// Direction classified from `input` this tick.
    pub direction: Command,
    /// Direction classified on the previous tick (edge detection).
    pub prev_direction: Command,
    /// Button level on the previous tick (edge detection).
    pub prev_button: bool,
    /// A jump edge arrived on the landing tick; honoured on the next Idle tick.
    pub jump_pending: bool,

    // -- Output --
    /// Command asserted after this tick: stick direction merged with any
    /// active gesture.
    pub command: Command,

    // -- Configuration --
    pub config: JoystickConfig,
}

impl FsmContext {
    pub fn new(config: JoystickConfig) -> Self {
        Self {
            ticks_in_state: 0,
            tick_period_secs: config.tick_secs(),
            input: InputSnapshot::default(),
            direction: Command::RESET,
            prev_direction: Command::RESET,
            prev_button: false,
            jump_pending: false,
            command: Command::RESET,
            config,
        }
    }

    /// Button went from released to pressed this tick.
    pub fn button_pressed_edge(&self) -> bool {
        self.input.button_pressed && !self.prev_button
    }

    /// `flag` is set this tick and was not set last tick.
    pub fn direction_edge(&self, flag: Command) -> bool {
        self.direction.contains(flag) && !self.prev_direction.contains(flag)
    }

    /// Start a jump: button press or the stick being pushed up.
    pub fn jump_requested(&self) -> bool {
        self.button_pressed_edge() || self.direction_edge(Command::UP)
    }

    /// Start a duck: the stick being pulled down.
    pub fn duck_requested(&self) -> bool {
        self.direction_edge(Command::DOWN)
    }

    /// Roll the current inputs into the edge-detection history.
    pub fn latch_history(&mut self) {
        self.prev_direction = self.direction;
        self.prev_button = self.input.button_pressed;
    }
}
