//! System configuration parameters
//!
//! Board constants plus every tunable the joystick translator reads at
//! runtime.  Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Board constants
// ---------------------------------------------------------------------------

/// Largest raw reading of the 12-bit ADC.  Stick centre sits near 2048.
pub const ADC_MAX: u16 = 4095;

/// X readings below this are a LEFT command.
pub const LEFT_THRESHOLD: u16 = 1300;
/// X readings above this are a RIGHT command.
pub const RIGHT_THRESHOLD: u16 = 2700;
/// Y readings below this are an UP command.
pub const UP_THRESHOLD: u16 = 1300;
/// Y readings above this are a DOWN command.
pub const DOWN_THRESHOLD: u16 = 2700;

/// Jump gesture length, in control ticks.
pub const JUMP_TIMEOUT: u16 = 12;
/// Minimum duck gesture length, in control ticks.
pub const DUCK_TIMEOUT: u16 = 4;

const MAX_GESTURE_TICKS: u16 = 1000;

/// Joystick translator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoystickConfig {
    // --- Thresholds (raw ADC counts) ---
    pub left_threshold: u16,
    pub right_threshold: u16,
    pub up_threshold: u16,
    pub down_threshold: u16,

    // --- Axis orientation ---
    /// Mirror X about the ADC range (stick mounted rotated 180°).
    pub invert_x: bool,
    /// Mirror Y about the ADC range.
    pub invert_y: bool,

    // --- Gestures ---
    /// Ticks a jump holds UP once triggered.
    pub jump_timeout_ticks: u16,
    /// Minimum ticks a duck holds DOWN once triggered.
    pub duck_timeout_ticks: u16,

    // --- Timing ---
    /// Control loop interval (milliseconds).  One tick.
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            left_threshold: LEFT_THRESHOLD,
            right_threshold: RIGHT_THRESHOLD,
            up_threshold: UP_THRESHOLD,
            down_threshold: DOWN_THRESHOLD,

            invert_x: false,
            invert_y: false,

            jump_timeout_ticks: JUMP_TIMEOUT,
            duck_timeout_ticks: DUCK_TIMEOUT,

            control_loop_interval_ms: 50, // 20 Hz
            telemetry_interval_secs: 10,
        }
    }
}

impl JoystickConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            self.left_threshold,
            self.right_threshold,
            self.up_threshold,
            self.down_threshold,
        ];
        if thresholds.iter().any(|&t| t > ADC_MAX) {
            return Err(ConfigError::ValidationFailed(
                "thresholds must be within 0–4095",
            ));
        }
        if self.left_threshold >= self.right_threshold {
            return Err(ConfigError::ValidationFailed(
                "left_threshold must be < right_threshold",
            ));
        }
        if self.up_threshold >= self.down_threshold {
            return Err(ConfigError::ValidationFailed(
                "up_threshold must be < down_threshold",
            ));
        }
        if !(1..=MAX_GESTURE_TICKS).contains(&self.jump_timeout_ticks) {
            return Err(ConfigError::ValidationFailed(
                "jump_timeout_ticks must be 1–1000",
            ));
        }
        if !(1..=MAX_GESTURE_TICKS).contains(&self.duck_timeout_ticks) {
            return Err(ConfigError::ValidationFailed(
                "duck_timeout_ticks must be 1–1000",
            ));
        }
        if !(5..=1000).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 5–1000",
            ));
        }
        if !(1..=3600).contains(&self.telemetry_interval_secs) {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be 1–3600",
            ));
        }
        Ok(())
    }

    /// Seconds per control tick.
    pub fn tick_secs(&self) -> f32 {
        self.control_loop_interval_ms as f32 / 1000.0
    }
}
