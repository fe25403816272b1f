//! Raw stick readings → directional [`Command`].
//!
//! Comparisons are strict: a reading sitting exactly on a threshold is
//! treated as centred.  Because a valid config keeps `left < right` and
//! `up < down`, opposing flags can never be produced together.

use crate::command::Command;
use crate::config::JoystickConfig;

/// Classify one pair of raw ADC readings.
pub fn classify(x_raw: u16, y_raw: u16, cfg: &JoystickConfig) -> Command {
    let mut cmd = Command::RESET;

    if x_raw < cfg.left_threshold {
        cmd |= Command::LEFT;
    } else if x_raw > cfg.right_threshold {
        cmd |= Command::RIGHT;
    }

    if y_raw < cfg.up_threshold {
        cmd |= Command::UP;
    } else if y_raw > cfg.down_threshold {
        cmd |= Command::DOWN;
    }

    cmd
}
