//! Two-axis analog joystick (potentiometer wipers on ADC2).
//!
//! Produces raw 12-bit counts per axis, clamped to [`ADC_MAX`] and
//! optionally mirrored when the stick is mounted the other way round.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot reads of ADC2 CH4 (X) and CH5 (Y).
//! On host/test: reads the injectable atomics in `hw_init`.

use crate::config::ADC_MAX;
use crate::drivers::hw_init;
use crate::error::SensorError;

/// One sample of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisReading {
    pub x_raw: u16,
    pub y_raw: u16,
}

impl AxisReading {
    pub const CENTRED: Self = Self {
        x_raw: ADC_MAX / 2 + 1,
        y_raw: ADC_MAX / 2 + 1,
    };
}

pub struct JoystickAxes {
    x_channel: u32,
    y_channel: u32,
    invert_x: bool,
    invert_y: bool,
}

impl JoystickAxes {
    pub fn new(x_channel: u32, y_channel: u32) -> Self {
        Self {
            x_channel,
            y_channel,
            invert_x: false,
            invert_y: false,
        }
    }

    pub fn set_inversion(&mut self, invert_x: bool, invert_y: bool) {
        self.invert_x = invert_x;
        self.invert_y = invert_y;
    }

    pub fn read(&mut self) -> Result<AxisReading, SensorError> {
        let x = hw_init::adc2_read(self.x_channel)?;
        let y = hw_init::adc2_read(self.y_channel)?;
        Ok(AxisReading {
            x_raw: condition(x, self.invert_x),
            y_raw: condition(y, self.invert_y),
        })
    }
}

/// Clamp to the 12-bit range, then mirror if requested.
pub fn condition(raw: u16, invert: bool) -> u16 {
    let clamped = raw.min(ADC_MAX);
    if invert { ADC_MAX - clamped } else { clamped }
}
