//! Input subsystem — stick and button drivers plus the aggregating [`InputHub`].
//!
//! The hub owns every input driver and produces an [`InputSnapshot`] each
//! tick that gets written into `FsmContext.input`.

pub mod button;
pub mod joystick;

use embedded_hal::digital::InputPin;
use log::warn;

use crate::fsm::context::InputSnapshot;
use button::ButtonInput;
use joystick::{AxisReading, JoystickAxes};

/// Aggregates all input drivers and produces a unified snapshot.
pub struct InputHub<P> {
    pub axes: JoystickAxes,
    pub button: ButtonInput<P>,
    last_axes: AxisReading,
    axis_read_failures: u32,
}

impl<P: InputPin> InputHub<P> {
    pub fn new(axes: JoystickAxes, button: ButtonInput<P>) -> Self {
        Self {
            axes,
            button,
            last_axes: AxisReading::CENTRED,
            axis_read_failures: 0,
        }
    }

    /// Sample every input and return a unified snapshot.
    ///
    /// A failed ADC read is logged and the previous good axis values are
    /// kept, so one glitch does not snap the stick back to centre.
    pub fn read_all(&mut self) -> InputSnapshot {
        match self.axes.read() {
            Ok(reading) => self.last_axes = reading,
            Err(e) => {
                self.axis_read_failures = self.axis_read_failures.saturating_add(1);
                warn!("InputHub: axis read failed ({}), holding last value", e);
            }
        }

        InputSnapshot {
            x_raw: self.last_axes.x_raw,
            y_raw: self.last_axes.y_raw,
            button_pressed: self.button.is_pressed(),
        }
    }

    pub fn axis_read_failures(&self) -> u32 {
        self.axis_read_failures
    }
}
