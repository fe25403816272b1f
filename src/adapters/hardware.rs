//! Hardware adapter — bridges the real stick and button to [`InputPort`].
//!
//! Owns the [`InputHub`] and is the only thing the main loop hands to the
//! service for input.  On non-espidf targets the underlying drivers read
//! the injectable simulation state in `hw_init`.

use embedded_hal::digital::InputPin;

use crate::app::ports::InputPort;
use crate::fsm::context::InputSnapshot;
use crate::pins;
use crate::sensors::InputHub;
use crate::sensors::button::{ButtonInput, GpioInput};
use crate::sensors::joystick::JoystickAxes;

pub struct HardwareAdapter<P = GpioInput> {
    hub: InputHub<P>,
    /// A press the ISR caught since the last sample.
    press_latched: bool,
}

impl HardwareAdapter<GpioInput> {
    /// Adapter wired to the board pin table.
    pub fn from_board() -> Self {
        let axes = JoystickAxes::new(pins::ADC2_CH_X, pins::ADC2_CH_Y);
        let button = ButtonInput::new(GpioInput::new(pins::BUTTON_GPIO));
        Self::new(InputHub::new(axes, button))
    }
}

impl<P: InputPin> HardwareAdapter<P> {
    pub fn new(hub: InputHub<P>) -> Self {
        Self {
            hub,
            press_latched: false,
        }
    }

    /// Record a press seen by the button ISR.  The next snapshot reports
    /// the button as pressed even if it was released again in between.
    pub fn latch_button_press(&mut self) {
        self.press_latched = true;
    }

    /// Axis reads that failed since boot.
    pub fn axis_read_failures(&self) -> u32 {
        self.hub.axis_read_failures()
    }

    /// Button reads that failed since boot.
    pub fn button_read_errors(&self) -> u32 {
        self.hub.button.read_errors()
    }
}

impl<P: InputPin> InputPort for HardwareAdapter<P> {
    fn read_all(&mut self) -> InputSnapshot {
        let mut snap = self.hub.read_all();
        snap.button_pressed |= core::mem::take(&mut self.press_latched);
        snap
    }

    fn set_inversion(&mut self, invert_x: bool, invert_y: bool) {
        log::info!("HardwareAdapter: inversion x={} y={}", invert_x, invert_y);
        self.hub.axes.set_inversion(invert_x, invert_y);
    }
}
