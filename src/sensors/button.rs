//! Active-low push-button.
//!
//! Momentary switch to ground with a pull-up, so a LOW level means
//! pressed.  The level is sampled once per control tick and reported as
//! is; gesture timing lives in the FSM, not here.
//!
//! The driver is generic over [`embedded_hal::digital::InputPin`] so tests
//! can hand it a scripted pin.  [`GpioInput`] is the board implementation.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use log::warn;

use crate::drivers::hw_init;

/// Board GPIO read through `hw_init` (ESP-IDF register read or host sim).
pub struct GpioInput {
    gpio: i32,
}

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

pub struct ButtonInput<P> {
    pin: P,
    read_errors: u32,
}

impl<P: InputPin> ButtonInput<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            read_errors: 0,
        }
    }

    /// `true` while the button is held.  A failed read counts as released.
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                self.read_errors = self.read_errors.saturating_add(1);
                warn!("button: pin read failed ({:?})", e);
                false
            }
        }
    }

    /// Failed pin reads since boot.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}
