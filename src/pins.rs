//! GPIO / peripheral pin assignments for the joystick board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Analog stick (ADC2 on the classic ESP32)
// ---------------------------------------------------------------------------

/// Horizontal axis wiper.  ADC2 channel 4.
pub const X_AXIS_GPIO: i32 = 13;
/// Vertical axis wiper.  ADC2 channel 5.
pub const Y_AXIS_GPIO: i32 = 12;

/// Axis pins in (X, Y) order.
pub const XY_GPIOS: [i32; 2] = [X_AXIS_GPIO, Y_AXIS_GPIO];

/// ADC2 channel numbers matching the pins above.
pub const ADC2_CH_X: u32 = 4;
pub const ADC2_CH_Y: u32 = 5;

// ---------------------------------------------------------------------------
// User button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button, read as a raw level every tick.
pub const BUTTON_GPIO: i32 = 25;
