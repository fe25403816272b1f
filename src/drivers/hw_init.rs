//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC2 oneshot unit for both stick axes and the button
//! GPIO using raw ESP-IDF sys calls.  Called once from `main()` before
//! the event loop starts.
//!
//! On host targets every function is a simulation stub that reads from
//! injectable atomics, so the sensor layer above is testable.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::AtomicU16;

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC2 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_button_input()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC2_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc2_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC2_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_2,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC2_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC2_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::ADC2_CH_X, pins::ADC2_CH_Y] {
        let ret = unsafe { adc_oneshot_config_channel(adc2_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!(
        "hw_init: ADC2 configured (CH{}=X gpio{}, CH{}=Y gpio{})",
        pins::ADC2_CH_X,
        pins::X_AXIS_GPIO,
        pins::ADC2_CH_Y,
        pins::Y_AXIS_GPIO
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc2_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc2_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc2_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.max(0) as u16)
}

/// Simulated axis readings.  Power up centred.
#[cfg(not(target_os = "espidf"))]
static SIM_ADC_X: AtomicU16 = AtomicU16::new(2048);
#[cfg(not(target_os = "espidf"))]
static SIM_ADC_Y: AtomicU16 = AtomicU16::new(2048);

/// Inject raw axis readings for host simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(x_raw: u16, y_raw: u16) {
    SIM_ADC_X.store(x_raw, Ordering::Relaxed);
    SIM_ADC_Y.store(y_raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn adc2_read(channel: u32) -> Result<u16, SensorError> {
    match channel {
        crate::pins::ADC2_CH_X => Ok(SIM_ADC_X.load(Ordering::Relaxed)),
        crate::pins::ADC2_CH_Y => Ok(SIM_ADC_Y.load(Ordering::Relaxed)),
        _ => Err(SensorError::AdcReadFailed),
    }
}

// ── Button GPIO ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_button_input() -> Result<(), HwInitError> {
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: button input configured (gpio{})", pins::BUTTON_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated button line.  Idles high (pull-up, not pressed).
#[cfg(not(target_os = "espidf"))]
static SIM_BUTTON_LEVEL: AtomicBool = AtomicBool::new(true);

/// Drive the simulated button line (`false` = pulled low = pressed).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_button_level(high: bool) {
    SIM_BUTTON_LEVEL.store(high, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    SIM_BUTTON_LEVEL.load(Ordering::Relaxed)
}

// ── GPIO ISR Service ──────────────────────────────────────────

/// Set by the button ISR on a press (falling edge), cleared by the main
/// loop.  Keeps the event queue single-producer: only the loop pushes
/// `Event::ButtonEdge`.  A tap shorter than one control interval is
/// still seen through this flag.
static BUTTON_EDGE_PENDING: AtomicBool = AtomicBool::new(false);

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    BUTTON_EDGE_PENDING.store(true, Ordering::Release);
}

/// Consume a pending button press, if the ISR saw one.
pub fn take_button_edge() -> bool {
    BUTTON_EDGE_PENDING.swap(false, Ordering::AcqRel)
}

/// Pretend the button ISR fired (host simulation).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fire_button_isr() {
    BUTTON_EDGE_PENDING.store(true, Ordering::Release);
}

/// Install per-pin GPIO ISR service and register the button handler.
/// Call after init_peripherals() and before the event loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  The handler only stores an atomic.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Active-low: the falling edge is the press.
        gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(pins::BUTTON_GPIO, Some(button_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::BUTTON_GPIO);

        info!("hw_init: ISR service installed (button)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
