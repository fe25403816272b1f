//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the main loop stops feeding it.  The timeout is
//! derived from the control interval so a stalled loop is caught within a
//! bounded number of missed ticks.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Missed ticks tolerated before the TWDT fires.
const MISSED_TICKS_BEFORE_RESET: u32 = 40;
/// Floor for very fast loops; ESP-IDF rejects sub-second TWDT windows.
const MIN_TIMEOUT_MS: u32 = 1_000;

/// Watchdog window for a given control interval.
pub fn timeout_for_interval(control_loop_interval_ms: u32) -> u32 {
    control_loop_interval_ms
        .saturating_mul(MISSED_TICKS_BEFORE_RESET)
        .max(MIN_TIMEOUT_MS)
}

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    #[cfg(not(target_os = "espidf"))]
    feeds: core::cell::Cell<u64>,
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new(control_loop_interval_ms: u32) -> Self {
        let timeout_ms = timeout_for_interval(control_loop_interval_ms);

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: reconfigure/add are called once from the main task
            // before the loop starts.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    log::info!("Watchdog: subscribed ({}ms timeout)", timeout_ms);
                } else {
                    log::warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self { timeout_ms, subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): {}ms window, no-op", timeout_ms);
            Self {
                timeout_ms,
                feeds: core::cell::Cell::new(0),
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feed the watchdog.  Call once per loop iteration.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the current task's TWDT entry; no shared state.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.feeds.set(self.feeds.get() + 1);
    }

    /// Number of feeds since construction (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn feed_count(&self) -> u64 {
        self.feeds.get()
    }
}
