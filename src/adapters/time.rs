//! Monotonic clock adapter.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` (µs since boot).
//! - **host**: `std::time::Instant` for simulation and tests.

pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: reads the high-resolution timer; no shared state.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

/// Fires once every `period_secs` of clock time.
pub struct IntervalTimer {
    period_us: u64,
    last_us: u64,
}

impl IntervalTimer {
    pub fn new(period_secs: u32, now_us: u64) -> Self {
        Self {
            period_us: u64::from(period_secs) * 1_000_000,
            last_us: now_us,
        }
    }

    pub fn set_period(&mut self, period_secs: u32) {
        self.period_us = u64::from(period_secs) * 1_000_000;
    }

    /// `true` if a period has elapsed since the last firing.
    pub fn poll(&mut self, now_us: u64) -> bool {
        if now_us.saturating_sub(self.last_us) >= self.period_us {
            self.last_us = now_us;
            true
        } else {
            false
        }
    }
}
