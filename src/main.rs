//! stickpad firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │  HardwareAdapter   LogEventSink   NvsAdapter         │
//! │  (InputPort)       (EventSink)    (ConfigPort)       │
//! │  ──────────── Port Trait Boundary ──────────────     │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │       AppService (classify · gesture FSM)      │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use stickpad::adapters::hardware::HardwareAdapter;
use stickpad::adapters::log_sink::LogEventSink;
use stickpad::adapters::nvs::NvsAdapter;
use stickpad::adapters::time::{IntervalTimer, MonotonicClock};
use stickpad::app::events::AppEvent;
use stickpad::app::ports::EventSink;
use stickpad::app::service::AppService;
use stickpad::drivers::{hw_init, watchdog::Watchdog};
use stickpad::events::{self, Event, push_event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("stickpad v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the ADC there is nothing to translate; let the
        // watchdog/panic handler reset the board.
        error!("HAL init failed: {}", e);
        return Err(stickpad::error::Error::from(e).into());
    }
    if let Err(e) = hw_init::init_isr_service() {
        warn!("ISR service init failed: {}, button sampled on ticks only", e);
    }

    // ── 3. Config from NVS (or defaults) ──────────────────────
    let nvs = NvsAdapter::new().map_err(stickpad::error::Error::from)?;
    let config = nvs.load_or_default();
    info!(
        "Config: thresholds L{} R{} U{} D{}, jump {} ticks, duck {} ticks, tick {}ms",
        config.left_threshold,
        config.right_threshold,
        config.up_threshold,
        config.down_threshold,
        config.jump_timeout_ticks,
        config.duck_timeout_ticks,
        config.control_loop_interval_ms
    );

    // ── 4. Adapters and service ───────────────────────────────
    let mut hw = HardwareAdapter::from_board();
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();
    let mut telemetry_timer = IntervalTimer::new(config.telemetry_interval_secs, clock.uptime_us());
    let watchdog = Watchdog::new(config.control_loop_interval_ms);

    let mut app = AppService::new(config);
    app.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        // Config may change at runtime; always sleep the live interval.
        let interval_ms = app.config().control_loop_interval_ms;
        FreeRtos::delay_ms(interval_ms);
        // Edge first, so the latched press is in place for this tick.
        if hw_init::take_button_edge() {
            push_event(Event::ButtonEdge);
        }
        push_event(Event::ControlTick);

        if telemetry_timer.poll(clock.uptime_us()) {
            push_event(Event::TelemetryTick);
        }
        push_event(Event::WatchdogTick);

        events::drain_events(|event| match event {
            Event::ButtonEdge => hw.latch_button_press(),
            Event::ControlTick => app.tick(&mut hw, &mut log_sink),
            Event::TelemetryTick => {
                log_sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
                telemetry_timer.set_period(app.config().telemetry_interval_secs);
            }
            Event::WatchdogTick => watchdog.feed(),
        });

        // Config auto-save (5 s after the first unsaved change).
        app.auto_save_if_needed(&nvs);
    }
}
