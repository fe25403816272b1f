//! Interrupt-driven event system.
//!
//! Events are produced by the loop's timers (control, telemetry, watchdog
//! ticks) and by the button ISR, whose edge flag the loop forwards as
//! `ButtonEdge`.  They are consumed by the main control loop, one at a
//! time in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button ISR ─┼─flag│              │     │              │
//! │ Loop timer  │────▶│  Event Queue │────▶│  Main Loop   │
//! │             │     │  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The button level is also sampled on every control tick; `ButtonEdge`
//! only adds presses too short to land on a sample.  It must be drained
//! before the `ControlTick` of the same wake.

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum pending events, minus one slot kept free to tell full from empty.
const EVENT_QUEUE_CAP: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Button ISR saw a press since the last wake.
    ButtonEdge = 1,
    /// One control interval elapsed.
    ControlTick = 20,
    /// Telemetry report due.
    TelemetryTick = 30,
    /// Watchdog heartbeat.
    WatchdogTick = 50,
}

impl Event {
    fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::ButtonEdge),
            20 => Some(Self::ControlTick),
            30 => Some(Self::TelemetryTick),
            50 => Some(Self::WatchdogTick),
            _ => None,
        }
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// One producer, one consumer: the main loop is both.  Slots are atomics
// too, so no `static mut` is needed; the Release store of HEAD publishes
// the slot write to the consumer's Acquire load.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
static EVENT_BUFFER: [AtomicU8; EVENT_QUEUE_CAP] = [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP];

/// Push an event.  Lock-free.  Returns `false` if the queue is full and
/// the event was dropped.
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false;
    }

    EVENT_BUFFER[head as usize].store(event as u8, Ordering::Relaxed);
    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event.  Main loop only.
pub fn pop_event() -> Option<Event> {
    loop {
        let tail = EVENT_TAIL.load(Ordering::Relaxed);
        let head = EVENT_HEAD.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        let raw = EVENT_BUFFER[tail as usize].load(Ordering::Relaxed);
        EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

        // Unknown bytes cannot be pushed, but skip rather than stall.
        if let Some(event) = Event::from_u8(raw) {
            return Some(event);
        }
    }
}

/// Drain all pending events into a callback, FIFO.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}
