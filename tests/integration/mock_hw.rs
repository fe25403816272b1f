//! Mock adapters for integration tests.
//!
//! `ScriptedInput` replays a fixed sequence of stick/button samples,
//! `RecordingSink` keeps every emitted event, and `MockNvs` is a
//! `ConfigPort` that can be told to fail.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use stickpad::app::events::AppEvent;
use stickpad::app::ports::{ConfigError, ConfigPort, EventSink, InputPort};
use stickpad::command::Command;
use stickpad::config::JoystickConfig;
use stickpad::fsm::context::InputSnapshot;

// ── Stick positions (raw ADC counts) ──────────────────────────

pub const CENTRE: u16 = 2048;
pub const LOW: u16 = 200;
pub const HIGH: u16 = 3900;

pub fn sample(x_raw: u16, y_raw: u16, button_pressed: bool) -> InputSnapshot {
    InputSnapshot {
        x_raw,
        y_raw,
        button_pressed,
    }
}

pub fn centred() -> InputSnapshot {
    sample(CENTRE, CENTRE, false)
}

// ── ScriptedInput ─────────────────────────────────────────────

/// Replays queued samples; once empty, keeps returning the last one.
pub struct ScriptedInput {
    queue: VecDeque<InputSnapshot>,
    last: InputSnapshot,
    pub inversion: Option<(bool, bool)>,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            last: centred(),
            inversion: None,
        }
    }

    pub fn push(&mut self, snap: InputSnapshot) {
        self.queue.push_back(snap);
    }

    pub fn push_n(&mut self, snap: InputSnapshot, n: usize) {
        for _ in 0..n {
            self.queue.push_back(snap);
        }
    }

    /// Hold this sample from now on.
    pub fn hold(&mut self, snap: InputSnapshot) {
        self.queue.clear();
        self.last = snap;
    }
}

impl InputPort for ScriptedInput {
    fn read_all(&mut self) -> InputSnapshot {
        if let Some(s) = self.queue.pop_front() {
            self.last = s;
        }
        self.last
    }

    fn set_inversion(&mut self, invert_x: bool, invert_y: bool) {
        self.inversion = Some((invert_x, invert_y));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CommandChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockNvs ───────────────────────────────────────────────────

/// In-memory `ConfigPort` that validates like the real adapter.
pub struct MockNvs {
    stored: RefCell<Option<JoystickConfig>>,
    pub saves: Cell<u32>,
    pub fail_with: Cell<Option<ConfigError>>,
}

#[allow(dead_code)]
impl MockNvs {
    pub fn new() -> Self {
        Self {
            stored: RefCell::new(None),
            saves: Cell::new(0),
            fail_with: Cell::new(None),
        }
    }

    pub fn stored(&self) -> Option<JoystickConfig> {
        self.stored.borrow().clone()
    }
}

impl ConfigPort for MockNvs {
    fn load(&self) -> Result<JoystickConfig, ConfigError> {
        self.stored.borrow().clone().ok_or(ConfigError::NotFound)
    }

    fn save(&self, config: &JoystickConfig) -> Result<(), ConfigError> {
        if let Some(e) = self.fail_with.get() {
            return Err(e);
        }
        config.validate()?;
        *self.stored.borrow_mut() = Some(config.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
