//! Fuzz target: AppService gesture pipeline
//!
//! Each 5-byte chunk is one tick: x (u16 LE), y (u16 LE), button (bit 0).
//! Checks that arbitrary stick/button sequences never panic and never
//! produce contradictory commands.
//!
//! cargo fuzz run fuzz_gesture_pipeline

#![no_main]

use libfuzzer_sys::fuzz_target;
use stickpad::app::events::AppEvent;
use stickpad::app::ports::{EventSink, InputPort};
use stickpad::app::service::AppService;
use stickpad::command::Command;
use stickpad::config::JoystickConfig;
use stickpad::fsm::context::InputSnapshot;

struct Bytes<'a>(core::slice::ChunksExact<'a, u8>);

impl InputPort for Bytes<'_> {
    fn read_all(&mut self) -> InputSnapshot {
        match self.0.next() {
            Some(c) => InputSnapshot {
                x_raw: u16::from_le_bytes([c[0], c[1]]) & 0x0FFF,
                y_raw: u16::from_le_bytes([c[2], c[3]]) & 0x0FFF,
                button_pressed: c[4] & 1 == 1,
            },
            None => InputSnapshot::default(),
        }
    }
}

struct Null;

impl EventSink for Null {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let ticks = data.len() / 5;
    let mut input = Bytes(data.chunks_exact(5));
    let mut app = AppService::new(JoystickConfig::default());
    app.start(&mut Null);

    for _ in 0..ticks {
        app.tick(&mut input, &mut Null);
        let cmd = app.command();
        assert!(!cmd.contains(Command::LEFT | Command::RIGHT));
        assert!(!cmd.contains(Command::UP | Command::DOWN));
    }
});
