//! End-to-end run on the simulated board: injected ADC/GPIO levels →
//! `HardwareAdapter` → `AppService`, driven through the event queue the
//! way the firmware loop does it.
//!
//! The simulated peripherals and the event queue are process-wide
//! statics, so this file holds a single test.

use crate::mock_hw::RecordingSink;

use stickpad::adapters::hardware::HardwareAdapter;
use stickpad::app::service::AppService;
use stickpad::command::Command;
use stickpad::config::JoystickConfig;
use stickpad::drivers::hw_init;
use stickpad::events::{self, Event, push_event};
use stickpad::fsm::StateId;

fn loop_iteration(app: &mut AppService, hw: &mut HardwareAdapter, sink: &mut RecordingSink) {
    if hw_init::take_button_edge() {
        push_event(Event::ButtonEdge);
    }
    push_event(Event::ControlTick);
    events::drain_events(|event| match event {
        Event::ButtonEdge => hw.latch_button_press(),
        Event::ControlTick => app.tick(&mut *hw, &mut *sink),
        Event::TelemetryTick | Event::WatchdogTick => {}
    });
}

#[test]
fn simulated_board_drives_gestures() {
    hw_init::init_peripherals().unwrap();
    hw_init::init_isr_service().unwrap();

    let mut hw = HardwareAdapter::from_board();
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(JoystickConfig::default());
    app.start(&mut sink);

    // Centred, released.
    hw_init::sim_set_adc(2048, 2048);
    hw_init::sim_set_button_level(true);
    loop_iteration(&mut app, &mut hw, &mut sink);
    assert_eq!(app.command(), Command::RESET);

    // Stick left.
    hw_init::sim_set_adc(100, 2048);
    loop_iteration(&mut app, &mut hw, &mut sink);
    assert_eq!(app.command(), Command::LEFT);

    // Button pulled low with an ISR edge: one tick only, jump starts.
    hw_init::sim_set_button_level(false);
    hw_init::sim_fire_button_isr();
    loop_iteration(&mut app, &mut hw, &mut sink);
    assert_eq!(app.tick_count(), 3);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::LEFT | Command::UP);
    assert!(events::queue_is_empty());

    hw_init::sim_set_button_level(true);
    hw_init::sim_set_adc(2048, 2048);
    for _ in 0..JoystickConfig::default().jump_timeout_ticks {
        loop_iteration(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RESET);

    // Tap between two ticks: pressed and released before the next sample,
    // so only the ISR saw it.
    loop_iteration(&mut app, &mut hw, &mut sink);
    hw_init::sim_fire_button_isr();
    assert!(hw_init::gpio_read(stickpad::pins::BUTTON_GPIO), "line is back high");
    loop_iteration(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::UP);

    // The latch lasts one sample; the jump runs its course.
    loop_iteration(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Jumping);
    assert!(events::queue_is_empty());
    assert_eq!(hw.axis_read_failures(), 0);
}
