//! Integration tests for the InputPort → classify → FSM → EventSink pipeline.

use crate::mock_hw::{CENTRE, HIGH, LOW, RecordingSink, ScriptedInput, centred, sample};

use stickpad::app::commands::AppCommand;
use stickpad::app::events::AppEvent;
use stickpad::app::service::AppService;
use stickpad::command::Command;
use stickpad::config::{JUMP_TIMEOUT, JoystickConfig};
use stickpad::fsm::StateId;

fn make_app() -> (AppService, ScriptedInput, RecordingSink) {
    let mut app = AppService::new(JoystickConfig::default());
    let input = ScriptedInput::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, input, sink)
}

fn run(app: &mut AppService, input: &mut ScriptedInput, sink: &mut RecordingSink, ticks: usize) {
    for _ in 0..ticks {
        app.tick(input, sink);
    }
}

#[test]
fn start_emits_started_idle() {
    let (app, _input, sink) = make_app();
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Idle)]);
    assert_eq!(app.command(), Command::RESET);
    assert_eq!(app.tick_count(), 0);
}

#[test]
fn stick_directions_pass_through_in_idle() {
    let (mut app, mut input, mut sink) = make_app();
    sink.clear();

    input.push(sample(LOW, CENTRE, false));
    input.push(sample(HIGH, CENTRE, false));
    input.push(centred());
    run(&mut app, &mut input, &mut sink, 3);

    assert_eq!(
        sink.events,
        vec![
            AppEvent::CommandChanged {
                from: Command::RESET,
                to: Command::LEFT
            },
            AppEvent::CommandChanged {
                from: Command::LEFT,
                to: Command::RIGHT
            },
            AppEvent::CommandChanged {
                from: Command::RIGHT,
                to: Command::RESET
            },
        ]
    );
    assert_eq!(app.state(), StateId::Idle);
}

#[test]
fn readings_on_the_threshold_are_inactive() {
    let (mut app, mut input, mut sink) = make_app();
    let cfg = app.current_config();

    input.push(sample(cfg.left_threshold, cfg.down_threshold, false));
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.command(), Command::RESET);

    input.push(sample(cfg.left_threshold - 1, CENTRE, false));
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.command(), Command::LEFT);
}

#[test]
fn button_jump_holds_up_for_timeout_then_lands() {
    let (mut app, mut input, mut sink) = make_app();
    sink.clear();

    input.push(sample(CENTRE, CENTRE, true));
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::UP);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CommandChanged {
                from: Command::RESET,
                to: Command::UP
            },
            AppEvent::StateChanged {
                from: StateId::Idle,
                to: StateId::Jumping
            },
        ]
    );

    input.hold(centred());
    run(&mut app, &mut input, &mut sink, usize::from(JUMP_TIMEOUT) - 1);
    assert_eq!(app.state(), StateId::Jumping, "still airborne");

    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RESET);
    assert_eq!(sink.commands(), vec![Command::UP, Command::RESET]);
}

#[test]
fn jump_keeps_horizontal_direction() {
    let (mut app, mut input, mut sink) = make_app();

    input.push(sample(LOW, CENTRE, true));
    input.push(sample(LOW, HIGH, false));
    run(&mut app, &mut input, &mut sink, 2);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::LEFT | Command::UP, "DOWN dropped mid-air");
}

#[test]
fn stick_up_also_jumps() {
    let (mut app, mut input, mut sink) = make_app();
    input.hold(sample(HIGH, LOW, false));
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::RIGHT | Command::UP);

    // Holding UP past landing does not jump again.
    run(&mut app, &mut input, &mut sink, usize::from(JUMP_TIMEOUT) * 3);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RIGHT | Command::UP);
}

#[test]
fn duck_has_a_minimum_length() {
    let (mut app, mut input, mut sink) = make_app();
    let duck = usize::from(app.current_config().duck_timeout_ticks);

    // A one-tick flick down still ducks for the full minimum.
    input.push(sample(CENTRE, HIGH, false));
    input.push_n(centred(), duck + 1);
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Ducking);

    run(&mut app, &mut input, &mut sink, duck - 1);
    assert_eq!(app.command(), Command::DOWN);
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RESET);
}

#[test]
fn button_cancels_duck_into_jump() {
    let (mut app, mut input, mut sink) = make_app();
    input.push(sample(CENTRE, HIGH, false));
    input.push(sample(CENTRE, HIGH, true));
    run(&mut app, &mut input, &mut sink, 2);
    assert_eq!(app.state(), StateId::Jumping);
    assert_eq!(app.command(), Command::UP);
    assert!(sink.events.contains(&AppEvent::StateChanged {
        from: StateId::Ducking,
        to: StateId::Jumping
    }));
}

#[test]
fn reset_releases_outputs_mid_jump() {
    let (mut app, mut input, mut sink) = make_app();
    input.hold(sample(HIGH, CENTRE, true));
    run(&mut app, &mut input, &mut sink, 2);
    assert_eq!(app.state(), StateId::Jumping);
    sink.clear();

    app.handle_command(AppCommand::Reset, &mut sink);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RESET);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CommandChanged {
                from: Command::RIGHT | Command::UP,
                to: Command::RESET
            },
            AppEvent::StateChanged {
                from: StateId::Jumping,
                to: StateId::Idle
            },
        ]
    );

    // Button still held from before the reset: no new edge, no new jump.
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(app.command(), Command::RIGHT);
}

#[test]
fn reset_when_idle_and_released_is_silent() {
    let (mut app, _input, mut sink) = make_app();
    sink.clear();
    app.handle_command(AppCommand::Reset, &mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn invalid_config_is_rejected_with_reason() {
    let (mut app, _input, mut sink) = make_app();
    sink.clear();

    let bad = JoystickConfig {
        left_threshold: 3000,
        right_threshold: 2000,
        ..JoystickConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(bad), &mut sink);

    match sink.events.as_slice() {
        [AppEvent::ConfigRejected(reason)] => assert!(reason.contains("left_threshold")),
        other => panic!("expected one ConfigRejected, got {:?}", other),
    }
    assert_eq!(app.current_config(), JoystickConfig::default());
    assert!(!app.is_config_dirty());
}

#[test]
fn config_update_takes_effect_next_tick() {
    let (mut app, mut input, mut sink) = make_app();

    let short_jump = JoystickConfig {
        jump_timeout_ticks: 2,
        ..JoystickConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(short_jump.clone()), &mut sink);
    assert!(app.is_config_dirty());
    assert_eq!(app.current_config(), short_jump);

    input.push(sample(CENTRE, CENTRE, true));
    run(&mut app, &mut input, &mut sink, 2);
    assert_eq!(app.state(), StateId::Jumping);
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(app.state(), StateId::Idle);
}

#[test]
fn inversion_is_pushed_to_the_input_port() {
    let (mut app, mut input, mut sink) = make_app();
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(input.inversion, None, "defaults need no inversion");

    let flipped = JoystickConfig {
        invert_x: true,
        ..JoystickConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(flipped), &mut sink);
    run(&mut app, &mut input, &mut sink, 1);
    assert_eq!(input.inversion, Some((true, false)));
}

#[test]
fn inverted_boot_config_applies_on_first_tick() {
    let cfg = JoystickConfig {
        invert_y: true,
        ..JoystickConfig::default()
    };
    let mut app = AppService::new(cfg);
    let mut input = ScriptedInput::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    app.tick(&mut input, &mut sink);
    assert_eq!(input.inversion, Some((false, true)));
}

#[test]
fn telemetry_reports_live_state() {
    let (mut app, mut input, mut sink) = make_app();
    input.hold(sample(LOW, CENTRE, true));
    run(&mut app, &mut input, &mut sink, 3);

    let t = app.build_telemetry();
    assert_eq!(t.state, StateId::Jumping);
    assert_eq!(t.command, Command::LEFT | Command::UP);
    assert_eq!(t.x_raw, LOW);
    assert!(t.button_pressed);
    assert_eq!(t.ticks, 3);
    assert!(!t.config_dirty);
}
