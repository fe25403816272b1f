//! Config lifecycle: dirty tracking, delayed auto-save, explicit save.

use crate::mock_hw::{MockNvs, RecordingSink, ScriptedInput};

use stickpad::adapters::nvs::NvsAdapter;
use stickpad::app::commands::AppCommand;
use stickpad::app::ports::{ConfigError, ConfigPort};
use stickpad::app::service::AppService;
use stickpad::config::JoystickConfig;

fn make_app() -> (AppService, ScriptedInput, RecordingSink) {
    let mut app = AppService::new(JoystickConfig::default());
    let input = ScriptedInput::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, input, sink)
}

fn tweaked() -> JoystickConfig {
    JoystickConfig {
        duck_timeout_ticks: 8,
        ..JoystickConfig::default()
    }
}

#[test]
fn auto_save_waits_five_seconds() {
    let (mut app, mut input, mut sink) = make_app();
    let nvs = MockNvs::new();

    app.handle_command(AppCommand::UpdateConfig(tweaked()), &mut sink);

    // 50 ms ticks: 99 ticks is 4.95 s.
    for _ in 0..99 {
        app.tick(&mut input, &mut sink);
        assert!(!app.auto_save_if_needed(&nvs));
    }
    app.tick(&mut input, &mut sink);
    app.tick(&mut input, &mut sink);
    assert!(app.auto_save_if_needed(&nvs));
    assert!(!app.is_config_dirty());
    assert_eq!(nvs.stored(), Some(tweaked()));
    assert_eq!(nvs.saves.get(), 1);

    // Nothing left to save.
    assert!(!app.auto_save_if_needed(&nvs));
}

#[test]
fn explicit_save_flushes_on_next_check() {
    let (mut app, _input, mut sink) = make_app();
    let nvs = MockNvs::new();

    app.handle_command(AppCommand::UpdateConfig(tweaked()), &mut sink);
    app.handle_command(AppCommand::SaveConfig, &mut sink);
    assert!(app.auto_save_if_needed(&nvs));
    assert_eq!(nvs.stored(), Some(tweaked()));
}

#[test]
fn failed_save_stays_dirty_and_retries() {
    let (mut app, _input, mut sink) = make_app();
    let nvs = MockNvs::new();
    nvs.fail_with.set(Some(ConfigError::StorageFull));

    app.handle_command(AppCommand::SaveConfig, &mut sink);
    assert!(!app.auto_save_if_needed(&nvs));
    assert!(app.is_config_dirty());

    nvs.fail_with.set(None);
    assert!(app.auto_save_if_needed(&nvs));
    assert!(!app.is_config_dirty());
}

#[test]
fn force_save_only_when_dirty() {
    let (mut app, _input, mut sink) = make_app();
    let nvs = MockNvs::new();

    app.force_save_if_dirty(&nvs);
    assert_eq!(nvs.saves.get(), 0);

    app.handle_command(AppCommand::UpdateConfig(tweaked()), &mut sink);
    app.force_save_if_dirty(&nvs);
    assert_eq!(nvs.saves.get(), 1);
    assert!(!app.is_config_dirty());
}

#[test]
fn rejected_update_never_reaches_storage() {
    let (mut app, _input, mut sink) = make_app();
    let nvs = MockNvs::new();

    let bad = JoystickConfig {
        control_loop_interval_ms: 1,
        ..JoystickConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(bad), &mut sink);
    app.force_save_if_dirty(&nvs);
    assert_eq!(nvs.saves.get(), 0);
    assert_eq!(nvs.load(), Err(ConfigError::NotFound));
}

#[test]
fn nvs_adapter_boot_cycle() {
    // First boot: nothing stored, defaults used.
    let nvs = NvsAdapter::new().unwrap();
    let mut app = AppService::new(nvs.load_or_default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    assert_eq!(app.current_config(), JoystickConfig::default());

    app.handle_command(AppCommand::UpdateConfig(tweaked()), &mut sink);
    app.force_save_if_dirty(&nvs);

    // "Reboot" against the same storage.
    let app = AppService::new(nvs.load_or_default());
    assert_eq!(app.current_config(), tweaked());
}
