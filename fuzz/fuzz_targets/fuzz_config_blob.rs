//! Fuzz target: stored config blob
//!
//! Feeds arbitrary bytes to `NvsAdapter::load` as if they were the NVS
//! blob and checks:
//! - No panics on any input
//! - Anything that loads also passes validation
//! - A loaded config re-saves and reloads unchanged
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use stickpad::adapters::nvs::NvsAdapter;
use stickpad::app::ports::ConfigPort;

fuzz_target!(|data: &[u8]| {
    let Ok(nvs) = NvsAdapter::new() else {
        return;
    };
    nvs.sim_write_raw(data);

    if let Ok(cfg) = nvs.load() {
        assert!(cfg.validate().is_ok(), "loaded config must be valid");
        nvs.save(&cfg).expect("valid config must save");
        assert_eq!(nvs.load().ok(), Some(cfg));
    }

    // Fallback path must never panic either.
    let _ = nvs.load_or_default();
});
