#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Both loaders may reject input, but neither parsing nor validation may panic.
    if let Ok(cfg) = wot_config::load_toml(data) {
        let _ = cfg.validate();
    }
    if let Ok(cfg) = wot_config::load_properties(data) {
        let _ = cfg.validate();
    }
    let _ = wot_config::parse_fuel_map(data, 4);
});
