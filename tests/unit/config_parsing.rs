//! TOML configuration parsing.

use axis_motion::config::{
    load_config, parse_config, ActiveLevel, AxisSettings, EngineConfig, LimitPolicy,
};
use axis_motion::error::{ConfigError, Error};
use axis_motion::ProfileKind;

const BENCH_CONFIG: &str = r#"
loop_period_us = 250

[defaults]
min_delay_us = 300
max_delay_us = 4000
pulse_width_us = 5
switch_active_level = "high"
enable_active_level = "high"

[axes.0]
acceleration = 400
deceleration = 200
profile = "eased"

[axes.2]
invert_direction = true
travel_policy = "clamp"
homing_delay_us = 1500
"#;

/// Unset fields fall back to the built-in defaults.
#[test]
fn test_defaults_when_empty() {
    let config: EngineConfig = toml::from_str("").expect("Failed to parse TOML");

    assert_eq!(config.defaults, AxisSettings::default());
    assert_eq!(config.loop_period_us, 1000);
    assert!(config.axes.is_empty());
}

/// Overrides layer on top of `[defaults]` per slot.
#[test]
fn test_overrides_per_slot() {
    let config = parse_config(BENCH_CONFIG, 3).expect("Config should be valid");
    assert_eq!(config.loop_period_us, 250);

    let axis0 = config.settings_for(0);
    assert_eq!(axis0.acceleration, 400);
    assert_eq!(axis0.deceleration, 200);
    assert_eq!(axis0.profile, ProfileKind::Eased);
    assert_eq!(axis0.min_delay_us, 300);
    assert_eq!(axis0.switch_active_level, ActiveLevel::High);

    let axis1 = config.settings_for(1);
    assert_eq!(axis1.acceleration, 0);
    assert_eq!(axis1.profile, ProfileKind::Linear);
    assert_eq!(axis1.pulse_width_us, 5);

    let axis2 = config.settings_for(2);
    assert!(axis2.invert_direction);
    assert_eq!(axis2.travel_policy, LimitPolicy::Clamp);
    assert_eq!(axis2.homing_delay_us, 1500);
    assert_eq!(axis2.enable_active_level, ActiveLevel::High);
}

/// Unknown enum values are parse errors.
#[test]
fn test_unknown_profile_rejected() {
    let result = parse_config("[defaults]\nprofile = \"cubic\"\n", 1);
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Missing files surface as I/O errors.
#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/axes.toml", 1);
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

/// Files on disk go through the same parse and validation.
#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join("axis_motion_load_from_file.toml");
    std::fs::write(&path, BENCH_CONFIG).expect("Failed to write config");

    let config = load_config(&path, 3).expect("Config should load");
    assert_eq!(config.settings_for(0).acceleration, 400);

    assert!(load_config(&path, 2).is_err());
    let _ = std::fs::remove_file(&path);
}
