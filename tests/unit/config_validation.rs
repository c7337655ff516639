//! Configuration validation.

use axis_motion::config::{parse_config, validate_config, EngineConfig};
use axis_motion::error::{ConfigError, Error};
use axis_motion::MotionEngine;
use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::common::{Engine, SimClock};

/// The built-in configuration is valid for any capacity.
#[test]
fn test_default_config_valid() {
    assert!(validate_config(&EngineConfig::default(), 1).is_ok());
    assert!(validate_config(&EngineConfig::default(), 16).is_ok());
}

/// An override may invert bounds the defaults kept ordered.
#[test]
fn test_override_inverts_bounds() {
    let toml_str = r#"
[axes.1]
max_delay_us = 200
"#;
    let result = parse_config(toml_str, 2);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidDelayBounds { min: 500, max: 200 }))
    ));
}

#[test]
fn test_zero_pulse_width() {
    let result = parse_config("[defaults]\npulse_width_us = 0\n", 1);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidPulseWidth(0)))
    ));
}

#[test]
fn test_zero_loop_period() {
    let result = parse_config("loop_period_us = 0\n", 1);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidLoopPeriod(0)))
    ));
}

/// Overrides for slots the engine does not have are rejected.
#[test]
fn test_override_beyond_capacity() {
    let toml_str = r#"
[axes.4]
acceleration = 100
"#;
    let result = parse_config(toml_str, 4);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::AxisOutOfRange { index: 4, capacity: 4 }))
    ));
}

/// The engine refuses a configuration that does not fit its capacity.
#[test]
fn test_engine_validates_on_construction() {
    let config = parse_config("[axes.1]\nacceleration = 100\n", 2).expect("Config should be valid");

    let result: Result<Engine<1>, _> = MotionEngine::new(&config, NoopDelay::new(), SimClock::default());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::AxisOutOfRange { index: 1, capacity: 1 }))
    ));

    let engine: Result<Engine<2>, _> = MotionEngine::new(&config, NoopDelay::new(), SimClock::default());
    assert!(engine.is_ok());
}
