//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::EngineConfig;

/// Load configuration from a TOML file for a registry of `capacity` axes.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use axis_motion::load_config;
///
/// let config = load_config("axes.toml", 2)?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P, capacity: usize) -> Result<EngineConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content, capacity)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str, capacity: usize) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config, capacity)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActiveLevel, LimitPolicy};
    use crate::motion::ProfileKind;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("", 2).unwrap();
        assert_eq!(config.defaults.min_delay_us, 500);
        assert_eq!(config.defaults.max_delay_us, 5000);
        assert_eq!(config.loop_period_us, 1000);
    }

    #[test]
    fn test_parse_defaults_and_override() {
        let toml = r#"
loop_period_us = 500

[defaults]
min_delay_us = 400
max_delay_us = 6000
profile = "eased"
switch_active_level = "low"

[axes.1]
acceleration = 500
deceleration = 250
invert_direction = true
travel_policy = "reject"
"#;

        let config = parse_config(toml, 2).unwrap();
        assert_eq!(config.loop_period_us, 500);

        let axis0 = config.settings_for(0);
        assert_eq!(axis0.min_delay_us, 400);
        assert_eq!(axis0.profile, ProfileKind::Eased);
        assert_eq!(axis0.acceleration, 0);

        let axis1 = config.settings_for(1);
        assert_eq!(axis1.max_delay_us, 6000);
        assert_eq!(axis1.acceleration, 500);
        assert_eq!(axis1.deceleration, 250);
        assert!(axis1.invert_direction);
        assert_eq!(axis1.travel_policy, LimitPolicy::Reject);
        assert_eq!(axis1.switch_active_level, ActiveLevel::Low);
    }

    #[test]
    fn test_parse_rejects_inverted_bounds() {
        let toml = r#"
[axes.0]
min_delay_us = 9000
"#;
        assert!(parse_config(toml, 2).is_err());
    }
}
