//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::settings::AxisSettings;
use super::EngineConfig;

/// Validate an engine configuration for a registry of `capacity` axes.
///
/// Checks:
/// - Delay bounds are ordered (min <= max) for the defaults and every override
/// - Step pulse width is non-zero
/// - Override keys are decimal indices below `capacity`
/// - Loop period is non-zero
///
/// Runtime commands never re-run these checks; `set_speed_limits` accepts
/// any bounds.
pub fn validate_config(config: &EngineConfig, capacity: usize) -> Result<()> {
    validate_settings(&config.defaults)?;

    for (key, over) in config.axes.iter() {
        let index = key
            .as_str()
            .parse::<usize>()
            .map_err(|_| Error::Config(ConfigError::InvalidAxisKey(key.clone())))?;

        if index >= capacity {
            return Err(Error::Config(ConfigError::AxisOutOfRange { index, capacity }));
        }

        validate_settings(&over.apply(&config.defaults))?;
    }

    if config.loop_period_us == 0 {
        return Err(Error::Config(ConfigError::InvalidLoopPeriod(0)));
    }

    Ok(())
}

fn validate_settings(settings: &AxisSettings) -> Result<()> {
    if settings.min_delay_us > settings.max_delay_us {
        return Err(Error::Config(ConfigError::InvalidDelayBounds {
            min: settings.min_delay_us,
            max: settings.max_delay_us,
        }));
    }

    if settings.pulse_width_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(0)));
    }

    Ok(())
}
