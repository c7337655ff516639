//! Per-axis motion settings from TOML.

use serde::Deserialize;

use super::limits::LimitPolicy;
use crate::motion::ProfileKind;

/// Logic level at which an input or output is considered asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ActiveLevel {
    /// Asserted when the line is low (pulled-up switch closing to ground).
    #[default]
    Low,
    /// Asserted when the line is high.
    High,
}

impl ActiveLevel {
    /// Whether a line reading `is_high` is asserted.
    #[inline]
    pub fn is_active(self, is_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !is_high,
            ActiveLevel::High => is_high,
        }
    }

    /// Line level (high = `true`) to drive for the given assertion state.
    #[inline]
    pub fn level_for(self, asserted: bool) -> bool {
        match self {
            ActiveLevel::Low => !asserted,
            ActiveLevel::High => asserted,
        }
    }
}

/// Motion settings applied to an axis slot at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct AxisSettings {
    /// Shortest permitted inter-step delay (fastest speed).
    pub min_delay_us: u32,

    /// Longest permitted inter-step delay; ramps start and end here.
    pub max_delay_us: u32,

    /// Delay loaded into `current_delay` before the first move.
    pub initial_delay_us: u32,

    /// Delay used by `home` when the caller gives none.
    pub homing_delay_us: u32,

    /// Width of the step pulse high phase.
    pub pulse_width_us: u32,

    /// Ramp-up magnitude (0 disables).
    pub acceleration: i32,

    /// Ramp-down magnitude (0 disables).
    pub deceleration: i32,

    /// Ramp curve and phase-length calibration.
    pub profile: ProfileKind,

    /// Level at which limit and home switches read as triggered.
    pub switch_active_level: ActiveLevel,

    /// Level at which the driver enable line energizes the motor.
    pub enable_active_level: ActiveLevel,

    /// Invert direction pin logic.
    pub invert_direction: bool,

    /// What to do with move targets outside the travel window.
    pub travel_policy: LimitPolicy,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            min_delay_us: 500,
            max_delay_us: 5000,
            initial_delay_us: 1000,
            homing_delay_us: 1000,
            pulse_width_us: 2,
            acceleration: 0,
            deceleration: 0,
            profile: ProfileKind::default(),
            switch_active_level: ActiveLevel::Low,
            enable_active_level: ActiveLevel::Low,
            invert_direction: false,
            travel_policy: LimitPolicy::Ignore,
        }
    }
}

/// Partial settings for one axis slot; unset fields inherit the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AxisOverride {
    /// See [`AxisSettings::min_delay_us`].
    pub min_delay_us: Option<u32>,
    /// See [`AxisSettings::max_delay_us`].
    pub max_delay_us: Option<u32>,
    /// See [`AxisSettings::initial_delay_us`].
    pub initial_delay_us: Option<u32>,
    /// See [`AxisSettings::homing_delay_us`].
    pub homing_delay_us: Option<u32>,
    /// See [`AxisSettings::pulse_width_us`].
    pub pulse_width_us: Option<u32>,
    /// See [`AxisSettings::acceleration`].
    pub acceleration: Option<i32>,
    /// See [`AxisSettings::deceleration`].
    pub deceleration: Option<i32>,
    /// See [`AxisSettings::profile`].
    pub profile: Option<ProfileKind>,
    /// See [`AxisSettings::switch_active_level`].
    pub switch_active_level: Option<ActiveLevel>,
    /// See [`AxisSettings::enable_active_level`].
    pub enable_active_level: Option<ActiveLevel>,
    /// See [`AxisSettings::invert_direction`].
    pub invert_direction: Option<bool>,
    /// See [`AxisSettings::travel_policy`].
    pub travel_policy: Option<LimitPolicy>,
}

impl AxisOverride {
    /// Layer this override on top of `base`.
    pub fn apply(&self, base: &AxisSettings) -> AxisSettings {
        AxisSettings {
            min_delay_us: self.min_delay_us.unwrap_or(base.min_delay_us),
            max_delay_us: self.max_delay_us.unwrap_or(base.max_delay_us),
            initial_delay_us: self.initial_delay_us.unwrap_or(base.initial_delay_us),
            homing_delay_us: self.homing_delay_us.unwrap_or(base.homing_delay_us),
            pulse_width_us: self.pulse_width_us.unwrap_or(base.pulse_width_us),
            acceleration: self.acceleration.unwrap_or(base.acceleration),
            deceleration: self.deceleration.unwrap_or(base.deceleration),
            profile: self.profile.unwrap_or(base.profile),
            switch_active_level: self.switch_active_level.unwrap_or(base.switch_active_level),
            enable_active_level: self.enable_active_level.unwrap_or(base.enable_active_level),
            invert_direction: self.invert_direction.unwrap_or(base.invert_direction),
            travel_policy: self.travel_policy.unwrap_or(base.travel_policy),
        }
    }
}
