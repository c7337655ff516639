//! Configuration module for axis-motion.
//!
//! Provides types for loading and validating per-axis motion settings
//! from TOML files (with `std` feature) or pre-built values.

mod limits;
#[cfg(feature = "std")]
mod loader;
mod settings;
mod system;
mod validation;

pub use limits::{LimitPolicy, TargetCheck, TravelLimits};
pub use settings::{ActiveLevel, AxisOverride, AxisSettings};
pub use system::{EngineConfig, MAX_AXIS_OVERRIDES};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
