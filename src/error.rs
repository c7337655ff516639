//! Error types for axis-motion.
//!
//! Provides unified error handling across configuration and axis commands.
//! Limit-switch hits are not errors: they are reported as
//! [`MotionEvent::LimitHit`](crate::event::MotionEvent::LimitHit).

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all axis-motion operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis command error
    Axis(AxisError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Delay bounds are inverted (min must be <= max)
    InvalidDelayBounds {
        /// Minimum delay in microseconds
        min: u32,
        /// Maximum delay in microseconds
        max: u32,
    },
    /// Step pulse width must be at least one microsecond
    InvalidPulseWidth(u32),
    /// Loop period must be at least one microsecond
    InvalidLoopPeriod(u32),
    /// Per-axis override names a slot outside the registry
    AxisOutOfRange {
        /// Index given in the configuration
        index: usize,
        /// Number of axis slots
        capacity: usize,
    },
    /// Per-axis override key is not a decimal index
    InvalidAxisKey(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis command errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisError {
    /// Axis id is outside `[0, capacity)`
    InvalidAxisId {
        /// Requested id
        id: usize,
        /// Number of axis slots
        capacity: usize,
    },
    /// Axis wiring was never assigned with `init_axis`
    NotInitialized(usize),
    /// Pin operation failed
    PinError,
    /// Move target lies outside the travel window (reject policy)
    LimitExceeded {
        /// Requested target position
        position: i64,
        /// Limit that was exceeded (min or max)
        limit: i64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDelayBounds { min, max } => {
                write!(f, "Invalid delay bounds: min ({}) must be <= max ({})", min, max)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid pulse width: {} us. Must be > 0", v)
            }
            ConfigError::InvalidLoopPeriod(v) => {
                write!(f, "Invalid loop period: {} us. Must be > 0", v)
            }
            ConfigError::AxisOutOfRange { index, capacity } => {
                write!(f, "Axis override {} out of range (capacity {})", index, capacity)
            }
            ConfigError::InvalidAxisKey(key) => {
                write!(f, "Axis override key '{}' is not an index", key)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::InvalidAxisId { id, capacity } => {
                write!(f, "Invalid axis id {} (capacity {})", id, capacity)
            }
            AxisError::NotInitialized(id) => write!(f, "Axis {} not initialized", id),
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
            AxisError::LimitExceeded { position, limit } => {
                write!(f, "Target {} exceeds travel limit {}", position, limit)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}
