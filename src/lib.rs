//! # axis-motion
//!
//! Non-blocking multi-axis stepper motion engine with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Cooperative scheduling**: every axis is advanced from one control-loop
//!   tick by elapsed-time checks, never by blocking waits
//! - **Ramped moves**: independent ramp-up and ramp-down with pluggable
//!   calibrations ([`LinearRamp`], [`EasedRamp`])
//! - **Safety interlock**: the limit switch guarding the direction of travel
//!   is polled before every step and aborts the move
//! - **Homing**: constant-speed seek toward the home switch redefines zero
//! - **no_std compatible**: fixed-capacity storage, no allocation
//! - **Configuration-driven**: per-axis settings from TOML (with `std`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axis_motion::{AxisPins, Direction, MotionEngine, MotionEvent, TravelLimits};
//!
//! let config = axis_motion::load_config("motion.toml", 4)?;
//! let mut engine: MotionEngine<_, _, _, _, 4> = MotionEngine::new(&config, delay, clock)?;
//!
//! engine
//!     .init_axis(0, AxisPins::new(step, dir, limit_a, limit_b, home), TravelLimits::new(0, 20_000))
//!     .map_err(|(_, e)| e)?;
//! engine.move_to(0, 2000, Direction::Forward, 500)?;
//!
//! let mut events: heapless::Vec<MotionEvent, 8> = heapless::Vec::new();
//! loop {
//!     engine.tick(&mut events)?;
//!     // hand events to the command link, decode incoming commands, dispatch
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and [`StdClock`]
//! - `alloc`: Enables command decoding without std
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod axis;
pub mod clock;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod motion;

// Re-exports for ergonomic API
pub use axis::{AxisPins, AxisSnapshot, AxisStatus, MotionEngine};
pub use clock::{elapsed_us, MicrosClock};
pub use command::{AxisCommand, Response};
pub use config::{
    validate_config, ActiveLevel, AxisSettings, EngineConfig, LimitPolicy, TravelLimits,
};
pub use control::{ControlLoop, LoopStats};
pub use error::{AxisError, ConfigError, Error, Result};
pub use event::{EventSink, FnSink, LimitSwitch, MotionEvent};
pub use motion::{
    DelayBounds, Direction, EasedRamp, LinearRamp, MotionExecutor, MovePhase, ProfileKind,
    RampInputs, RampProfile,
};

// Configuration loading and host clock (std only)
#[cfg(feature = "std")]
pub use clock::StdClock;
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
