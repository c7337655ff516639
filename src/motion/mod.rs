//! Motion module for axis-motion.
//!
//! Provides ramp profile calculation and per-move phase tracking.

mod executor;
mod profile;

pub use executor::{MotionExecutor, MovePhase};
pub use profile::{
    phase_lengths, DelayBounds, Direction, EasedRamp, LinearRamp, ProfileKind, RampInputs,
    RampProfile,
};
