//! Axis registry, per-tick scheduler and the engine facade.

mod engine;
mod interlock;
mod pins;
mod registry;
mod scheduler;
mod state;

pub use engine::MotionEngine;
pub use interlock::limit_for;
pub use pins::AxisPins;
pub use registry::AxisRegistry;
pub use state::{Axis, AxisSnapshot, AxisStatus};
