//! Closed command set accepted by [`MotionEngine::dispatch`].
//!
//! Commands are resolved once at the decoding boundary; the engine never
//! compares command names. With `std` or `alloc`, [`AxisCommand`]
//! deserializes from the line protocol's objects, e.g.
//! `{"cmd": "move_stepper", "id": 0, "steps": 200, "dir": 1, "speed": 800}`.
//! Wiring is typed hardware and has no wire form.
//!
//! [`MotionEngine::dispatch`]: crate::MotionEngine::dispatch

#[cfg(any(feature = "std", feature = "alloc"))]
use serde::Deserialize;

use crate::axis::AxisStatus;
use crate::motion::Direction;

/// One request for the motion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    any(feature = "std", feature = "alloc"),
    derive(Deserialize),
    serde(from = "wire::WireCommand")
)]
pub enum AxisCommand {
    /// Relative move (`move_stepper`).
    Move {
        /// Axis id.
        id: usize,
        /// Step count.
        steps: u32,
        /// Travel direction.
        direction: Direction,
        /// Cruise delay between pulses.
        delay_us: u32,
    },
    /// Home-seek (`home_stepper`).
    Home {
        /// Axis id.
        id: usize,
        /// Homing delay; the configured default when absent.
        delay_us: Option<u32>,
    },
    /// Ramp-up magnitude (`set_stepper_acceleration`).
    SetAcceleration {
        /// Axis id.
        id: usize,
        /// Magnitude; zero disables.
        value: i32,
    },
    /// Ramp-down magnitude (`set_stepper_deceleration`).
    SetDeceleration {
        /// Axis id.
        id: usize,
        /// Magnitude; zero disables.
        value: i32,
    },
    /// Delay bounds (`set_stepper_speed_limits`).
    SetSpeedLimits {
        /// Axis id.
        id: usize,
        /// Shortest delay.
        min_delay_us: u32,
        /// Longest delay.
        max_delay_us: u32,
    },
    /// Switch and motion snapshot (`get_status`, `get_pin_states`).
    QueryStatus {
        /// Axis id.
        id: usize,
    },
    /// Suspend pulses (`pause_stepper`).
    Pause {
        /// Axis id.
        id: usize,
    },
    /// Resume pulses (`resume_stepper`).
    Resume {
        /// Axis id.
        id: usize,
    },
    /// Abandon the current move (`stop_stepper`).
    Stop {
        /// Axis id.
        id: usize,
    },
}

impl AxisCommand {
    /// Axis the command addresses.
    pub fn axis(&self) -> usize {
        match *self {
            AxisCommand::Move { id, .. }
            | AxisCommand::Home { id, .. }
            | AxisCommand::SetAcceleration { id, .. }
            | AxisCommand::SetDeceleration { id, .. }
            | AxisCommand::SetSpeedLimits { id, .. }
            | AxisCommand::QueryStatus { id }
            | AxisCommand::Pause { id }
            | AxisCommand::Resume { id }
            | AxisCommand::Stop { id } => id,
        }
    }
}

/// Successful result of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Command applied.
    Ack,
    /// Reply to [`AxisCommand::QueryStatus`].
    Status(AxisStatus),
}

#[cfg(any(feature = "std", feature = "alloc"))]
mod wire {
    use serde::Deserialize;

    use super::AxisCommand;
    use crate::motion::Direction;

    // Field names follow the line protocol; `speed` is a delay in microseconds.
    #[derive(Deserialize)]
    #[serde(tag = "cmd", rename_all = "snake_case")]
    pub(super) enum WireCommand {
        MoveStepper {
            id: usize,
            steps: u32,
            dir: Direction,
            speed: u32,
        },
        HomeStepper {
            id: usize,
            #[serde(default)]
            speed: Option<u32>,
        },
        SetStepperAcceleration {
            id: usize,
            acceleration: i32,
        },
        SetStepperDeceleration {
            id: usize,
            deceleration: i32,
        },
        SetStepperSpeedLimits {
            id: usize,
            min_delay: u32,
            max_delay: u32,
        },
        #[serde(alias = "get_pin_states")]
        GetStatus {
            #[serde(default)]
            id: usize,
        },
        PauseStepper {
            id: usize,
        },
        ResumeStepper {
            id: usize,
        },
        StopStepper {
            id: usize,
        },
    }

    impl From<WireCommand> for AxisCommand {
        fn from(wire: WireCommand) -> Self {
            match wire {
                WireCommand::MoveStepper {
                    id,
                    steps,
                    dir,
                    speed,
                } => AxisCommand::Move {
                    id,
                    steps,
                    direction: dir,
                    delay_us: speed,
                },
                WireCommand::HomeStepper { id, speed } => AxisCommand::Home { id, delay_us: speed },
                WireCommand::SetStepperAcceleration { id, acceleration } => {
                    AxisCommand::SetAcceleration {
                        id,
                        value: acceleration,
                    }
                }
                WireCommand::SetStepperDeceleration { id, deceleration } => {
                    AxisCommand::SetDeceleration {
                        id,
                        value: deceleration,
                    }
                }
                WireCommand::SetStepperSpeedLimits {
                    id,
                    min_delay,
                    max_delay,
                } => AxisCommand::SetSpeedLimits {
                    id,
                    min_delay_us: min_delay,
                    max_delay_us: max_delay,
                },
                WireCommand::GetStatus { id } => AxisCommand::QueryStatus { id },
                WireCommand::PauseStepper { id } => AxisCommand::Pause { id },
                WireCommand::ResumeStepper { id } => AxisCommand::Resume { id },
                WireCommand::StopStepper { id } => AxisCommand::Stop { id },
            }
        }
    }
}
