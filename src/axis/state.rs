//! Axis state record and read-only views of it.

use crate::config::{AxisSettings, TravelLimits};
use crate::motion::{DelayBounds, Direction, MotionExecutor, MovePhase, RampInputs};

use super::pins::AxisPins;

/// One stepper channel: wiring, kinematic state, motion configuration and
/// the move in progress.
///
/// `position` changes by exactly one per emitted pulse. `active` holds while
/// a move or home-seek is outstanding; `paused` suspends pulses without
/// touching progress.
#[derive(Debug)]
pub struct Axis<OUT, IN> {
    pub(crate) pins: Option<AxisPins<OUT, IN>>,
    pub(crate) limits: TravelLimits,
    pub(crate) settings: AxisSettings,

    pub(crate) position: i64,
    pub(crate) target: i64,
    pub(crate) direction: Direction,
    pub(crate) last_step_us: u32,

    /// Cruise delay of the current move.
    pub(crate) speed_us: u32,
    pub(crate) executor: MotionExecutor,

    pub(crate) active: bool,
    pub(crate) paused: bool,
    pub(crate) homing: bool,
}

impl<OUT, IN> Axis<OUT, IN> {
    /// Unwired slot with the given settings.
    pub(crate) fn new(settings: AxisSettings) -> Self {
        Self {
            pins: None,
            limits: TravelLimits::default(),
            settings,
            position: 0,
            target: 0,
            direction: Direction::Forward,
            last_step_us: 0,
            speed_us: settings.initial_delay_us,
            executor: MotionExecutor::constant(0, settings.initial_delay_us),
            active: false,
            paused: false,
            homing: false,
        }
    }

    /// True iff either ramp magnitude is positive.
    #[inline]
    pub fn use_acceleration(&self) -> bool {
        self.settings.acceleration > 0 || self.settings.deceleration > 0
    }

    /// Whether wiring has been assigned.
    #[inline]
    pub fn is_wired(&self) -> bool {
        self.pins.is_some()
    }

    /// Current settings.
    #[inline]
    pub fn settings(&self) -> &AxisSettings {
        &self.settings
    }

    /// Travel window assigned at wiring time.
    #[inline]
    pub fn limits(&self) -> TravelLimits {
        self.limits
    }

    /// Delay the scheduler waits before the next pulse.
    #[inline]
    pub(crate) fn step_delay_us(&self) -> u32 {
        if self.use_acceleration() {
            self.executor.current_delay_us()
        } else {
            self.speed_us
        }
    }

    pub(crate) fn ramp_inputs(&self) -> RampInputs {
        RampInputs {
            acceleration: self.settings.acceleration,
            deceleration: self.settings.deceleration,
            speed_us: self.speed_us,
            bounds: DelayBounds::new(self.settings.min_delay_us, self.settings.max_delay_us),
        }
    }

    pub(crate) fn snapshot(&self) -> AxisSnapshot {
        AxisSnapshot {
            position: self.position,
            target: self.target,
            direction: self.direction,
            speed_us: self.speed_us,
            current_delay_us: self.step_delay_us(),
            phase: self.executor.phase(),
            total_steps: self.executor.total_steps(),
            steps_taken: self.executor.steps_taken(),
            accel_steps: self.executor.accel_steps(),
            decel_steps: self.executor.decel_steps(),
            active: self.active,
            paused: self.paused,
            homing: self.homing,
            use_acceleration: self.use_acceleration(),
        }
    }
}

/// Switch levels and motion flag, as reported to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisStatus {
    /// Forward limit switch triggered.
    pub limit_a: bool,
    /// Backward limit switch triggered.
    pub limit_b: bool,
    /// Home switch triggered.
    pub home: bool,
    /// Absolute position in steps.
    pub position: i64,
    /// A move is in progress and not paused.
    pub moving: bool,
}

/// Full copy of an axis's motion state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSnapshot {
    /// Absolute position in steps.
    pub position: i64,
    /// Target position in steps.
    pub target: i64,
    /// Travel direction of the current or last move.
    pub direction: Direction,
    /// Cruise delay of the current or last move.
    pub speed_us: u32,
    /// Delay before the next pulse.
    pub current_delay_us: u32,
    /// Ramp phase.
    pub phase: MovePhase,
    /// Steps in the current accelerated move.
    pub total_steps: u32,
    /// Steps emitted in the current accelerated move.
    pub steps_taken: u32,
    /// Planned ramp-up length.
    pub accel_steps: u32,
    /// Planned ramp-down length.
    pub decel_steps: u32,
    /// A move or home-seek is outstanding.
    pub active: bool,
    /// Pulses are suspended.
    pub paused: bool,
    /// The outstanding move is a home-seek.
    pub homing: bool,
    /// Either ramp magnitude is positive.
    pub use_acceleration: bool,
}
