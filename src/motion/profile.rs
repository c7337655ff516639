//! Ramp profile calculation.
//!
//! Computes how many steps of a move are spent ramping up and down, and
//! the inter-step delay at each point of a ramp. Two calibrations are
//! provided behind the [`RampProfile`] trait; [`ProfileKind`] selects one
//! per axis.

use libm::powf;
use serde::Deserialize;

/// Direction of axis travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(from = "u8")]
pub enum Direction {
    /// Toward increasing position (direction line asserted).
    Forward,
    /// Toward decreasing position.
    Backward,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Wire encoding: `1` is forward, anything else backward.
impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        if value == 1 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Hard bounds on the inter-step delay of an axis, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayBounds {
    /// Shortest delay (fastest speed).
    pub min_us: u32,
    /// Longest delay (slowest speed); ramps start and end here.
    pub max_us: u32,
}

impl DelayBounds {
    /// Create new bounds.
    pub const fn new(min_us: u32, max_us: u32) -> Self {
        Self { min_us, max_us }
    }

    /// Clamp a delay into the bounds.
    ///
    /// Never panics; inverted bounds resolve to `max_us`.
    #[inline]
    pub fn clamp(self, delay_us: u32) -> u32 {
        delay_us.max(self.min_us).min(self.max_us)
    }
}

/// Inputs shared by every ramp calculation for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampInputs {
    /// Ramp-up magnitude (<= 0 disables the ramp-up).
    pub acceleration: i32,
    /// Ramp-down magnitude (<= 0 disables the ramp-down).
    pub deceleration: i32,
    /// Cruise delay in microseconds; ramps run between this and `bounds.max_us`.
    pub speed_us: u32,
    /// Delay bounds of the axis.
    pub bounds: DelayBounds,
}

/// Ramp calibration: phase lengths and per-step delays.
///
/// Implementations are pure; `previous_us` is the delay in effect before
/// the call, for curves that limit how fast the delay may change.
pub trait RampProfile {
    /// Steps devoted to ramping up, before the shared clamp of [`phase_lengths`].
    fn accel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32;

    /// Steps devoted to ramping down, before the shared clamp of [`phase_lengths`].
    fn decel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32;

    /// Delay at `step` of a ramp-up lasting `accel_steps`, from `bounds.max_us`
    /// down to `speed_us`.
    fn accel_delay(&self, ramp: &RampInputs, step: u32, accel_steps: u32, previous_us: u32) -> u32;

    /// Delay at `step` of a ramp-down lasting `decel_steps`, from `speed_us`
    /// up to `bounds.max_us`.
    fn decel_delay(&self, ramp: &RampInputs, step: u32, decel_steps: u32, previous_us: u32) -> u32;
}

/// Step count equals the magnitude, capped at 40% of the move and floored
/// at 10 steps; delays interpolate linearly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearRamp;

impl LinearRamp {
    const MIN_STEPS: u64 = 10;

    fn ramp_steps(magnitude: i32, total_steps: u32) -> u32 {
        if magnitude <= 0 {
            return 0;
        }
        let cap = u64::from(total_steps) * 2 / 5;
        let steps = cap.min(magnitude as u64).max(Self::MIN_STEPS);
        steps as u32
    }
}

impl RampProfile for LinearRamp {
    fn accel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        Self::ramp_steps(ramp.acceleration, total_steps)
    }

    fn decel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        Self::ramp_steps(ramp.deceleration, total_steps)
    }

    fn accel_delay(&self, ramp: &RampInputs, step: u32, accel_steps: u32, _previous_us: u32) -> u32 {
        let start = i64::from(ramp.bounds.max_us);
        let end = i64::from(ramp.speed_us);
        if accel_steps == 0 {
            return ramp.bounds.clamp(ramp.speed_us);
        }
        let progress = i64::from(step.min(accel_steps));
        let delay = start - (start - end) * progress / i64::from(accel_steps);
        ramp.bounds.clamp(to_delay(delay))
    }

    fn decel_delay(&self, ramp: &RampInputs, step: u32, decel_steps: u32, _previous_us: u32) -> u32 {
        let start = i64::from(ramp.speed_us);
        let end = i64::from(ramp.bounds.max_us);
        if decel_steps == 0 {
            return ramp.bounds.clamp(ramp.speed_us);
        }
        let progress = i64::from(step.min(decel_steps));
        let delay = start + (end - start) * progress / i64::from(decel_steps);
        ramp.bounds.clamp(to_delay(delay))
    }
}

/// Step count scales with the span between `max_us` and the cruise delay,
/// capped at 30% of the move or 200 steps and floored at 20; delays follow
/// a quadratic ease-out (ramp-up) or ease-in (ramp-down), changing by at
/// most 1/20 of the span per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EasedRamp;

impl EasedRamp {
    const MIN_STEPS: i64 = 20;
    const MAX_STEPS: i64 = 200;
    const SPAN_DIVISOR: i64 = 50;
    const SLEW_DIVISOR: i64 = 20;

    fn ramp_steps(ramp: &RampInputs, magnitude: i32, total_steps: u32) -> u32 {
        if magnitude <= 0 {
            return 0;
        }
        let span = i64::from(ramp.bounds.max_us) - i64::from(ramp.speed_us);
        let raw = (span / Self::SPAN_DIVISOR).saturating_mul(i64::from(magnitude));
        let cap = (i64::from(total_steps) * 3 / 10).min(Self::MAX_STEPS);
        raw.min(cap).max(Self::MIN_STEPS) as u32
    }

    /// Move from `previous` toward `target` by at most 1/20 of `span`.
    fn slew(previous: i64, target: i64, span: i64) -> i64 {
        let max_change = (span.abs() / Self::SLEW_DIVISOR).max(1);
        if (target - previous).abs() > max_change {
            previous + if target > previous { max_change } else { -max_change }
        } else {
            target
        }
    }
}

impl RampProfile for EasedRamp {
    fn accel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        Self::ramp_steps(ramp, ramp.acceleration, total_steps)
    }

    fn decel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        Self::ramp_steps(ramp, ramp.deceleration, total_steps)
    }

    fn accel_delay(&self, ramp: &RampInputs, step: u32, accel_steps: u32, previous_us: u32) -> u32 {
        if accel_steps == 0 {
            return ramp.bounds.clamp(ramp.speed_us);
        }
        let start = i64::from(ramp.bounds.max_us);
        let span = start - i64::from(ramp.speed_us);
        let progress = step.min(accel_steps) as f32 / accel_steps as f32;
        let eased = 1.0 - powf(1.0 - progress, 2.0);
        let target = start - (span as f32 * eased) as i64;
        let delay = Self::slew(i64::from(previous_us), target, span);
        ramp.bounds.clamp(to_delay(delay))
    }

    fn decel_delay(&self, ramp: &RampInputs, step: u32, decel_steps: u32, previous_us: u32) -> u32 {
        if decel_steps == 0 {
            return ramp.bounds.clamp(ramp.speed_us);
        }
        let start = i64::from(ramp.speed_us);
        let span = i64::from(ramp.bounds.max_us) - start;
        let progress = step.min(decel_steps) as f32 / decel_steps as f32;
        let eased = powf(progress, 2.0);
        let target = start + (span as f32 * eased) as i64;
        let delay = Self::slew(i64::from(previous_us), target, span);
        ramp.bounds.clamp(to_delay(delay))
    }
}

/// Ramp calibration selected for an axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// [`LinearRamp`].
    #[default]
    Linear,
    /// [`EasedRamp`].
    Eased,
}

impl RampProfile for ProfileKind {
    fn accel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        match self {
            ProfileKind::Linear => LinearRamp.accel_steps(ramp, total_steps),
            ProfileKind::Eased => EasedRamp.accel_steps(ramp, total_steps),
        }
    }

    fn decel_steps(&self, ramp: &RampInputs, total_steps: u32) -> u32 {
        match self {
            ProfileKind::Linear => LinearRamp.decel_steps(ramp, total_steps),
            ProfileKind::Eased => EasedRamp.decel_steps(ramp, total_steps),
        }
    }

    fn accel_delay(&self, ramp: &RampInputs, step: u32, accel_steps: u32, previous_us: u32) -> u32 {
        match self {
            ProfileKind::Linear => LinearRamp.accel_delay(ramp, step, accel_steps, previous_us),
            ProfileKind::Eased => EasedRamp.accel_delay(ramp, step, accel_steps, previous_us),
        }
    }

    fn decel_delay(&self, ramp: &RampInputs, step: u32, decel_steps: u32, previous_us: u32) -> u32 {
        match self {
            ProfileKind::Linear => LinearRamp.decel_delay(ramp, step, decel_steps, previous_us),
            ProfileKind::Eased => EasedRamp.decel_delay(ramp, step, decel_steps, previous_us),
        }
    }
}

/// Ramp-up and ramp-down lengths for a move of `total_steps`.
///
/// Guarantees `accel + decel <= total_steps`. When the raw lengths overflow
/// the move they are rescaled: split evenly if both ramps are enabled,
/// otherwise the enabled ramp is shortened to the move. A disabled ramp
/// (magnitude <= 0) always has length 0.
pub fn phase_lengths<P: RampProfile>(profile: &P, ramp: &RampInputs, total_steps: u32) -> (u32, u32) {
    let accel = profile.accel_steps(ramp, total_steps);
    let decel = profile.decel_steps(ramp, total_steps);

    if u64::from(accel) + u64::from(decel) <= u64::from(total_steps) {
        return (accel, decel);
    }

    match (accel, decel) {
        (0, d) => (0, d.min(total_steps)),
        (a, 0) => (a.min(total_steps), 0),
        _ => {
            let accel = total_steps / 2;
            (accel, total_steps - accel)
        }
    }
}

fn to_delay(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
