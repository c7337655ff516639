//! Per-move phase tracking.

use super::profile::{phase_lengths, RampInputs, RampProfile};

/// Segment of an accelerated move currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovePhase {
    /// Ramping up from `max_us` toward the cruise delay.
    Accelerating,
    /// Holding the cruise delay.
    Cruising,
    /// Ramping down from the cruise delay toward `max_us`.
    Decelerating,
}

/// Progress of the current move through its ramp phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionExecutor {
    phase: MovePhase,
    total_steps: u32,
    steps_taken: u32,
    accel_steps: u32,
    decel_steps: u32,
    current_delay_us: u32,
}

impl MotionExecutor {
    /// Executor for a move without ramps; the delay stays at `delay_us`.
    pub fn constant(total_steps: u32, delay_us: u32) -> Self {
        Self {
            phase: MovePhase::Cruising,
            total_steps,
            steps_taken: 0,
            accel_steps: 0,
            decel_steps: 0,
            current_delay_us: delay_us,
        }
    }

    /// Plan an accelerated move of `total_steps`.
    ///
    /// Starts in `Accelerating` at `bounds.max_us` when a ramp-up exists,
    /// otherwise in `Cruising` at the cruise delay.
    pub fn accelerated<P: RampProfile>(profile: &P, ramp: &RampInputs, total_steps: u32) -> Self {
        let (accel_steps, decel_steps) = phase_lengths(profile, ramp, total_steps);

        let (phase, current_delay_us) = if accel_steps > 0 {
            (MovePhase::Accelerating, ramp.bounds.max_us)
        } else {
            (MovePhase::Cruising, ramp.bounds.clamp(ramp.speed_us))
        };

        Self {
            phase,
            total_steps,
            steps_taken: 0,
            accel_steps,
            decel_steps,
            current_delay_us,
        }
    }

    /// Record one emitted step and update phase and delay.
    ///
    /// The ramp-up runs until `accel_steps` have been taken. The delay then
    /// keeps closing in on the cruise value at the profile's own rate, so a
    /// slew-limited curve cut short never jumps. Cruising switches to the
    /// ramp-down once the remaining steps fit in `decel_steps`, and the
    /// ramp-down never shortens the delay. The new delay applies from the
    /// following step.
    pub fn advance<P: RampProfile>(&mut self, profile: &P, ramp: &RampInputs) {
        self.steps_taken = self.steps_taken.saturating_add(1);

        match self.phase {
            MovePhase::Accelerating => {
                if self.steps_taken < self.accel_steps {
                    self.current_delay_us = profile.accel_delay(
                        ramp,
                        self.steps_taken,
                        self.accel_steps,
                        self.current_delay_us,
                    );
                } else {
                    self.phase = MovePhase::Cruising;
                    self.current_delay_us = self.cruise_delay(profile, ramp);
                }
            }
            MovePhase::Cruising => {
                if self.accel_steps > 0 {
                    self.current_delay_us = self.cruise_delay(profile, ramp);
                }
                if self.steps_remaining() <= self.decel_steps {
                    self.phase = MovePhase::Decelerating;
                }
            }
            MovePhase::Decelerating => {
                let decel_start = self.total_steps.saturating_sub(self.decel_steps);
                let step = self.steps_taken.saturating_sub(decel_start);
                let next = profile.decel_delay(ramp, step, self.decel_steps, self.current_delay_us);
                self.current_delay_us = next.max(self.current_delay_us);
            }
        }
    }

    /// End point of the ramp-up, approached from the current delay.
    fn cruise_delay<P: RampProfile>(&self, profile: &P, ramp: &RampInputs) -> u32 {
        profile.accel_delay(ramp, self.accel_steps, self.accel_steps, self.current_delay_us)
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    /// Get the delay to wait before the next step.
    #[inline]
    pub fn current_delay_us(&self) -> u32 {
        self.current_delay_us
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Get the number of steps taken so far.
    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Get the planned ramp-up length.
    #[inline]
    pub fn accel_steps(&self) -> u32 {
        self.accel_steps
    }

    /// Get the planned ramp-down length.
    #[inline]
    pub fn decel_steps(&self) -> u32 {
        self.decel_steps
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.total_steps.saturating_sub(self.steps_taken)
    }
}

impl Default for MotionExecutor {
    fn default() -> Self {
        Self::constant(0, 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{DelayBounds, EasedRamp, LinearRamp};

    fn ramp() -> RampInputs {
        RampInputs {
            acceleration: 100,
            deceleration: 50,
            speed_us: 500,
            bounds: DelayBounds::new(500, 5000),
        }
    }

    #[test]
    fn test_phase_sequence() {
        let ramp = ramp();
        let mut executor = MotionExecutor::accelerated(&LinearRamp, &ramp, 1000);

        assert_eq!(executor.phase(), MovePhase::Accelerating);
        assert_eq!(executor.current_delay_us(), 5000);
        assert_eq!(executor.accel_steps(), 100);
        assert_eq!(executor.decel_steps(), 50);

        for _ in 0..100 {
            executor.advance(&LinearRamp, &ramp);
        }
        assert_eq!(executor.phase(), MovePhase::Cruising);
        assert_eq!(executor.current_delay_us(), 500);

        for _ in 100..951 {
            executor.advance(&LinearRamp, &ramp);
        }
        assert_eq!(executor.phase(), MovePhase::Decelerating);

        while executor.steps_remaining() > 0 {
            executor.advance(&LinearRamp, &ramp);
        }
        assert_eq!(executor.steps_taken(), 1000);
        assert_eq!(executor.current_delay_us(), 5000);
    }

    #[test]
    fn test_without_ramp_up_starts_cruising() {
        let ramp = RampInputs {
            acceleration: 0,
            ..ramp()
        };
        let executor = MotionExecutor::accelerated(&LinearRamp, &ramp, 1000);

        assert_eq!(executor.phase(), MovePhase::Cruising);
        assert_eq!(executor.current_delay_us(), 500);
        assert_eq!(executor.accel_steps(), 0);
    }

    #[test]
    fn test_eased_short_ramp_respects_slew_limit() {
        let ramp = RampInputs {
            acceleration: 1,
            deceleration: 1,
            speed_us: 500,
            bounds: DelayBounds::new(500, 5000),
        };
        let max_change = (5000 - 500) / 20;
        let mut executor = MotionExecutor::accelerated(&EasedRamp, &ramp, 30);
        assert_eq!(executor.accel_steps(), 15);
        assert_eq!(executor.decel_steps(), 15);

        let mut previous = executor.current_delay_us();
        while executor.steps_remaining() > 0 {
            let phase = executor.phase();
            executor.advance(&EasedRamp, &ramp);
            let delay = executor.current_delay_us();
            assert!(delay.abs_diff(previous) <= max_change);
            if phase == MovePhase::Decelerating {
                assert!(delay >= previous);
            }
            previous = delay;
        }
    }

    #[test]
    fn test_cruise_delay_is_clamped() {
        let ramp = RampInputs {
            speed_us: 100,
            ..ramp()
        };
        let mut executor = MotionExecutor::accelerated(&LinearRamp, &ramp, 1000);
        for _ in 0..100 {
            executor.advance(&LinearRamp, &ramp);
        }
        assert_eq!(executor.phase(), MovePhase::Cruising);
        assert_eq!(executor.current_delay_us(), 500);
    }

    #[test]
    fn test_constant_executor() {
        let executor = MotionExecutor::constant(10, 800);
        assert_eq!(executor.phase(), MovePhase::Cruising);
        assert_eq!(executor.current_delay_us(), 800);
        assert_eq!(executor.steps_remaining(), 10);
    }
}
