//! Multi-axis motion engine.
//!
//! Owns the axis registry, the pulse-width delay provider and the clock.
//! Commands mutate axis state synchronously; [`MotionEngine::tick`] is called
//! once per control-loop iteration and advances every active axis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::MicrosClock;
use crate::command::{AxisCommand, Response};
use crate::config::{validate_config, EngineConfig, TargetCheck, TravelLimits};
use crate::error::{AxisError, Error, Result};
use crate::event::{EventSink, LimitSwitch};
use crate::motion::{Direction, MotionExecutor, ProfileKind};

use super::pins::AxisPins;
use super::registry::AxisRegistry;
use super::scheduler;
use super::state::{Axis, AxisSnapshot, AxisStatus};

/// Fixed-capacity set of stepper axes advanced by a cooperative tick.
///
/// Generic over:
/// - `OUT`: output pin type shared by step, direction and enable lines
/// - `IN`: input pin type shared by limit and home switches
/// - `DELAY`: delay provider for the step pulse width
/// - `CLOCK`: monotonic microsecond clock
/// - `N`: number of axis slots
pub struct MotionEngine<OUT, IN, DELAY, CLOCK, const N: usize>
where
    OUT: OutputPin,
    IN: InputPin,
    DELAY: DelayNs,
    CLOCK: MicrosClock,
{
    registry: AxisRegistry<OUT, IN, N>,
    delay: DELAY,
    clock: CLOCK,
}

impl<OUT, IN, DELAY, CLOCK, const N: usize> MotionEngine<OUT, IN, DELAY, CLOCK, N>
where
    OUT: OutputPin,
    IN: InputPin,
    DELAY: DelayNs,
    CLOCK: MicrosClock,
{
    /// Create an engine whose slots take their settings from `config`.
    ///
    /// Fails if the configuration does not validate for `N` slots.
    pub fn new(config: &EngineConfig, delay: DELAY, clock: CLOCK) -> Result<Self> {
        validate_config(config, N)?;
        Ok(Self {
            registry: AxisRegistry::new(config),
            delay,
            clock,
        })
    }

    /// Create an engine with default settings on every slot.
    pub fn with_defaults(delay: DELAY, clock: CLOCK) -> Self {
        Self {
            registry: AxisRegistry::new(&EngineConfig::default()),
            delay,
            clock,
        }
    }

    /// Number of axis slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Read-only access to an axis.
    pub fn axis(&self, id: usize) -> Result<&Axis<OUT, IN>> {
        self.registry.get(id)
    }

    /// Delay provider, e.g. for the loop throttle.
    pub fn delay_mut(&mut self) -> &mut DELAY {
        &mut self.delay
    }

    /// The engine's clock.
    pub fn clock(&self) -> &CLOCK {
        &self.clock
    }

    /// Assign wiring and travel limits to a slot and arm it.
    ///
    /// The driver is released, position is zeroed and the axis left idle.
    /// Settings are kept. Returns the previous wiring, if any; on failure
    /// the new wiring is handed back with the error.
    #[allow(clippy::type_complexity)]
    pub fn init_axis(
        &mut self,
        id: usize,
        mut pins: AxisPins<OUT, IN>,
        limits: TravelLimits,
    ) -> core::result::Result<Option<AxisPins<OUT, IN>>, (AxisPins<OUT, IN>, Error)> {
        let axis = match self.registry.get_mut(id) {
            Ok(axis) => axis,
            Err(e) => return Err((pins, e)),
        };

        if let Err(e) = pins.set_enabled(false, axis.settings.enable_active_level) {
            return Err((pins, e));
        }

        let previous = axis.pins.replace(pins);
        axis.limits = limits;
        axis.position = 0;
        axis.target = 0;
        axis.active = false;
        axis.paused = false;
        axis.homing = false;
        axis.executor = MotionExecutor::constant(0, axis.speed_us);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "axis {}: initialized, travel {}..{}",
            id,
            limits.min_steps,
            limits.max_steps
        );

        Ok(previous)
    }

    /// Start a relative move of `steps` in `direction`, cruising at
    /// `delay_us` between pulses.
    ///
    /// Replaces any move in progress immediately. With ramps enabled the
    /// phase lengths are planned from the current position and the ramp-up
    /// restarts at `max_delay_us`.
    pub fn move_to(&mut self, id: usize, steps: u32, direction: Direction, delay_us: u32) -> Result<()> {
        let now = self.clock.now_us();
        let axis = wired(&mut self.registry, id)?;

        let requested = axis
            .position
            .saturating_add(direction.sign() * i64::from(steps));
        let target = match axis.limits.apply(axis.settings.travel_policy, axis.position, requested) {
            TargetCheck::Accept(target) => target,
            TargetCheck::Reject(limit) => {
                return Err(AxisError::LimitExceeded {
                    position: requested,
                    limit,
                }
                .into());
            }
        };
        let delta = target - axis.position;

        let invert = axis.settings.invert_direction;
        let enable_level = axis.settings.enable_active_level;
        if let Some(pins) = axis.pins.as_mut() {
            pins.set_direction(direction, invert)?;
            pins.set_enabled(true, enable_level)?;
        }

        axis.target = target;
        axis.speed_us = delay_us;
        axis.direction = direction;
        axis.homing = false;
        axis.active = true;
        axis.paused = false;
        axis.last_step_us = now;

        let total_steps = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        axis.executor = if axis.use_acceleration() {
            let ramp = axis.ramp_inputs();
            MotionExecutor::accelerated(&axis.settings.profile, &ramp, total_steps)
        } else {
            MotionExecutor::constant(total_steps, delay_us)
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "axis {}: move to {} total={} accel={} decel={}",
            id,
            target,
            total_steps,
            axis.executor.accel_steps(),
            axis.executor.decel_steps()
        );

        Ok(())
    }

    /// Seek the home switch backward at a constant `delay_us` (or the
    /// configured homing delay).
    ///
    /// Ramps and travel limits are ignored. The axis stops and its position
    /// becomes zero once the home switch reads triggered after a pulse.
    pub fn home(&mut self, id: usize, delay_us: Option<u32>) -> Result<()> {
        let now = self.clock.now_us();
        let axis = wired(&mut self.registry, id)?;

        let delay_us = delay_us.unwrap_or(axis.settings.homing_delay_us);
        let invert = axis.settings.invert_direction;
        let enable_level = axis.settings.enable_active_level;
        if let Some(pins) = axis.pins.as_mut() {
            pins.set_direction(Direction::Backward, invert)?;
            pins.set_enabled(true, enable_level)?;
        }

        axis.direction = Direction::Backward;
        axis.target = 0;
        axis.speed_us = delay_us;
        axis.executor = MotionExecutor::constant(0, delay_us);
        axis.homing = true;
        axis.active = true;
        axis.paused = false;
        axis.last_step_us = now;

        #[cfg(feature = "defmt")]
        defmt::info!("axis {}: homing at {} us", id, delay_us);

        Ok(())
    }

    /// Set the ramp-up magnitude; zero or negative disables the ramp-up.
    ///
    /// Takes effect from the next move.
    pub fn set_acceleration(&mut self, id: usize, value: i32) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.settings.acceleration = value;

        #[cfg(feature = "defmt")]
        defmt::debug!("axis {}: acceleration={} ramps={}", id, value, axis.use_acceleration());

        Ok(())
    }

    /// Set the ramp-down magnitude; zero or negative disables the ramp-down.
    pub fn set_deceleration(&mut self, id: usize, value: i32) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.settings.deceleration = value;

        #[cfg(feature = "defmt")]
        defmt::debug!("axis {}: deceleration={} ramps={}", id, value, axis.use_acceleration());

        Ok(())
    }

    /// Set the inter-step delay bounds.
    ///
    /// Inverted bounds are stored as given; ramp delays then resolve to
    /// `max_delay_us`.
    pub fn set_speed_limits(&mut self, id: usize, min_delay_us: u32, max_delay_us: u32) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.settings.min_delay_us = min_delay_us;
        axis.settings.max_delay_us = max_delay_us;

        #[cfg(feature = "defmt")]
        if min_delay_us > max_delay_us {
            defmt::warn!("axis {}: inverted delay bounds {}..{}", id, min_delay_us, max_delay_us);
        }

        Ok(())
    }

    /// Select the ramp calibration used by subsequent moves.
    pub fn set_profile(&mut self, id: usize, profile: ProfileKind) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.settings.profile = profile;
        Ok(())
    }

    /// Suspend pulses, keeping progress.
    pub fn pause(&mut self, id: usize) -> Result<()> {
        self.registry.get_mut(id)?.paused = true;
        Ok(())
    }

    /// Resume a paused move.
    pub fn resume(&mut self, id: usize) -> Result<()> {
        self.registry.get_mut(id)?.paused = false;
        Ok(())
    }

    /// Abandon the current move or home-seek without reporting it.
    pub fn stop(&mut self, id: usize) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.active = false;
        axis.paused = false;
        axis.homing = false;
        axis.target = axis.position;

        let level = axis.settings.enable_active_level;
        match axis.pins.as_mut() {
            Some(pins) => pins.set_enabled(false, level),
            None => Ok(()),
        }
    }

    /// Redefine the current position.
    ///
    /// An idle axis also takes the new position as its target.
    pub fn set_position(&mut self, id: usize, steps: i64) -> Result<()> {
        let axis = self.registry.get_mut(id)?;
        axis.position = steps;
        if !axis.active {
            axis.target = steps;
        }
        Ok(())
    }

    /// Read switch levels and the motion flag. Changes nothing.
    pub fn query_status(&mut self, id: usize) -> Result<AxisStatus> {
        let axis = wired(&mut self.registry, id)?;
        let level = axis.settings.switch_active_level;
        let position = axis.position;
        let moving = axis.active && !axis.paused;

        let Some(pins) = axis.pins.as_mut() else {
            return Err(AxisError::NotInitialized(id).into());
        };

        Ok(AxisStatus {
            limit_a: pins.limit_triggered(LimitSwitch::A, level)?,
            limit_b: pins.limit_triggered(LimitSwitch::B, level)?,
            home: pins.home_triggered(level)?,
            position,
            moving,
        })
    }

    /// Snapshot of an axis's motion state.
    pub fn axis_state(&self, id: usize) -> Result<AxisSnapshot> {
        Ok(self.registry.get(id)?.snapshot())
    }

    /// True when no axis has an outstanding move.
    pub fn is_idle(&self) -> bool {
        self.registry.iter().all(|axis| !axis.active)
    }

    /// Advance every active axis once, in id order.
    ///
    /// The clock is read once per tick. A pin error on one axis does not
    /// stop the others from being serviced; the first error is returned.
    pub fn tick<S>(&mut self, sink: &mut S) -> Result<()>
    where
        S: EventSink + ?Sized,
    {
        let now = self.clock.now_us();
        let mut first_error = None;

        for (id, axis) in self.registry.iter_mut().enumerate() {
            if let Err(e) = scheduler::service(axis, id, now, &mut self.delay, sink) {
                #[cfg(feature = "defmt")]
                defmt::warn!("axis {}: {}", id, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Apply a decoded command.
    pub fn dispatch(&mut self, command: AxisCommand) -> Result<Response> {
        match command {
            AxisCommand::Move {
                id,
                steps,
                direction,
                delay_us,
            } => self.move_to(id, steps, direction, delay_us).map(|_| Response::Ack),
            AxisCommand::Home { id, delay_us } => self.home(id, delay_us).map(|_| Response::Ack),
            AxisCommand::SetAcceleration { id, value } => {
                self.set_acceleration(id, value).map(|_| Response::Ack)
            }
            AxisCommand::SetDeceleration { id, value } => {
                self.set_deceleration(id, value).map(|_| Response::Ack)
            }
            AxisCommand::SetSpeedLimits {
                id,
                min_delay_us,
                max_delay_us,
            } => self
                .set_speed_limits(id, min_delay_us, max_delay_us)
                .map(|_| Response::Ack),
            AxisCommand::QueryStatus { id } => self.query_status(id).map(Response::Status),
            AxisCommand::Pause { id } => self.pause(id).map(|_| Response::Ack),
            AxisCommand::Resume { id } => self.resume(id).map(|_| Response::Ack),
            AxisCommand::Stop { id } => self.stop(id).map(|_| Response::Ack),
        }
    }
}

/// Look up a slot that has wiring assigned.
fn wired<OUT, IN, const N: usize>(
    registry: &mut AxisRegistry<OUT, IN, N>,
    id: usize,
) -> Result<&mut Axis<OUT, IN>> {
    let axis = registry.get_mut(id)?;
    if axis.is_wired() {
        Ok(axis)
    } else {
        Err(AxisError::NotInitialized(id).into())
    }
}
