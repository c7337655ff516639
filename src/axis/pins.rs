//! Axis wiring.
//!
//! Generic over embedded-hal 1.0 pin types. All outputs of an axis share
//! one type and all inputs another, so every slot of a registry holds the
//! same wiring type (type-erased HAL pins in practice).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::ActiveLevel;
use crate::error::{AxisError, Result};
use crate::event::LimitSwitch;
use crate::motion::Direction;

/// Lines assigned to one axis.
#[derive(Debug)]
pub struct AxisPins<OUT, IN> {
    /// STEP pin (pulse to move one step).
    pub step: OUT,
    /// DIR pin (high = forward unless inverted).
    pub dir: OUT,
    /// Optional driver enable pin.
    pub enable: Option<OUT>,
    /// Forward-travel limit switch.
    pub limit_a: IN,
    /// Backward-travel limit switch.
    pub limit_b: IN,
    /// Home switch.
    pub home: IN,
}

impl<OUT, IN> AxisPins<OUT, IN>
where
    OUT: OutputPin,
    IN: InputPin,
{
    /// Wiring without an enable line.
    pub fn new(step: OUT, dir: OUT, limit_a: IN, limit_b: IN, home: IN) -> Self {
        Self {
            step,
            dir,
            enable: None,
            limit_a,
            limit_b,
            home,
        }
    }

    /// Add a driver enable line.
    pub fn with_enable(mut self, enable: OUT) -> Self {
        self.enable = Some(enable);
        self
    }

    /// Emit one step pulse: assert, hold `width_us`, deassert.
    pub(crate) fn pulse<D: DelayNs>(&mut self, delay: &mut D, width_us: u32) -> Result<()> {
        self.step.set_high().map_err(|_| AxisError::PinError)?;
        delay.delay_us(width_us);
        self.step.set_low().map_err(|_| AxisError::PinError)?;
        Ok(())
    }

    pub(crate) fn set_direction(&mut self, direction: Direction, invert: bool) -> Result<()> {
        let high = match direction {
            Direction::Forward => !invert,
            Direction::Backward => invert,
        };
        write(&mut self.dir, high)
    }

    /// Energize or release the driver; no-op without an enable line.
    pub(crate) fn set_enabled(&mut self, enabled: bool, level: ActiveLevel) -> Result<()> {
        match self.enable.as_mut() {
            Some(pin) => write(pin, level.level_for(enabled)),
            None => Ok(()),
        }
    }

    pub(crate) fn limit_triggered(&mut self, limit: LimitSwitch, level: ActiveLevel) -> Result<bool> {
        let pin = match limit {
            LimitSwitch::A => &mut self.limit_a,
            LimitSwitch::B => &mut self.limit_b,
        };
        read(pin, level)
    }

    pub(crate) fn home_triggered(&mut self, level: ActiveLevel) -> Result<bool> {
        read(&mut self.home, level)
    }
}

fn write<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    if high {
        pin.set_high().map_err(|_| AxisError::PinError)?;
    } else {
        pin.set_low().map_err(|_| AxisError::PinError)?;
    }
    Ok(())
}

fn read<P: InputPin>(pin: &mut P, level: ActiveLevel) -> Result<bool> {
    let high = pin.is_high().map_err(|_| AxisError::PinError)?;
    Ok(level.is_active(high))
}
