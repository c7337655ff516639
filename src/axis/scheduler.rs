//! Per-tick advance of a single axis.
//!
//! Never blocks beyond the step pulse width: whether an axis is due for a
//! step is an elapsed-time comparison against the shared tick timestamp.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::elapsed_us;
use crate::error::Result;
use crate::event::{EventSink, MotionEvent};

use super::interlock;
use super::state::Axis;

/// Offer one axis the chance to step at time `now`.
///
/// A pin error aborts the rest of this axis's tick; state already updated
/// (for example the position after a completed pulse) is kept.
pub(crate) fn service<OUT, IN, D, S>(
    axis: &mut Axis<OUT, IN>,
    id: usize,
    now: u32,
    delay: &mut D,
    sink: &mut S,
) -> Result<()>
where
    OUT: OutputPin,
    IN: InputPin,
    D: DelayNs,
    S: EventSink + ?Sized,
{
    if !axis.active || axis.paused || axis.pins.is_none() {
        return Ok(());
    }

    // Zero-length move: nothing to pulse.
    if !axis.homing && axis.position == axis.target {
        return complete(axis, id, sink);
    }

    if !axis.homing {
        if let Some(limit) = interlock::check(axis)? {
            return interlock::trip(axis, id, limit, sink);
        }
    }

    let step_delay = axis.step_delay_us();
    if elapsed_us(now, axis.last_step_us) < step_delay {
        return Ok(());
    }

    let width = axis.settings.pulse_width_us;
    let switch_level = axis.settings.switch_active_level;
    let Some(pins) = axis.pins.as_mut() else {
        return Ok(());
    };

    pins.pulse(delay, width)?;
    axis.position = axis.position.saturating_add(axis.direction.sign());
    axis.last_step_us = now;

    if axis.homing {
        if pins.home_triggered(switch_level)? {
            axis.homing = false;
            axis.position = 0;
            return complete(axis, id, sink);
        }
        return Ok(());
    }

    if axis.use_acceleration() {
        let ramp = axis.ramp_inputs();
        let profile = axis.settings.profile;
        axis.executor.advance(&profile, &ramp);
    }

    if axis.position == axis.target {
        return complete(axis, id, sink);
    }

    Ok(())
}

/// Deactivate, release the driver and report completion.
fn complete<OUT, IN, S>(axis: &mut Axis<OUT, IN>, id: usize, sink: &mut S) -> Result<()>
where
    OUT: OutputPin,
    IN: InputPin,
    S: EventSink + ?Sized,
{
    axis.active = false;

    let level = axis.settings.enable_active_level;
    let released = match axis.pins.as_mut() {
        Some(pins) => pins.set_enabled(false, level),
        None => Ok(()),
    };

    #[cfg(feature = "defmt")]
    defmt::info!("axis {}: move complete at {}", id, axis.position);

    sink.emit(MotionEvent::MoveComplete {
        axis: id,
        position: axis.position,
    });

    released
}
