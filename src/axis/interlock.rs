//! Limit-switch interlock.
//!
//! Polled once per tick before a non-homing axis may step. Only the switch
//! guarding the current travel direction is read, so an axis parked on a
//! limit can always be driven back off it.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::Result;
use crate::event::{EventSink, LimitSwitch, MotionEvent};
use crate::motion::Direction;

use super::state::Axis;

/// Switch guarding travel in `direction`.
#[inline]
pub fn limit_for(direction: Direction) -> LimitSwitch {
    match direction {
        Direction::Forward => LimitSwitch::A,
        Direction::Backward => LimitSwitch::B,
    }
}

/// Read the guarding switch of a wired axis.
///
/// Returns the switch if it reads triggered.
pub(crate) fn check<OUT, IN>(axis: &mut Axis<OUT, IN>) -> Result<Option<LimitSwitch>>
where
    OUT: OutputPin,
    IN: InputPin,
{
    let limit = limit_for(axis.direction);
    let level = axis.settings.switch_active_level;
    match axis.pins.as_mut() {
        Some(pins) => Ok(pins.limit_triggered(limit, level)?.then_some(limit)),
        None => Ok(None),
    }
}

/// Abandon the move and report it.
///
/// The axis is left idle even if releasing the enable line fails; the
/// event is emitted first and the pin error returned afterwards.
pub(crate) fn trip<OUT, IN, S>(
    axis: &mut Axis<OUT, IN>,
    id: usize,
    limit: LimitSwitch,
    sink: &mut S,
) -> Result<()>
where
    OUT: OutputPin,
    IN: InputPin,
    S: EventSink + ?Sized,
{
    axis.active = false;
    axis.homing = false;

    let level = axis.settings.enable_active_level;
    let released = match axis.pins.as_mut() {
        Some(pins) => pins.set_enabled(false, level),
        None => Ok(()),
    };

    #[cfg(feature = "defmt")]
    defmt::warn!("axis {}: {} hit at {}", id, limit.as_str(), axis.position);

    sink.emit(MotionEvent::LimitHit {
        axis: id,
        limit,
        position: axis.position,
    });

    released
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_travel_guarded_by_switch_a() {
        assert_eq!(limit_for(Direction::Forward), LimitSwitch::A);
        assert_eq!(limit_for(Direction::Backward), LimitSwitch::B);
    }
}
