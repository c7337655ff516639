//! Events reported by the motion scheduler.

/// Which of an axis's two limit switches tripped.
///
/// Switch A guards forward travel, switch B backward travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitSwitch {
    /// Forward-travel limit.
    A,
    /// Backward-travel limit.
    B,
}

impl LimitSwitch {
    /// Wire name of the switch.
    pub fn as_str(self) -> &'static str {
        match self {
            LimitSwitch::A => "limit_a",
            LimitSwitch::B => "limit_b",
        }
    }
}

/// One occurrence reported toward the command dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionEvent {
    /// A move reached its target, or a home-seek found the home switch.
    MoveComplete {
        /// Axis id.
        axis: usize,
        /// Position after completion (0 after homing).
        position: i64,
    },
    /// A limit switch aborted a move.
    LimitHit {
        /// Axis id.
        axis: usize,
        /// Switch that tripped.
        limit: LimitSwitch,
        /// Position after the last completed step.
        position: i64,
    },
}

impl MotionEvent {
    /// Axis the event belongs to.
    pub fn axis(&self) -> usize {
        match *self {
            MotionEvent::MoveComplete { axis, .. } | MotionEvent::LimitHit { axis, .. } => axis,
        }
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            MotionEvent::MoveComplete { .. } => "stepper_done",
            MotionEvent::LimitHit { .. } => "limit_hit",
        }
    }
}

/// Consumer of [`MotionEvent`]s.
pub trait EventSink {
    /// Accept one event.
    fn emit(&mut self, event: MotionEvent);
}

/// Events beyond the vector's capacity are dropped.
impl<const N: usize> EventSink for heapless::Vec<MotionEvent, N> {
    fn emit(&mut self, event: MotionEvent) {
        let _ = self.push(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(MotionEvent),
{
    fn emit(&mut self, event: MotionEvent) {
        (self.0)(event)
    }
}
