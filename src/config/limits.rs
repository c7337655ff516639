//! Travel window configuration and types.

use serde::Deserialize;

/// Policy for handling move targets outside the travel window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Store the window but never act on it.
    #[default]
    Ignore,
    /// Reject moves that would leave the window.
    Reject,
    /// Clamp the target to the nearest window edge.
    ///
    /// An axis already outside the window is never driven against the
    /// commanded direction: moves further out are rejected, and moves back
    /// toward the window that stop short of it run unchanged.
    Clamp,
}

/// Travel window in steps, assigned when an axis is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelLimits {
    /// Minimum position in steps.
    pub min_steps: i64,
    /// Maximum position in steps.
    pub max_steps: i64,
}

/// Outcome of checking a move target against the travel window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCheck {
    /// Target may be used as given (or after clamping).
    Accept(i64),
    /// Target violates the window; carries the limit that was crossed.
    Reject(i64),
}

impl TravelLimits {
    /// Create a new travel window.
    pub fn new(min_steps: i64, max_steps: i64) -> Self {
        Self { min_steps, max_steps }
    }

    /// Check if the window is well formed (min <= max).
    pub fn is_valid(&self) -> bool {
        self.min_steps <= self.max_steps
    }

    /// Check if a position is within the window.
    pub fn contains(&self, steps: i64) -> bool {
        steps >= self.min_steps && steps <= self.max_steps
    }

    /// Apply a limit policy to a move from `position` to `target`.
    ///
    /// An inverted window is treated as absent.
    pub fn apply(&self, policy: LimitPolicy, position: i64, target: i64) -> TargetCheck {
        if policy == LimitPolicy::Ignore
            || !self.is_valid()
            || self.contains(target)
            || target == position
        {
            return TargetCheck::Accept(target);
        }

        let limit = if target < self.min_steps {
            self.min_steps
        } else {
            self.max_steps
        };

        if policy == LimitPolicy::Reject {
            return TargetCheck::Reject(limit);
        }

        let reverses = (target > position && limit < position) || (target < position && limit > position);
        let short_of_edge = (position > target && target > limit) || (position < target && target < limit);
        if reverses {
            TargetCheck::Reject(limit)
        } else if short_of_edge {
            TargetCheck::Accept(target)
        } else {
            TargetCheck::Accept(limit)
        }
    }
}
