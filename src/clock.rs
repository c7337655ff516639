//! Monotonic microsecond time source.

/// Something which reports elapsed time in microseconds.
///
/// The counter is free-running and wraps at `u32::MAX` (about 71 minutes);
/// intervals are computed with [`elapsed_us`], which is correct across a
/// single wrap.
pub trait MicrosClock {
    /// Microseconds since a clock-specific reference point.
    fn now_us(&self) -> u32;
}

impl<F> MicrosClock for F
where
    F: Fn() -> u32,
{
    fn now_us(&self) -> u32 {
        self()
    }
}

/// Microseconds from `since` to `now`, tolerating counter wrap.
#[inline]
pub fn elapsed_us(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// A monotonic clock backed by the operating system.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct StdClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl MicrosClock for StdClock {
    fn now_us(&self) -> u32 {
        // Truncation gives the same wrapping counter as a hardware timer.
        self.created_at.elapsed().as_micros() as u32
    }
}
