//! Cooperative control loop.
//!
//! One iteration is a scheduler tick followed by a fixed throttle delay.
//! Command intake belongs to the caller, between iterations.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::MotionEngine;
use crate::clock::{elapsed_us, MicrosClock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::event::EventSink;

/// Per-iteration timing, updated in O(1) with no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopStats {
    /// Iterations run.
    pub iterations: u64,
    /// Duration of the last tick [us].
    pub last_tick_us: u32,
    /// Shortest tick [us].
    pub min_tick_us: u32,
    /// Longest tick [us].
    pub max_tick_us: u32,
    /// Ticks that returned an error.
    pub errors: u64,
}

impl LoopStats {
    /// Zeroed stats.
    pub const fn new() -> Self {
        Self {
            iterations: 0,
            last_tick_us: 0,
            min_tick_us: u32::MAX,
            max_tick_us: 0,
            errors: 0,
        }
    }

    /// Record one tick duration.
    #[inline]
    pub fn record(&mut self, tick_us: u32, failed: bool) {
        self.iterations += 1;
        self.last_tick_us = tick_us;
        self.min_tick_us = self.min_tick_us.min(tick_us);
        self.max_tick_us = self.max_tick_us.max(tick_us);
        if failed {
            self.errors += 1;
        }
    }
}

impl Default for LoopStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`MotionEngine`] at a fixed throttle period.
#[derive(Debug, Clone)]
pub struct ControlLoop {
    period_us: u32,
    stats: LoopStats,
}

impl ControlLoop {
    /// Loop with the given throttle delay.
    pub const fn new(period_us: u32) -> Self {
        Self {
            period_us,
            stats: LoopStats::new(),
        }
    }

    /// Loop using `loop_period_us` from the configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.loop_period_us)
    }

    /// Throttle delay.
    #[inline]
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Timing collected so far.
    #[inline]
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// Run one iteration: tick every axis, then wait out the throttle.
    ///
    /// The throttle delay runs even when the tick fails.
    pub fn run_once<OUT, IN, DELAY, CLOCK, S, const N: usize>(
        &mut self,
        engine: &mut MotionEngine<OUT, IN, DELAY, CLOCK, N>,
        sink: &mut S,
    ) -> Result<()>
    where
        OUT: OutputPin,
        IN: InputPin,
        DELAY: DelayNs,
        CLOCK: MicrosClock,
        S: EventSink + ?Sized,
    {
        let start = engine.clock().now_us();
        let result = engine.tick(sink);
        let end = engine.clock().now_us();

        self.stats.record(elapsed_us(end, start), result.is_err());
        engine.delay_mut().delay_us(self.period_us);

        result
    }

    /// Run iterations until no axis is moving or `max_iterations` is reached.
    ///
    /// Returns the number of iterations run. Stops at the first error.
    pub fn run_until_idle<OUT, IN, DELAY, CLOCK, S, const N: usize>(
        &mut self,
        engine: &mut MotionEngine<OUT, IN, DELAY, CLOCK, N>,
        sink: &mut S,
        max_iterations: u32,
    ) -> Result<u32>
    where
        OUT: OutputPin,
        IN: InputPin,
        DELAY: DelayNs,
        CLOCK: MicrosClock,
        S: EventSink + ?Sized,
    {
        let mut iterations = 0;
        while !engine.is_idle() && iterations < max_iterations {
            self.run_once(engine, sink)?;
            iterations += 1;
        }
        Ok(iterations)
    }
}
