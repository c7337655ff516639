//! Simulated hardware shared by the integration tests.
//!
//! Pins and the clock are shared cells: the test keeps one handle and the
//! engine owns a clone, so switch levels can be flipped and pulses counted
//! while a move runs.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use axis_motion::{AxisPins, EventSink, MicrosClock, MotionEngine, MotionEvent};
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

/// Output line that records its level and rising edges.
#[derive(Debug, Clone, Default)]
pub struct SimOutput {
    level: Rc<Cell<bool>>,
    rising_edges: Rc<Cell<u32>>,
    fail: Rc<Cell<bool>>,
}

impl SimOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    /// Number of low-to-high transitions (step pulses on a STEP line).
    pub fn rising_edges(&self) -> u32 {
        self.rising_edges.get()
    }

    /// Make every following write fail.
    pub fn fail(&self) {
        self.fail.set(true);
    }
}

impl ErrorType for SimOutput {
    type Error = ErrorKind;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(ErrorKind::Other);
        }
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(ErrorKind::Other);
        }
        if !self.level.get() {
            self.rising_edges.set(self.rising_edges.get() + 1);
        }
        self.level.set(true);
        Ok(())
    }
}

/// Pulled-up switch input: reads high until pressed.
#[derive(Debug, Clone)]
pub struct SimInput {
    level: Rc<Cell<bool>>,
}

impl SimInput {
    pub fn released() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
        }
    }

    /// Close the switch (line pulled low).
    pub fn press(&self) {
        self.level.set(false);
    }

    pub fn release(&self) {
        self.level.set(true);
    }
}

impl ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Manually advanced microsecond counter.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn starting_at(now: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

impl MicrosClock for SimClock {
    fn now_us(&self) -> u32 {
        self.now.get()
    }
}

/// Every line of one simulated axis.
#[derive(Debug, Clone)]
pub struct Rig {
    pub step: SimOutput,
    pub dir: SimOutput,
    pub enable: SimOutput,
    pub limit_a: SimInput,
    pub limit_b: SimInput,
    pub home: SimInput,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            step: SimOutput::new(),
            dir: SimOutput::new(),
            enable: SimOutput::new(),
            limit_a: SimInput::released(),
            limit_b: SimInput::released(),
            home: SimInput::released(),
        }
    }

    /// Wiring handed to the engine; shares state with this rig.
    pub fn pins(&self) -> AxisPins<SimOutput, SimInput> {
        AxisPins::new(
            self.step.clone(),
            self.dir.clone(),
            self.limit_a.clone(),
            self.limit_b.clone(),
            self.home.clone(),
        )
        .with_enable(self.enable.clone())
    }
}

pub type Engine<const N: usize> = MotionEngine<SimOutput, SimInput, NoopDelay, SimClock, N>;

/// Collects every event in order.
#[derive(Debug, Default)]
pub struct Recorder(pub Vec<MotionEvent>);

impl EventSink for Recorder {
    fn emit(&mut self, event: MotionEvent) {
        self.0.push(event);
    }
}

/// Engine with default settings and one rig wired to every slot.
pub fn engine<const N: usize>(clock: &SimClock) -> (Engine<N>, Vec<Rig>) {
    let mut engine = Engine::<N>::with_defaults(NoopDelay::new(), clock.clone());
    let rigs: Vec<Rig> = (0..N).map(|_| Rig::new()).collect();
    for (id, rig) in rigs.iter().enumerate() {
        engine
            .init_axis(id, rig.pins(), axis_motion::TravelLimits::default())
            .map_err(|(_, e)| e)
            .unwrap();
    }
    (engine, rigs)
}

/// Advance the clock by `dt_us` and tick, until idle or `max_ticks`.
///
/// Returns the number of ticks run.
pub fn run_until_idle<const N: usize>(
    engine: &mut Engine<N>,
    clock: &SimClock,
    sink: &mut Recorder,
    dt_us: u32,
    max_ticks: u32,
) -> u32 {
    let mut ticks = 0;
    while !engine.is_idle() && ticks < max_ticks {
        clock.advance(dt_us);
        engine.tick(sink).unwrap();
        ticks += 1;
    }
    ticks
}

/// Advance the clock by `dt_us` and tick, `count` times.
pub fn run_ticks<const N: usize>(
    engine: &mut Engine<N>,
    clock: &SimClock,
    sink: &mut Recorder,
    dt_us: u32,
    count: u32,
) {
    for _ in 0..count {
        clock.advance(dt_us);
        engine.tick(sink).unwrap();
    }
}
