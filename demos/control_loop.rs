//! Control loop example.
//!
//! Runs two axes concurrently from one cooperative loop: a ramped move on
//! axis 0 and a home-seek on axis 1, with simulated pins and the host clock.
//! The home switch closes after a fixed number of pulses.

use std::cell::Cell;
use std::rc::Rc;

use axis_motion::{
    AxisPins, ControlLoop, Direction, EventSink, MotionEngine, MotionEvent, StdClock, TravelLimits,
};

/// Delay provider backed by the host scheduler.
struct HostDelay;

impl embedded_hal::delay::DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that counts step pulses.
#[derive(Clone, Default)]
struct DemoOutput {
    pulses: Rc<Cell<u32>>,
}

impl embedded_hal::digital::ErrorType for DemoOutput {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for DemoOutput {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pulses.set(self.pulses.get() + 1);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Pulled-up switch that closes once `trip_after` pulses have been seen.
#[derive(Clone)]
struct DemoSwitch {
    pulses: Rc<Cell<u32>>,
    trip_after: Option<u32>,
}

impl embedded_hal::digital::ErrorType for DemoSwitch {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for DemoSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let closed = self
            .trip_after
            .map_or(false, |after| self.pulses.get() >= after);
        Ok(!closed)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

fn wiring(home_after: Option<u32>) -> AxisPins<DemoOutput, DemoSwitch> {
    let step = DemoOutput::default();
    let open = DemoSwitch {
        pulses: step.pulses.clone(),
        trip_after: None,
    };
    let home = DemoSwitch {
        pulses: step.pulses.clone(),
        trip_after: home_after,
    };
    AxisPins::new(step, DemoOutput::default(), open.clone(), open, home)
        .with_enable(DemoOutput::default())
}

struct PrintSink;

impl EventSink for PrintSink {
    fn emit(&mut self, event: MotionEvent) {
        match event {
            MotionEvent::MoveComplete { axis, position } => {
                println!("{{\"event\":\"{}\",\"id\":{},\"position\":{}}}", event.name(), axis, position)
            }
            MotionEvent::LimitHit {
                axis,
                limit,
                position,
            } => println!(
                "{{\"event\":\"{}\",\"id\":{},\"limit\":\"{}\",\"position\":{}}}",
                event.name(),
                axis,
                limit.as_str(),
                position
            ),
        }
    }
}

fn main() -> axis_motion::Result<()> {
    println!("=== Control Loop Example ===\n");

    let mut engine: MotionEngine<_, _, _, _, 2> = MotionEngine::with_defaults(HostDelay, StdClock::new());
    let mut control = ControlLoop::new(50);

    engine
        .init_axis(0, wiring(None), TravelLimits::new(-10_000, 10_000))
        .map_err(|(_, e)| e)?;
    engine
        .init_axis(1, wiring(Some(150)), TravelLimits::default())
        .map_err(|(_, e)| e)?;

    engine.set_acceleration(0, 200)?;
    engine.set_deceleration(0, 100)?;
    engine.move_to(0, 1000, Direction::Forward, 500)?;
    engine.home(1, Some(800))?;

    let state = engine.axis_state(0)?;
    println!(
        "axis 0: {} steps, ramp up {} / ramp down {}",
        state.total_steps, state.accel_steps, state.decel_steps
    );

    let iterations = control.run_until_idle(&mut engine, &mut PrintSink, 1_000_000)?;

    let stats = control.stats();
    println!("\nIterations: {}", iterations);
    println!(
        "Tick time: min {} us, max {} us",
        stats.min_tick_us, stats.max_tick_us
    );
    println!("Axis 0 position: {}", engine.axis_state(0)?.position);
    println!("Axis 1 position: {}", engine.axis_state(1)?.position);

    Ok(())
}
