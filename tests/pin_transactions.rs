//! Exact pin-level behaviour checked against embedded-hal-mock expectations.

mod common;

use axis_motion::{AxisPins, Direction, LimitSwitch, MotionEngine, MotionEvent, TravelLimits};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

use common::{Recorder, SimClock};

type MockEngine = MotionEngine<PinMock, PinMock, NoopDelay, SimClock, 1>;

struct MockAxis {
    step: PinMock,
    dir: PinMock,
    enable: PinMock,
    limit_a: PinMock,
    limit_b: PinMock,
    home: PinMock,
}

impl MockAxis {
    fn new(
        step: &[PinTransaction],
        dir: &[PinTransaction],
        enable: &[PinTransaction],
        limit_a: &[PinTransaction],
        limit_b: &[PinTransaction],
        home: &[PinTransaction],
    ) -> Self {
        Self {
            step: PinMock::new(step),
            dir: PinMock::new(dir),
            enable: PinMock::new(enable),
            limit_a: PinMock::new(limit_a),
            limit_b: PinMock::new(limit_b),
            home: PinMock::new(home),
        }
    }

    fn pins(&self) -> AxisPins<PinMock, PinMock> {
        AxisPins::new(
            self.step.clone(),
            self.dir.clone(),
            self.limit_a.clone(),
            self.limit_b.clone(),
            self.home.clone(),
        )
        .with_enable(self.enable.clone())
    }

    fn done(mut self) {
        self.step.done();
        self.dir.done();
        self.enable.done();
        self.limit_a.done();
        self.limit_b.done();
        self.home.done();
    }
}

fn wired(axis: &MockAxis, clock: &SimClock) -> MockEngine {
    let mut engine = MockEngine::with_defaults(NoopDelay::new(), clock.clone());
    engine
        .init_axis(0, axis.pins(), TravelLimits::default())
        .map_err(|(_, e)| e)
        .unwrap();
    engine
}

#[test]
fn two_step_move_pin_sequence() {
    let axis = MockAxis::new(
        &[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
        ],
        &[PinTransaction::set(State::High)],
        &[
            // released at init, energized for the move, released on completion
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ],
        &[PinTransaction::get(State::High), PinTransaction::get(State::High)],
        &[],
        &[],
    );
    let clock = SimClock::default();
    let mut engine = wired(&axis, &clock);
    let mut sink = Recorder::default();

    engine.move_to(0, 2, Direction::Forward, 100).unwrap();

    clock.advance(100);
    engine.tick(&mut sink).unwrap();
    clock.advance(100);
    engine.tick(&mut sink).unwrap();

    assert_eq!(sink.0, vec![MotionEvent::MoveComplete { axis: 0, position: 2 }]);

    drop(engine);
    axis.done();
}

#[test]
fn tripped_limit_releases_driver_without_stepping() {
    let axis = MockAxis::new(
        &[],
        &[PinTransaction::set(State::Low)],
        &[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ],
        &[],
        &[PinTransaction::get(State::Low)],
        &[],
    );
    let clock = SimClock::default();
    let mut engine = wired(&axis, &clock);
    let mut sink = Recorder::default();

    engine.move_to(0, 10, Direction::Backward, 100).unwrap();
    clock.advance(100);
    engine.tick(&mut sink).unwrap();

    // Idle afterwards: no further pin traffic.
    clock.advance(100);
    engine.tick(&mut sink).unwrap();

    assert_eq!(
        sink.0,
        vec![MotionEvent::LimitHit {
            axis: 0,
            limit: LimitSwitch::B,
            position: 0,
        }]
    );

    drop(engine);
    axis.done();
}

#[test]
fn homing_reads_home_switch_after_each_pulse() {
    let axis = MockAxis::new(
        &[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
        ],
        &[PinTransaction::set(State::Low)],
        &[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ],
        &[],
        &[],
        &[PinTransaction::get(State::High), PinTransaction::get(State::Low)],
    );
    let clock = SimClock::default();
    let mut engine = wired(&axis, &clock);
    let mut sink = Recorder::default();

    engine.home(0, Some(500)).unwrap();
    clock.advance(500);
    engine.tick(&mut sink).unwrap();
    clock.advance(500);
    engine.tick(&mut sink).unwrap();

    assert_eq!(sink.0, vec![MotionEvent::MoveComplete { axis: 0, position: 0 }]);

    drop(engine);
    axis.done();
}

#[test]
fn status_query_reads_each_switch_once() {
    let axis = MockAxis::new(
        &[],
        &[],
        &[PinTransaction::set(State::High)],
        &[PinTransaction::get(State::High)],
        &[PinTransaction::get(State::Low)],
        &[PinTransaction::get(State::High)],
    );
    let clock = SimClock::default();
    let mut engine = wired(&axis, &clock);

    let status = engine.query_status(0).unwrap();
    assert!(!status.limit_a);
    assert!(status.limit_b);
    assert!(!status.home);
    assert!(!status.moving);

    drop(engine);
    axis.done();
}
