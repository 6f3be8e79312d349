//! Stop button latch: once pressed, nothing moves until power cycle.

use super::mock_hw::Rig;

use turntable::app::events::AppEvent;
use turntable::app::service::TickOutcome;
use turntable::control::pump::{PumpOffReason, PumpSwitch};
use turntable::drivers::stepper::CoilPattern;
use turntable::fsm::StateId;
use turntable::fsm::context::PositionMarks;

#[test]
fn stop_halts_motion_and_pump() {
    let mut rig = Rig::new(600);
    rig.run(0, 6000);
    assert!(rig.app.pump_on());

    rig.hw.stop = true;
    assert_eq!(rig.tick(6000), TickOutcome::Halted);

    assert!(rig.app.is_stopped());
    assert!(!rig.app.pump_on());
    assert_eq!(rig.hw.pump_level(), 0);
    assert_eq!(rig.hw.last_coils(), Some(CoilPattern::RELEASED));
    assert!(rig.sink.events.contains(&AppEvent::StopEngaged));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::Pump(PumpSwitch::Off(PumpOffReason::StopLatch)))
    );
}

#[test]
fn latched_loop_touches_no_hardware() {
    let mut rig = Rig::new(600);
    rig.run(0, 6000);
    rig.hw.stop = true;
    rig.tick(6000);

    let calls = rig.hw.calls.len();
    let position = rig.app.position();
    let events = rig.sink.events.len();

    // Releasing the button or pressing mark changes nothing.
    rig.hw.stop = false;
    rig.hw.mark = true;
    rig.hw.moisture = 1023;
    for now in 6001..20_000 {
        assert_eq!(rig.tick(now), TickOutcome::Halted);
    }

    assert_eq!(rig.hw.calls.len(), calls);
    assert_eq!(rig.app.position(), position);
    // Only the single halt notice follows.
    assert_eq!(rig.sink.events.len(), events + 1);
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::Halted));
}

#[test]
fn stop_while_waiting_forgets_first_mark() {
    let mut rig = Rig::new(300);
    rig.press_mark(0);
    rig.run(1, 2000);
    assert_eq!(rig.app.state(), StateId::WaitingForSecondMark);

    rig.hw.stop = true;
    rig.tick(2000);

    assert_eq!(rig.app.state(), StateId::Idle);
    assert_eq!(rig.app.marks(), PositionMarks::default());
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: StateId::WaitingForSecondMark,
        to: StateId::Idle,
    }));
}

#[test]
fn stop_with_pump_idle_reports_no_pump_switch() {
    let mut rig = Rig::new(300);
    rig.run(0, 1000);
    rig.hw.stop = true;
    rig.tick(1000);
    let switches = rig.sink.count(|e| matches!(e, AppEvent::Pump(_)));
    assert_eq!(switches, 0);
}
