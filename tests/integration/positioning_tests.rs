//! Mark button → motion FSM → stepper, through the full service tick.
//!
//! The table advances one micro-step every 5 ms while turning, so after
//! `t` ms of free rotation from boot the position is `(t - 1) / 5`.

use super::mock_hw::Rig;

use turntable::app::events::AppEvent;
use turntable::fsm::StateId;
use turntable::fsm::context::{Mark, MotionNotice};

fn notices(rig: &Rig) -> Vec<MotionNotice> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Motion(n) => Some(*n),
            _ => None,
        })
        .collect()
}

fn reached(rig: &Rig) -> Vec<Mark> {
    notices(rig)
        .into_iter()
        .filter_map(|n| match n {
            MotionNotice::TargetReached { mark, .. } => Some(mark),
            _ => None,
        })
        .collect()
}

/// Marks at 0 ms, a rejected press at 5 s, the accepted one at 11 s.
fn marked() -> Rig {
    let mut rig = Rig::new(300);
    rig.press_mark(0);
    rig.run(1, 5000);
    rig.press_mark(5000);
    rig.run(5001, 11_000);
    rig.press_mark(11_000);
    rig
}

#[test]
fn early_second_press_is_ignored() {
    let mut rig = Rig::new(300);
    rig.press_mark(0);
    rig.run(1, 5000);
    rig.press_mark(5000);
    assert_eq!(rig.app.state(), StateId::WaitingForSecondMark);
    assert_eq!(rig.app.marks().position2, None);
}

#[test]
fn two_marks_start_oscillation() {
    let rig = marked();
    assert_eq!(rig.app.state(), StateId::Oscillating);
    assert_eq!(rig.app.marks().position1, Some(0));
    assert_eq!(rig.app.marks().position2, Some(2199));

    let n = notices(&rig);
    assert!(n.contains(&MotionNotice::MarkSet { mark: Mark::First, step: 0 }));
    assert!(n.contains(&MotionNotice::MarkSet { mark: Mark::Second, step: 2199 }));
    assert!(n.contains(&MotionNotice::OscillationStarted { from: 0, to: 2199 }));
}

#[test]
fn table_keeps_turning_while_waiting() {
    let mut rig = Rig::new(300);
    rig.press_mark(0);
    rig.run(1, 3001);
    assert_eq!(rig.app.position(), 600);
}

#[test]
fn waiting_counts_down_whole_seconds() {
    let rig = marked();
    let countdown: Vec<u64> = notices(&rig)
        .into_iter()
        .filter_map(|n| match n {
            MotionNotice::WaitingForSecondMark { secs_left } => Some(secs_left),
            _ => None,
        })
        .collect();
    assert_eq!(countdown, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn sweep_alternates_between_marks_and_stays_inside() {
    let mut rig = marked();
    let mut lowest = i64::MAX;
    let mut highest = i64::MIN;
    for now in 11_001..36_000 {
        rig.tick(now);
        lowest = lowest.min(rig.app.position());
        highest = highest.max(rig.app.position());
    }
    assert_eq!(lowest, 0);
    assert_eq!(highest, 2199);
    assert_eq!(reached(&rig), [Mark::Second, Mark::First, Mark::Second]);
}

#[test]
fn turnaround_dwells_before_reversing() {
    let mut rig = marked();
    // Position 2 is reached on the first oscillating tick.
    rig.run(11_001, 11_500);
    assert_eq!(rig.app.position(), 2199);
    rig.run(11_500, 11_520);
    assert!(rig.app.position() < 2199);
}

#[test]
fn presses_during_oscillation_change_nothing() {
    let mut rig = marked();
    rig.run(11_001, 12_000);
    rig.press_mark(12_000);
    assert_eq!(rig.app.state(), StateId::Oscillating);
    assert_eq!(rig.app.marks().position1, Some(0));
    assert_eq!(rig.app.marks().position2, Some(2199));
}
