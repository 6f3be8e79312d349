//! Step trace sampling through the full service tick.

use super::mock_hw::Rig;

use turntable::app::events::AppEvent;
use turntable::drivers::stepper::angle_degrees;

fn traces(rig: &Rig) -> Vec<(i64, f32)> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StepTrace { step, angle } => Some((*step, *angle)),
            _ => None,
        })
        .collect()
}

#[test]
fn free_rotation_traces_every_hundred_steps() {
    let mut rig = Rig::new(300);
    // Steps land at 5, 10, ... 1000 ms.
    rig.run(0, 1001);
    let steps: Vec<i64> = traces(&rig).iter().map(|(s, _)| *s).collect();
    assert_eq!(steps, [100, 200]);
    for (step, angle) in traces(&rig) {
        assert!((angle - angle_degrees(step)).abs() < 1e-4);
    }
}

#[test]
fn no_trace_before_the_hundredth_step() {
    let mut rig = Rig::new(300);
    rig.run(0, 500);
    assert!(traces(&rig).is_empty());
    rig.tick(500);
    assert_eq!(traces(&rig).first().map(|(s, _)| *s), Some(100));
}

#[test]
fn latched_table_stops_tracing() {
    let mut rig = Rig::new(300);
    rig.run(0, 600);
    rig.hw.stop = true;
    rig.tick(600);
    rig.hw.stop = false;
    rig.run(601, 3000);
    assert_eq!(traces(&rig).len(), 1);
}
