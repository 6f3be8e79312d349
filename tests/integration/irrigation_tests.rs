//! Soil moisture → pump pipeline through the full service tick.
//!
//! Timings follow the default configuration: 10 ms moisture sampling,
//! 1 s stability windows, 3 s minimum run, 5 s minimum rest, 10 s ceiling,
//! soft start in steps of 10 every 20 ms.

use super::mock_hw::Rig;

use turntable::app::events::AppEvent;
use turntable::control::pump::{PumpOffReason, PumpSwitch};

fn pump_events(rig: &Rig) -> Vec<PumpSwitch> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Pump(s) => Some(*s),
            _ => None,
        })
        .collect()
}

#[test]
fn dry_soil_starts_pump_once_rest_window_has_passed() {
    let mut rig = Rig::new(500);
    rig.run(0, 5000);
    assert!(!rig.app.pump_on(), "pump must rest 5 s after boot");

    rig.tick(5000);
    assert!(rig.app.pump_on());
    assert_eq!(pump_events(&rig), [PumpSwitch::On]);
}

#[test]
fn soft_start_ramps_to_full_drive() {
    let mut rig = Rig::new(500);
    rig.run(0, 5000);
    let before = rig.hw.pump_levels().len();

    rig.run(5000, 5520);
    assert_eq!(rig.hw.pump_level(), 250);
    rig.tick(5520);
    assert_eq!(rig.hw.pump_level(), 255);

    let ramp: Vec<u8> = rig.hw.pump_levels()[before..].to_vec();
    let mut expected: Vec<u8> = (0..=25).map(|i| i * 10).collect();
    expected.push(255);
    assert_eq!(ramp, expected);

    // Nothing further once at full drive.
    rig.run(5521, 6000);
    assert_eq!(rig.hw.pump_levels().len(), before + expected.len());
}

#[test]
fn wet_soil_stops_pump_after_minimum_run() {
    let mut rig = Rig::new(500);
    rig.run(0, 6000);
    assert!(rig.app.pump_on());

    rig.hw.moisture = 100;
    rig.run(6000, 8000);
    assert!(rig.app.pump_on(), "minimum run time is 3 s");

    rig.tick(8000);
    assert!(!rig.app.pump_on());
    assert_eq!(rig.hw.pump_level(), 0);
    assert_eq!(
        pump_events(&rig),
        [PumpSwitch::On, PumpSwitch::Off(PumpOffReason::SoilWet)]
    );
}

#[test]
fn ceiling_cuts_pump_even_when_still_dry() {
    let mut rig = Rig::new(700);
    rig.run(0, 15_000);
    assert!(rig.app.pump_on());

    rig.tick(15_000);
    assert!(!rig.app.pump_on());
    assert_eq!(
        pump_events(&rig).last(),
        Some(&PumpSwitch::Off(PumpOffReason::SafetyCeiling))
    );

    rig.run(15_001, 20_000);
    assert!(!rig.app.pump_on(), "rest window applies after a ceiling cut");
    rig.tick(20_000);
    assert!(rig.app.pump_on());
}

#[test]
fn dead_band_never_waters() {
    let mut rig = Rig::new(300);
    rig.run(0, 30_000);
    assert!(pump_events(&rig).is_empty());
    assert!(rig.hw.pump_levels().iter().all(|&l| l == 0));
}

#[test]
fn brief_dry_spike_is_ignored() {
    let mut rig = Rig::new(300);
    rig.run(0, 6000);
    // Enough to push the average over the threshold, not long enough to
    // hold there for a full second.
    rig.hw.moisture = 1023;
    rig.run(6000, 6300);
    rig.hw.moisture = 0;
    rig.run(6300, 12_000);
    assert!(pump_events(&rig).is_empty());
}
