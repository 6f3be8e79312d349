//! Status refresh cadence, panel contents and climate retention.

use super::mock_hw::Rig;

use turntable::app::events::AppEvent;
use turntable::error::SensorError;
use turntable::sensors::climate::ClimateReading;
use turntable::status::StatusSnapshot;

fn statuses(rig: &Rig) -> Vec<StatusSnapshot> {
    rig.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Status(s) => Some(*s),
            _ => None,
        })
        .collect()
}

fn reading(temperature_c: f32, humidity_pct: f32) -> ClimateReading {
    ClimateReading {
        temperature_c,
        humidity_pct,
    }
}

#[test]
fn status_refreshes_twice_a_second() {
    let mut rig = Rig::new(300);
    rig.run(0, 5001);
    assert_eq!(statuses(&rig).len(), 10);
    assert_eq!(rig.display.frames.len(), 10);
}

#[test]
fn first_frame_shows_boot_values() {
    let mut rig = Rig::new(300);
    rig.run(0, 501);
    assert_eq!(
        rig.display.frames[0],
        ["Temp: 22.0 C", "Hum: 50 %", "Soil: 300", "Pump: OFF", "Step: 99", "Ang: 8.7"]
    );
}

#[test]
fn panel_follows_pump_state() {
    let mut rig = Rig::new(500);
    rig.run(0, 5501);
    let last = rig.display.frames.last().unwrap();
    assert_eq!(last[3], "Pump: ON");
}

#[test]
fn invalid_climate_samples_keep_last_good_values() {
    let mut rig = Rig::new(300);
    rig.hw.climate.push_back(Ok(reading(24.5, 40.0)));
    rig.hw.climate.push_back(Ok(reading(f32::NAN, 55.0)));
    rig.hw.climate.push_back(Err(SensorError::Checksum));
    rig.run(0, 3600);

    let all = statuses(&rig);
    assert_eq!(all[0].temperature_c, 22.0);
    assert_eq!(all[0].humidity_pct, 50.0);
    let last = all.last().unwrap();
    assert_eq!(last.temperature_c, 24.5);
    assert_eq!(last.humidity_pct, 40.0);

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ClimateOnline(_))), 1);
}

#[test]
fn stale_climate_reported_once_per_outage() {
    let mut rig = Rig::new(300);
    rig.hw.climate.push_back(Ok(reading(24.5, 40.0)));
    rig.run(0, 12_000);

    let stale: Vec<&AppEvent> = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ClimateStale { .. }))
        .collect();
    assert_eq!(stale, [&AppEvent::ClimateStale {
            failures: 5,
            online: true,
        }]);
    assert_eq!(statuses(&rig).last().unwrap().temperature_c, 24.5);
}
