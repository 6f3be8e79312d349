//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.  Inputs (buttons,
//! soil reading, climate script) are plain public fields the test flips
//! between ticks.

use std::collections::VecDeque;

use turntable::app::events::AppEvent;
use turntable::app::ports::{ActuatorPort, DisplayPort, EventSink, InputPort, SensorPort};
use turntable::app::service::{AppService, TickOutcome};
use turntable::clock::Millis;
use turntable::config::SystemConfig;
use turntable::drivers::stepper::CoilPattern;
use turntable::error::{DisplayError, SensorError};
use turntable::sensors::climate::ClimateReading;
use turntable::status::StatusLine;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    Coils(CoilPattern),
    PumpForward,
    PumpLevel(u8),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub stop: bool,
    pub mark: bool,
    pub moisture: u16,
    /// Popped one per climate read; empty means the sensor times out.
    pub climate: VecDeque<Result<ClimateReading, SensorError>>,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(moisture: u16) -> Self {
        Self {
            stop: false,
            mark: false,
            moisture,
            climate: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    pub fn pump_level(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::PumpLevel(level) => Some(*level),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn pump_levels(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::PumpLevel(level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn last_coils(&self) -> Option<CoilPattern> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Coils(p) => Some(*p),
            _ => None,
        })
    }
}

impl InputPort for MockHardware {
    fn stop_asserted(&mut self) -> bool {
        self.stop
    }

    fn mark_asserted(&mut self) -> bool {
        self.mark
    }
}

impl SensorPort for MockHardware {
    fn read_moisture(&mut self) -> u16 {
        self.moisture
    }

    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.pop_front().unwrap_or(Err(SensorError::Timeout))
    }
}

impl ActuatorPort for MockHardware {
    fn set_coils(&mut self, pattern: CoilPattern) {
        self.calls.push(ActuatorCall::Coils(pattern));
    }

    fn set_pump_forward(&mut self) {
        self.calls.push(ActuatorCall::PumpForward);
    }

    fn set_pump_level(&mut self, level: u8) {
        self.calls.push(ActuatorCall::PumpLevel(level));
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Vec<String>>,
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, lines: &[StatusLine]) -> Result<(), DisplayError> {
        self.frames
            .push(lines.iter().map(|l| l.as_str().to_owned()).collect());
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started service plus its mocks, driven at 1 ms per tick.
pub struct Rig {
    pub app: AppService,
    pub hw: MockHardware,
    pub display: MockDisplay,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(moisture: u16) -> Self {
        let mut app = AppService::new(&SystemConfig::default());
        let mut hw = MockHardware::new(moisture);
        let mut sink = RecordingSink::default();
        app.start(&mut hw, &mut sink);
        Self {
            app,
            hw,
            display: MockDisplay::default(),
            sink,
        }
    }

    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        self.app
            .tick(now, &mut self.hw, &mut self.display, &mut self.sink)
    }

    /// Tick every millisecond in `from..to`.
    pub fn run(&mut self, from: Millis, to: Millis) {
        for now in from..to {
            self.tick(now);
        }
    }

    /// Hold the mark button for exactly one tick.
    pub fn press_mark(&mut self, now: Millis) {
        self.hw.mark = true;
        self.tick(now);
        self.hw.mark = false;
    }
}
