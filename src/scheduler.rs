//! Cadence table for the cooperative tick dispatcher.
//!
//! Every periodic unit of work in the control loop has one slot here.
//! The service polls each slot on every tick and a due slot is rescheduled
//! from the moment it fired, so subsystems interleave at their own rates
//! whatever the loop iteration rate is.
//!
//! ```text
//!   tick(now) ──▶ Climate   (1 s)    sample temperature / humidity
//!             ──▶ Moisture  (10 ms)  fold one soil reading into the EMA
//!             ──▶ Status    (500 ms) OLED + plotter block
//!             ──▶ Stepper   (5 ms)   at most one micro-step
//! ```
//!
//! All reference points start at 0 ms, so each task first fires one full
//! period after boot.

use crate::clock::{Interval, Millis};
use crate::config::SystemConfig;

// ═══════════════════════════════════════════════════════════════
//  Task identity
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Task {
    Climate = 0,
    Moisture = 1,
    Status = 2,
    Stepper = 3,
}

impl Task {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [Self::Climate, Self::Moisture, Self::Status, Self::Stepper];

    pub fn label(self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Moisture => "moisture",
            Self::Status => "status",
            Self::Stepper => "stepper",
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler {
    slots: [Interval; Task::COUNT],
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        let mut slots = [Interval::new(0); Task::COUNT];
        slots[Task::Climate as usize] = Interval::new(config.climate_interval_ms);
        slots[Task::Moisture as usize] = Interval::new(config.moisture_sample_interval_ms);
        slots[Task::Status as usize] = Interval::new(config.status_interval_ms);
        slots[Task::Stepper as usize] = Interval::new(config.step_interval_ms);
        for task in Task::ALL {
            log::debug!(
                "scheduler: {} every {} ms",
                task.label(),
                slots[task as usize].period_ms()
            );
        }
        Self { slots }
    }

    /// True if `task` is due at `now`; the slot is then rescheduled from `now`.
    pub fn poll(&mut self, task: Task, now: Millis) -> bool {
        self.slots[task as usize].poll(now)
    }

    pub fn period_ms(&self, task: Task) -> Millis {
        self.slots[task as usize].period_ms()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
