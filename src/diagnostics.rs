//! Sampled stepper trace.
//!
//! [`StepTrace`] is handed to [`Stepper::advance`](crate::drivers::stepper::Stepper::advance)
//! as its step observer.  It counts steps and yields one
//! [`AppEvent::StepTrace`] per `every` steps, so the log shows motion
//! progress without a line per micro-step.

use crate::app::events::AppEvent;
use crate::drivers::stepper::angle_degrees;

pub struct StepTrace {
    every: u32,
    count: u32,
}

impl StepTrace {
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    /// Count one step landing at `step`.
    pub fn record(&mut self, step: i64) -> Option<AppEvent> {
        self.count += 1;
        if self.count < self.every {
            return None;
        }
        self.count = 0;
        Some(AppEvent::StepTrace {
            step,
            angle: angle_degrees(step),
        })
    }
}
