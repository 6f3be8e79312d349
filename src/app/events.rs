//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The log adapter turns them
//! into serial lines; tests record them.

use crate::control::pump::PumpSwitch;
use crate::fsm::StateId;
use crate::fsm::context::MotionNotice;
use crate::sensors::climate::ClimateReading;
use crate::status::StatusSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The motion FSM moved between states.
    StateChanged { from: StateId, to: StateId },

    /// First valid climate sample since boot.
    ClimateOnline(ClimateReading),

    /// `failures` consecutive climate samples were rejected.  The shown
    /// values are the last good ones if the sensor was ever `online`, the
    /// boot defaults otherwise.
    ClimateStale { failures: u32, online: bool },

    /// The pump controller switched.
    Pump(PumpSwitch),

    /// Periodic status snapshot.
    Status(StatusSnapshot),

    /// Sampled stepper position.
    StepTrace { step: i64, angle: f32 },

    /// Mark / countdown / sweep progress from the motion FSM.
    Motion(MotionNotice),

    /// The stop input was asserted; everything is being shut down.
    StopEngaged,

    /// First tick after the latch: the loop is frozen until power cycle.
    Halted,
}
