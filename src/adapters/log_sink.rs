//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (UART / USB-CDC on the device).  The status block keeps the
//! `Temp:` / `Humidity:` / `Pot:` / `Servo:` / `Motor:` line format the
//! desktop plotter parses, one key per line.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::pump::{PumpOffReason, PumpSwitch};
use crate::drivers::stepper::angle_degrees;
use crate::fsm::context::MotionNotice;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::ClimateOnline(r) => {
                info!(
                    "DHT11 initialized. ({:.1} C, {:.0} %)",
                    r.temperature_c, r.humidity_pct
                );
            }
            AppEvent::ClimateStale {
                failures,
                online: true,
            } => {
                warn!("DHT11: {} failed reads in a row, showing last good values", failures);
            }
            AppEvent::ClimateStale {
                failures,
                online: false,
            } => {
                warn!(
                    "DHT11: {} failed reads in a row, no reading yet, showing defaults",
                    failures
                );
            }
            AppEvent::Pump(PumpSwitch::On) => info!("Pump ON"),
            AppEvent::Pump(PumpSwitch::Off(PumpOffReason::SoilWet)) => info!("Pump OFF"),
            AppEvent::Pump(PumpSwitch::Off(PumpOffReason::SafetyCeiling)) => {
                warn!("Pump OFF (safety)");
            }
            AppEvent::Pump(PumpSwitch::Off(PumpOffReason::StopLatch)) => {
                info!("Pump OFF (stop)");
            }
            AppEvent::Status(snapshot) => {
                for line in snapshot.plot_lines() {
                    info!("{}", line);
                }
            }
            AppEvent::StepTrace { step, angle } => {
                info!("Current Step: {} | Angle: {:.2}", step, angle);
            }
            AppEvent::Motion(notice) => log_motion(notice),
            AppEvent::StopEngaged => {
                warn!("Stop button pressed!");
                warn!("Stopping system...");
            }
            AppEvent::Halted => {
                warn!("System stopped. Power cycle to restart.");
            }
        }
    }
}

fn log_motion(notice: &MotionNotice) {
    match *notice {
        MotionNotice::MarkSet { mark, step } => {
            info!(
                "Position {} set at Step: {} | Angle: {:.2}",
                mark.number(),
                step,
                angle_degrees(step)
            );
        }
        MotionNotice::WaitingForSecondMark { secs_left } => {
            info!("Waiting... {} seconds left.", secs_left);
        }
        MotionNotice::OscillationStarted { from, to } => {
            info!("Starting oscillation between positions. ({} <-> {})", from, to);
        }
        MotionNotice::TargetReached { mark, .. } => {
            info!("Reached Position {}, reversing direction.", mark.number());
        }
    }
}
