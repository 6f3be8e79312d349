//! Application service: the hexagonal core.
//!
//! [`AppService`] owns every piece of run-time state (motion FSM, stepper
//! accumulator, moisture filter, pump controller, climate sampler, stop
//! latch) and advances all of it from a single non-blocking [`tick`].
//! All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  InputPort  ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  SensorPort ──▶ │          AppService          │ ──▶ DisplayPort
//! ActuatorPort ◀──│ Latch · Pump · FSM · Stepper │
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Tick order
//!
//! 1. Stop latch: once set, the tick does nothing else.
//! 2. Climate sample (when due).
//! 3. Stop input: latch, release coils, pump off, and end the tick.
//! 4. Moisture sample (when due), pump hysteresis, soft-start ramp.
//! 5. Status refresh (when due).
//! 6. Mark input (outside its lockout window).
//! 7. Motion FSM, then at most one micro-step (when due).
//!
//! Nothing in here sleeps.  The pump ramp, the turnaround dwell, the step
//! cadence and the button lockout are all deadlines checked per tick.
//!
//! [`tick`]: AppService::tick

use log::{debug, info};

use crate::clock::{Debounce, Millis};
use crate::config::SystemConfig;
use crate::control::pump::{PumpController, PumpSwitch};
use crate::diagnostics::StepTrace;
use crate::drivers::pump::SoftStart;
use crate::drivers::stepper::Stepper;
use crate::fsm::context::{MotionCommand, MotionContext, PositionMarks};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::safety::SafetyLatch;
use crate::scheduler::{Scheduler, Task};
use crate::sensors::climate::ClimateSampler;
use crate::sensors::moisture::MoistureFilter;
use crate::status::StatusSnapshot;

use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, InputPort, SensorPort};

/// What the caller should do before the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking at the loop rate.
    Running,
    /// Latched off; idle in long slices.
    Halted,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    fsm: Fsm,
    ctx: MotionContext,
    scheduler: Scheduler,
    stepper: Stepper,
    trace: StepTrace,
    moisture: MoistureFilter,
    pump: PumpController,
    ramp: SoftStart,
    climate: ClimateSampler,
    latch: SafetyLatch,
    mark_lockout: Debounce,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: MotionContext::new(config),
            scheduler: Scheduler::new(config),
            stepper: Stepper::new(),
            trace: StepTrace::new(config.trace_every_steps),
            moisture: MoistureFilter::new(config),
            pump: PumpController::new(config),
            ramp: SoftStart::new(config.pump_ramp_increment, config.pump_ramp_interval_ms),
            climate: ClimateSampler::new(config),
            latch: SafetyLatch::new(),
            mark_lockout: Debounce::new(config.button_lockout_ms),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the actuators in their boot state and start the FSM.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_pump_forward();
        hw.stop_pump();
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the control loop at `now`.
    ///
    /// `hw` satisfies all three hardware ports so a single adapter can own
    /// every pin without a double mutable borrow.
    pub fn tick(
        &mut self,
        now: Millis,
        hw: &mut (impl InputPort + SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        // 1. Latched: frozen until power cycle
        if self.latch.is_stopped() {
            if self.latch.take_halt_notice() {
                sink.emit(&AppEvent::Halted);
            }
            return TickOutcome::Halted;
        }

        // 2. Climate
        if self.scheduler.poll(Task::Climate, now) {
            if let Some(event) = self.climate.sample(hw) {
                sink.emit(&event);
            }
        }

        // 3. Stop input preempts everything below
        if hw.stop_asserted() {
            self.engage_stop(now, hw, sink);
            return TickOutcome::Halted;
        }

        // 4. Moisture and pump
        if self.scheduler.poll(Task::Moisture, now) {
            self.moisture.update(hw.read_moisture(), now);
        }
        let dry_stable = self.moisture.is_dry_stable(now);
        let wet_stable = self.moisture.is_wet_stable(now);
        if let Some(switch) = self.pump.evaluate(now, dry_stable, wet_stable) {
            self.drive_pump(switch, now, hw);
            sink.emit(&AppEvent::Pump(switch));
        }
        if let Some(level) = self.ramp.poll(now) {
            hw.set_pump_level(level);
        }

        // 5. Status
        if self.scheduler.poll(Task::Status, now) {
            let snapshot = self.snapshot();
            if let Err(e) = display.render(&snapshot.display_lines()) {
                debug!("status render failed: {e}");
            }
            sink.emit(&AppEvent::Status(snapshot));
        }

        // 6. Mark input
        let mark_pressed = !self.mark_lockout.is_blocked(now) && hw.mark_asserted();

        // 7. Motion
        self.run_motion(now, mark_pressed, sink);
        if let MotionCommand::Step(dir) = self.ctx.command {
            if self.scheduler.poll(Task::Stepper, now) {
                let trace = &mut self.trace;
                self.stepper.advance(dir, hw, |step| {
                    if let Some(event) = trace.record(step) {
                        sink.emit(&event);
                    }
                });
            }
        }

        TickOutcome::Running
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> StatusSnapshot {
        let climate = self.climate.reading();
        StatusSnapshot {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            soil_avg: self.moisture.average(),
            pump_on: self.pump.is_on(),
            step: self.stepper.position(),
            angle: self.stepper.angle(),
        }
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn position(&self) -> i64 {
        self.stepper.position()
    }

    pub fn marks(&self) -> PositionMarks {
        self.ctx.marks
    }

    pub fn pump_on(&self) -> bool {
        self.pump.is_on()
    }

    pub fn is_stopped(&self) -> bool {
        self.latch.is_stopped()
    }

    // ── Internal ──────────────────────────────────────────────

    fn run_motion(&mut self, now: Millis, mark_pressed: bool, sink: &mut impl EventSink) {
        let prev_state = self.fsm.current_state();
        self.ctx.begin_tick(now, self.stepper.position(), mark_pressed);
        self.fsm.tick(&mut self.ctx);

        if self.ctx.mark_consumed {
            self.mark_lockout.arm(now);
        }
        for notice in &self.ctx.notices {
            sink.emit(&AppEvent::Motion(*notice));
        }
        self.ctx.notices.clear();

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    fn drive_pump(&mut self, switch: PumpSwitch, now: Millis, hw: &mut impl ActuatorPort) {
        match switch {
            PumpSwitch::On => {
                hw.set_pump_forward();
                hw.set_pump_level(self.ramp.begin(now));
            }
            PumpSwitch::Off(_) => {
                self.ramp.cancel();
                hw.stop_pump();
            }
        }
    }

    fn engage_stop(&mut self, now: Millis, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if !self.latch.trip() {
            return;
        }
        sink.emit(&AppEvent::StopEngaged);

        let prev_state = self.fsm.current_state();
        self.ctx.clear_marks();
        self.fsm.force_transition(StateId::Idle, &mut self.ctx);
        self.ctx.command = MotionCommand::Hold;
        if prev_state != StateId::Idle {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: StateId::Idle,
            });
        }

        self.stepper.release(hw);

        self.ramp.cancel();
        hw.stop_pump();
        if let Some(switch) = self.pump.force_off(now) {
            sink.emit(&AppEvent::Pump(switch));
        }
    }
}
