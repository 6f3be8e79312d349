//! Port traits: the hexagonal boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (buttons, sensors, coils, pump, display, clock, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the control core never touches hardware
//! directly and runs unchanged against the mocks in `tests/`.
//!
//! Only the climate read and the display render can fail in a way the core
//! cares about.  Coil and pump writes are fire-and-forget; adapters log their
//! own failures.

use crate::clock::Millis;
use crate::drivers::stepper::CoilPattern;
use crate::error::{DisplayError, SensorError};
use crate::sensors::climate::ClimateReading;
use crate::status::StatusLine;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Raw button levels, already translated to "asserted".
pub trait InputPort {
    fn stop_asserted(&mut self) -> bool;
    fn mark_asserted(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait SensorPort {
    /// Raw soil reading on the 0..1023 scale.  A failed conversion is not
    /// distinguishable from a genuine low value.
    fn read_moisture(&mut self) -> u16;

    /// One temperature + humidity read.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Drive the four stepper coil lines.
    fn set_coils(&mut self, pattern: CoilPattern);

    /// De-energise every coil.
    fn release_coils(&mut self) {
        self.set_coils(CoilPattern::RELEASED);
    }

    /// Select forward flow on the pump half-bridge.
    fn set_pump_forward(&mut self);

    /// Pump enable drive level (0 = off, 255 = full).
    fn set_pump_level(&mut self, level: u8);

    /// Drop the pump drive to zero immediately.
    fn stop_pump(&mut self) {
        self.set_pump_level(0);
    }
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Clear, draw `lines` top to bottom, present.
    fn render(&mut self, lines: &[StatusLine]) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot plus a blocking sleep.
///
/// Only `main` sleeps.  The core reads `now_ms` once per tick and passes it
/// down, so every subsystem within a tick agrees on the time.
pub trait ClockPort {
    fn now_ms(&self) -> Millis;
    fn sleep_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
