//! DC pump driver (L293D half-bridge).
//!
//! IN1/IN2 select the direction (the pump only ever runs forward) and the
//! EN line carries an 8-bit PWM drive level.
//!
//! ## Soft start
//!
//! Energising the pump at full drive draws a large inrush current from the
//! shared 5 V rail.  [`SoftStart`] ramps the drive level from 0 to 255 in
//! fixed increments with a fixed pause between them.  It is a sub-state
//! machine advanced by [`SoftStart::poll`] on every loop tick, so the ramp
//! never blocks the loop.  Turning the pump off is immediate.
//!
//! ## Safety contract
//!
//! This driver is a dumb actuator.  Run-time limits (minimum on/off, the
//! 10 s ceiling) are enforced by [`PumpController`](crate::control::pump::PumpController).

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::clock::Millis;
use crate::error::ActuatorError;

/// Drive level at the end of the ramp.
pub const FULL_DRIVE: u8 = u8::MAX;

// ---------------------------------------------------------------------------
// SoftStart ramp
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftStart {
    increment: u8,
    interval_ms: Millis,
    level: u8,
    next_at: Option<Millis>,
}

impl SoftStart {
    pub fn new(increment: u8, interval_ms: Millis) -> Self {
        Self {
            increment: increment.max(1),
            interval_ms,
            level: 0,
            next_at: None,
        }
    }

    /// Start a ramp at `now`.  Returns the first level to apply (0).
    pub fn begin(&mut self, now: Millis) -> u8 {
        self.level = 0;
        self.next_at = Some(now + self.interval_ms);
        self.level
    }

    /// Advance the ramp.  Returns a new level when an increment is due.
    ///
    /// Increments are scheduled from the previous increment, not from `now`,
    /// so a late tick does not stretch the ramp.
    pub fn poll(&mut self, now: Millis) -> Option<u8> {
        let due = self.next_at?;
        if now < due {
            return None;
        }
        // The last increment clamps to full drive (250 -> 255 with +10).
        self.level = self.level.saturating_add(self.increment);
        self.next_at = if self.level == FULL_DRIVE {
            None
        } else {
            Some(due + self.interval_ms)
        };
        Some(self.level)
    }

    /// Abort an in-progress ramp and forget the level.
    pub fn cancel(&mut self) {
        self.level = 0;
        self.next_at = None;
    }
}

// ---------------------------------------------------------------------------
// PumpBridge (embedded-hal pins)
// ---------------------------------------------------------------------------

pub struct PumpBridge<EN, IN> {
    enable: EN,
    in1: IN,
    in2: IN,
}

impl<EN: SetDutyCycle, IN: OutputPin> PumpBridge<EN, IN> {
    pub fn new(enable: EN, in1: IN, in2: IN) -> Self {
        Self {
            enable,
            in1,
            in2,
        }
    }

    /// IN1 high, IN2 low.
    pub fn set_forward(&mut self) -> Result<(), ActuatorError> {
        self.in1
            .set_high()
            .and_then(|()| self.in2.set_low())
            .map_err(|_| ActuatorError::GpioWriteFailed)
    }

    /// Apply an 8-bit drive level to EN, scaled to the channel's resolution.
    pub fn set_level(&mut self, level: u8) -> Result<(), ActuatorError> {
        self.enable
            .set_duty_cycle_fraction(u16::from(level), u16::from(FULL_DRIVE))
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set_level(0)
    }
}
