//! Pump hysteresis controller.
//!
//! Pure decision logic: given the dry/wet stability flags from the
//! [`MoistureFilter`](crate::sensors::moisture::MoistureFilter) and the
//! current time, decide whether the pump should switch.  Driving the
//! half-bridge (and the soft-start ramp) is the service's job.
//!
//! Rules, highest priority first, at most one per evaluation:
//!
//! | Pump | Condition                                   | Action |
//! |------|---------------------------------------------|--------|
//! | ON   | on for >= `pump_max_on_ms`                  | OFF    |
//! | ON   | wet stable and on for >= `pump_min_on_ms`   | OFF    |
//! | OFF  | dry stable and off for >= `pump_min_off_ms` | ON     |
//!
//! The last-toggle reference starts at 0 ms, so the pump cannot turn on
//! before `pump_min_off_ms` of uptime.

use crate::clock::{Millis, elapsed};
use crate::config::SystemConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOffReason {
    SoilWet,
    SafetyCeiling,
    StopLatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpSwitch {
    On,
    Off(PumpOffReason),
}

pub struct PumpController {
    on: bool,
    last_toggle: Millis,
    min_on_ms: Millis,
    min_off_ms: Millis,
    max_on_ms: Millis,
}

impl PumpController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            on: false,
            last_toggle: 0,
            min_on_ms: config.pump_min_on_ms,
            min_off_ms: config.pump_min_off_ms,
            max_on_ms: config.pump_max_on_ms,
        }
    }

    /// Apply the hysteresis rules at `now`.  Returns the switch that fired.
    pub fn evaluate(&mut self, now: Millis, dry_stable: bool, wet_stable: bool) -> Option<PumpSwitch> {
        let since_toggle = elapsed(now, self.last_toggle);

        let switch = if self.on {
            if since_toggle >= self.max_on_ms {
                Some(PumpSwitch::Off(PumpOffReason::SafetyCeiling))
            } else if wet_stable && since_toggle >= self.min_on_ms {
                Some(PumpSwitch::Off(PumpOffReason::SoilWet))
            } else {
                None
            }
        } else if dry_stable && since_toggle >= self.min_off_ms {
            Some(PumpSwitch::On)
        } else {
            None
        };

        if let Some(s) = switch {
            self.on = s == PumpSwitch::On;
            self.last_toggle = now;
        }
        switch
    }

    /// Unconditional OFF.  `None` if the pump was already off.
    pub fn force_off(&mut self, now: Millis) -> Option<PumpSwitch> {
        if !self.on {
            return None;
        }
        self.on = false;
        self.last_toggle = now;
        Some(PumpSwitch::Off(PumpOffReason::StopLatch))
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PumpController {
        PumpController::new(&SystemConfig::default())
    }

    #[test]
    fn cannot_turn_on_before_off_cooldown_from_boot() {
        let mut p = controller();
        assert_eq!(p.evaluate(4999, true, false), None);
        assert_eq!(p.evaluate(5000, true, false), Some(PumpSwitch::On));
        assert!(p.is_on());
    }

    #[test]
    fn on_is_idempotent() {
        let mut p = controller();
        p.evaluate(6000, true, false);
        for t in (6001..9000).step_by(7) {
            assert_eq!(p.evaluate(t, true, false), None);
        }
    }

    #[test]
    fn wet_respects_min_on() {
        let mut p = controller();
        p.evaluate(6000, true, false);
        assert_eq!(p.evaluate(8999, false, true), None);
        assert_eq!(
            p.evaluate(9000, false, true),
            Some(PumpSwitch::Off(PumpOffReason::SoilWet))
        );
        assert!(!p.is_on());
    }

    #[test]
    fn ceiling_forces_off_even_while_dry() {
        let mut p = controller();
        p.evaluate(6000, true, false);
        assert_eq!(p.evaluate(15_999, true, false), None);
        assert_eq!(
            p.evaluate(16_000, true, false),
            Some(PumpSwitch::Off(PumpOffReason::SafetyCeiling))
        );
    }

    #[test]
    fn ceiling_outranks_wet() {
        let mut p = controller();
        p.evaluate(6000, true, false);
        assert_eq!(
            p.evaluate(16_500, false, true),
            Some(PumpSwitch::Off(PumpOffReason::SafetyCeiling))
        );
    }

    #[test]
    fn off_cooldown_applies_after_switching_off() {
        let mut p = controller();
        p.evaluate(6000, true, false);
        p.evaluate(16_000, true, false);
        assert_eq!(p.evaluate(20_999, true, false), None);
        assert_eq!(p.evaluate(21_000, true, false), Some(PumpSwitch::On));
    }

    #[test]
    fn force_off_only_reports_a_real_change() {
        let mut p = controller();
        assert_eq!(p.force_off(100), None);
        p.evaluate(6000, true, false);
        assert_eq!(
            p.force_off(7000),
            Some(PumpSwitch::Off(PumpOffReason::StopLatch))
        );
        // The forced stop restarts the off cooldown.
        assert_eq!(p.evaluate(11_999, true, false), None);
        assert_eq!(p.evaluate(12_000, true, false), Some(PumpSwitch::On));
    }
}
