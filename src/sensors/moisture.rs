//! Capacitive soil probe signal conditioning.
//!
//! Raw readings are smoothed with an exponential moving average
//! (`avg = avg * retain + raw * (1 - retain)`), the first sample seeding the
//! average directly.  The smoothed value is classified against the dry and
//! wet thresholds; each side keeps a [`StabilityTimer`] so the pump logic
//! only acts on a condition that has held continuously.
//!
//! Higher readings mean drier soil.

use crate::clock::{Millis, StabilityTimer};
use crate::config::SystemConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureZone {
    /// Above the dry threshold.
    Dry,
    /// Below the wet threshold.
    Wet,
    /// Dead zone between the thresholds.
    Neutral,
}

pub struct MoistureFilter {
    retain: f32,
    dry_threshold: f32,
    wet_threshold: f32,
    dry_stable_ms: Millis,
    wet_stable_ms: Millis,
    average: Option<f32>,
    dry: StabilityTimer,
    wet: StabilityTimer,
}

impl MoistureFilter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            retain: config.moisture_retain,
            dry_threshold: f32::from(config.dry_threshold),
            wet_threshold: f32::from(config.wet_threshold),
            dry_stable_ms: config.dry_stable_ms,
            wet_stable_ms: config.wet_stable_ms,
            average: None,
            dry: StabilityTimer::default(),
            wet: StabilityTimer::default(),
        }
    }

    /// Fold one raw sample in and update the stability timers.
    pub fn update(&mut self, raw: u16, now: Millis) -> MoistureZone {
        let raw = f32::from(raw);
        let avg = match self.average {
            Some(prev) => prev * self.retain + raw * (1.0 - self.retain),
            None => raw,
        };
        self.average = Some(avg);

        let zone = self.classify(avg);
        match zone {
            MoistureZone::Dry => {
                self.dry.hold(now);
                self.wet.clear();
            }
            MoistureZone::Wet => {
                self.wet.hold(now);
                self.dry.clear();
            }
            MoistureZone::Neutral => {
                self.dry.clear();
                self.wet.clear();
            }
        }
        zone
    }

    fn classify(&self, avg: f32) -> MoistureZone {
        if avg > self.dry_threshold {
            MoistureZone::Dry
        } else if avg < self.wet_threshold {
            MoistureZone::Wet
        } else {
            MoistureZone::Neutral
        }
    }

    /// Smoothed reading; 0 before the first sample.
    pub fn average(&self) -> f32 {
        self.average.unwrap_or(0.0)
    }

    pub fn is_dry_stable(&self, now: Millis) -> bool {
        self.dry.is_stable(now, self.dry_stable_ms)
    }

    pub fn is_wet_stable(&self, now: Millis) -> bool {
        self.wet.is_stable(now, self.wet_stable_ms)
    }
}
