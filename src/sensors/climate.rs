//! Temperature / humidity sampling with last-good retention.
//!
//! The sampler is called once per climate interval.  A failed read (an
//! error from the port, or a NaN in either channel) leaves both published
//! values untouched; nothing downstream ever sees "unknown".
//!
//! Two notices are produced for the log:
//! - the first good sample ever announces the sensor as online;
//! - a run of consecutive failures reports the values as stale, once per
//!   outage.

use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use crate::error::SensorError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl ClimateReading {
    pub fn is_valid(&self) -> bool {
        !self.temperature_c.is_nan() && !self.humidity_pct.is_nan()
    }
}

pub struct ClimateSampler {
    current: ClimateReading,
    online: bool,
    failures: u32,
    stale_after: u32,
}

impl ClimateSampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            current: ClimateReading {
                temperature_c: config.initial_temperature_c,
                humidity_pct: config.initial_humidity_pct,
            },
            online: false,
            failures: 0,
            stale_after: config.climate_stale_after.max(1),
        }
    }

    /// Take one sample through `port`.
    pub fn sample(&mut self, port: &mut impl SensorPort) -> Option<AppEvent> {
        let result = port.read_climate().and_then(|r| {
            if r.is_valid() {
                Ok(r)
            } else {
                Err(SensorError::InvalidReading)
            }
        });

        match result {
            Ok(reading) => {
                self.current = reading;
                self.failures = 0;
                if self.online {
                    None
                } else {
                    self.online = true;
                    Some(AppEvent::ClimateOnline(reading))
                }
            }
            Err(e) => {
                debug!("climate sample rejected: {e}");
                self.failures = self.failures.saturating_add(1);
                (self.failures == self.stale_after).then_some(AppEvent::ClimateStale {
                    failures: self.failures,
                    online: self.is_online(),
                })
            }
        }
    }

    pub fn reading(&self) -> ClimateReading {
        self.current
    }

    pub fn is_online(&self) -> bool {
        self.online
    }
}
