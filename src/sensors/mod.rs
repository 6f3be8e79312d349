//! Sensor subsystem: soil moisture smoothing and climate sampling.
//!
//! The two traits here are the raw-read seams the
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) composes
//! behind [`SensorPort`](crate::app::ports::SensorPort).  The processing
//! types ([`moisture::MoistureFilter`], [`climate::ClimateSampler`]) are
//! owned by the application service and never see hardware.

pub mod climate;
pub mod moisture;

use crate::error::SensorError;
use climate::ClimateReading;

/// A single analog channel, already scaled to 0..1023.
pub trait AnalogSource {
    fn read_raw(&mut self) -> u16;
}

/// A combined temperature / humidity device.
pub trait ClimateSource {
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}
