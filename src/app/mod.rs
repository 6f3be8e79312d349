//! Application core: pure domain logic, zero I/O.
//!
//! The tick dispatcher that arbitrates stepper motion, pump hysteresis,
//! climate sampling and status reporting.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
