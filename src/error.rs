//! Unified error types for the turntable firmware.
//!
//! Per-subsystem enums plus a top-level [`Error`] for the boot path.  All
//! variants are `Copy` so they can be passed through the control loop
//! without allocation.
//!
//! Two failure classes exist:
//!
//! - **Fatal**: peripheral or display initialisation failed.  Boot converts
//!   the cause into [`Error`], logs it and halts.  A status-less device must
//!   not run unsupervised.
//! - **Recoverable**: a climate sample was invalid.  The sampler keeps the
//!   last good values and tries again at the next interval.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Boot failures that halt the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Raw peripheral bring-up (GPIO, LEDC, ADC) failed.
    Init(HwInitError),
    /// The status display did not come up.
    Display(DisplayError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "HAL init failed: {e}"),
            Self::Display(e) => write!(f, "SSD1306 allocation failed: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer within its protocol window.
    Timeout,
    /// Frame received but the checksum did not match.
    Checksum,
    /// The sensor answered with a not-a-number / out-of-range value.
    InvalidReading,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Checksum => write!(f, "checksum mismatch"),
            Self::InvalidReading => write!(f, "invalid reading"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Controller did not accept the init sequence.
    InitFailed,
    /// A draw or flush transfer failed.
    Bus,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "init failed"),
            Self::Bus => write!(f, "bus transfer failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Result of a fallible boot step.
pub type Result<T> = core::result::Result<T, Error>;
