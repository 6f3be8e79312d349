//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the coil bank, the pump bridge, both buttons and the two sensors,
//! exposing them through [`InputPort`], [`SensorPort`] and
//! [`ActuatorPort`].  Everything is generic over `embedded-hal` traits, so
//! the same adapter runs on the ESP-IDF newtypes from
//! [`hw_init`](crate::drivers::hw_init) and on plain mocks in tests.
//!
//! Actuator writes are fire-and-forget at the port; a failed write is
//! logged here and the loop carries on.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, InputPort, SensorPort};
use crate::drivers::button::ActiveLowButton;
use crate::drivers::pump::PumpBridge;
use crate::drivers::stepper::{CoilBank, CoilPattern};
use crate::error::SensorError;
use crate::sensors::climate::ClimateReading;
use crate::sensors::{AnalogSource, ClimateSource};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<OUT, EN, BTN, SOIL, CLIM> {
    coils: CoilBank<OUT>,
    pump: PumpBridge<EN, OUT>,
    stop_button: ActiveLowButton<BTN>,
    mark_button: ActiveLowButton<BTN>,
    soil: SOIL,
    climate: CLIM,
}

impl<OUT, EN, BTN, SOIL, CLIM> HardwareAdapter<OUT, EN, BTN, SOIL, CLIM>
where
    OUT: OutputPin,
    EN: SetDutyCycle,
    BTN: InputPin,
    SOIL: AnalogSource,
    CLIM: ClimateSource,
{
    pub fn new(
        coils: CoilBank<OUT>,
        pump: PumpBridge<EN, OUT>,
        stop_button: ActiveLowButton<BTN>,
        mark_button: ActiveLowButton<BTN>,
        soil: SOIL,
        climate: CLIM,
    ) -> Self {
        Self {
            coils,
            pump,
            stop_button,
            mark_button,
            soil,
            climate,
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<OUT, EN, BTN, SOIL, CLIM> InputPort for HardwareAdapter<OUT, EN, BTN, SOIL, CLIM>
where
    BTN: InputPin,
{
    fn stop_asserted(&mut self) -> bool {
        self.stop_button.is_pressed()
    }

    fn mark_asserted(&mut self) -> bool {
        self.mark_button.is_pressed()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<OUT, EN, BTN, SOIL, CLIM> SensorPort for HardwareAdapter<OUT, EN, BTN, SOIL, CLIM>
where
    SOIL: AnalogSource,
    CLIM: ClimateSource,
{
    fn read_moisture(&mut self) -> u16 {
        self.soil.read_raw()
    }

    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<OUT, EN, BTN, SOIL, CLIM> ActuatorPort for HardwareAdapter<OUT, EN, BTN, SOIL, CLIM>
where
    OUT: OutputPin,
    EN: SetDutyCycle,
{
    fn set_coils(&mut self, pattern: CoilPattern) {
        if let Err(e) = self.coils.apply(pattern) {
            warn!("coil write failed: {:?}", e);
        }
    }

    fn set_pump_forward(&mut self) {
        if let Err(e) = self.pump.set_forward() {
            warn!("pump direction: {e}");
        }
    }

    fn set_pump_level(&mut self, level: u8) {
        if let Err(e) = self.pump.set_level(level) {
            warn!("pump level {level}: {e}");
        }
    }
}
