//! DHT11 single-wire temperature / humidity sensor.
//!
//! The frame decoder is plain logic and builds everywhere.  The bit-banged
//! transfer needs microsecond timing from `esp_timer` and exists only on
//! the device; it runs with interrupts masked for the ~4 ms the sensor
//! needs to shift out its 40 bits.

use crate::error::SensorError;
use crate::sensors::climate::ClimateReading;

/// Five bytes on the wire: RH int, RH frac, T int, T frac, checksum.
pub const FRAME_LEN: usize = 5;

/// A high pulse longer than this is a `1` bit (0 is ~27 µs, 1 is ~70 µs).
pub const ONE_THRESHOLD_US: u32 = 40;

/// Check the frame and turn it into engineering units.
///
/// Bit 7 of the temperature fraction byte carries the sign on parts that
/// report below-zero temperatures.
pub fn decode_frame(frame: &[u8; FRAME_LEN]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) * 0.1;
    let temperature_c = if frame[3] & 0x80 != 0 { -magnitude } else { magnitude };

    if humidity_pct > 100.0 {
        return Err(SensorError::InvalidReading);
    }
    Ok(ClimateReading { temperature_c, humidity_pct })
}

#[cfg(target_os = "espidf")]
pub use device::Dht11;

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_svc::hal::delay::{Ets, FreeRtos};
    use esp_idf_svc::sys::{esp_timer_get_time, gpio_get_level, gpio_set_level};

    use super::{decode_frame, FRAME_LEN, ONE_THRESHOLD_US};
    use crate::error::SensorError;
    use crate::sensors::ClimateSource;
    use crate::sensors::climate::ClimateReading;

    /// Longest any single phase of the handshake or a bit may last.
    const PHASE_TIMEOUT_US: i64 = 120;

    pub struct Dht11 {
        pin: i32,
    }

    impl Dht11 {
        /// `pin` must already be configured open-drain with a pull-up.
        pub fn new(pin: i32) -> Self {
            Self { pin }
        }

        /// Busy-wait while the line sits at `level`; returns how long it did.
        fn hold_time(&self, level: i32) -> Result<u32, SensorError> {
            // SAFETY: esp_timer_get_time and gpio_get_level are register reads.
            let start = unsafe { esp_timer_get_time() };
            loop {
                let elapsed = unsafe { esp_timer_get_time() } - start;
                if unsafe { gpio_get_level(self.pin) } != level {
                    return Ok(elapsed as u32);
                }
                if elapsed > PHASE_TIMEOUT_US {
                    return Err(SensorError::Timeout);
                }
            }
        }

        fn transfer(&self) -> Result<[u8; FRAME_LEN], SensorError> {
            // Sensor answers: 80 µs low, 80 µs high, then 40 bits.
            self.hold_time(1)?;
            self.hold_time(0)?;
            self.hold_time(1)?;

            let mut frame = [0u8; FRAME_LEN];
            for bit in 0..FRAME_LEN * 8 {
                self.hold_time(0)?;
                let high = self.hold_time(1)?;
                if high > ONE_THRESHOLD_US {
                    frame[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
            Ok(frame)
        }
    }

    impl ClimateSource for Dht11 {
        fn read(&mut self) -> Result<ClimateReading, SensorError> {
            // Start signal: hold the line low for at least 18 ms.
            // SAFETY: the pin is an open-drain output owned by this driver.
            unsafe { gpio_set_level(self.pin, 0) };
            FreeRtos::delay_ms(20);
            unsafe { gpio_set_level(self.pin, 1) };
            Ets::delay_us(30);

            let frame = esp_idf_svc::hal::interrupt::free(|| self.transfer());
            decode_frame(&frame?)
        }
    }
}
