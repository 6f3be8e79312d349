//! Polled active-low push-button.
//!
//! Momentary switch to ground with the pin's pull-up enabled: LOW means
//! pressed.  No interrupts and no edge detection; the control loop samples
//! the level every tick and applies its own post-action lockout
//! ([`Debounce`](crate::clock::Debounce)).

use embedded_hal::digital::InputPin;
use log::debug;

pub struct ActiveLowButton<I> {
    pin: I,
}

impl<I: InputPin> ActiveLowButton<I> {
    pub fn new(pin: I) -> Self {
        Self { pin }
    }

    /// Current level.  A failed read counts as "not pressed".
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                debug!("button read failed: {:?}", e);
                false
            }
        }
    }
}
