//! SSD1306 128x64 OLED status panel (I²C, address 0x3C).
//!
//! Buffered graphics mode: each render clears the frame buffer, draws the
//! status lines top to bottom in a 6x10 font and flushes the whole buffer.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{DisplayConfig, DisplayRotation, I2CInterface};
use ssd1306::size::DisplaySize128x64;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;
use crate::status::StatusLine;

/// Pixel rows per text line (font height).
const ROW_HEIGHT: i32 = 10;

type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledDisplay<I2C> {
    panel: Panel<I2C>,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<I2C: embedded_hal::i2c::I2c> OledDisplay<I2C> {
    /// Run the controller init sequence.  Failure here is fatal at boot.
    pub fn new(i2c: I2C) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|_| DisplayError::InitFailed)?;
        Ok(Self {
            panel,
            style: MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        })
    }
}

impl<I2C: embedded_hal::i2c::I2c> DisplayPort for OledDisplay<I2C> {
    fn render(&mut self, lines: &[StatusLine]) -> Result<(), DisplayError> {
        self.panel.clear_buffer();
        for (row, line) in lines.iter().enumerate() {
            let origin = Point::new(0, row as i32 * ROW_HEIGHT);
            Text::with_baseline(line.as_str(), origin, self.style, Baseline::Top)
                .draw(&mut self.panel)
                .map_err(|_| DisplayError::Bus)?;
        }
        self.panel.flush().map_err(|_| DisplayError::Bus)
    }
}
