//! Status snapshot and its two renderings.
//!
//! The OLED gets six short lines; the serial log gets the five-line block
//! the desktop plotter parses (`Temp:`, `Humidity:`, `Pot:`, `Servo:`,
//! `Motor:`).  Both are built from the same [`StatusSnapshot`] so they can
//! never disagree.

use core::fmt::{self, Write};

/// One rendered line.  Sized for the longest line with a full `i64` step.
pub type StatusLine = heapless::String<32>;

pub const DISPLAY_LINES: usize = 6;
pub const PLOT_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Smoothed soil reading.
    pub soil_avg: f32,
    pub pump_on: bool,
    pub step: i64,
    pub angle: f32,
}

fn line(args: fmt::Arguments<'_>) -> StatusLine {
    let mut s = StatusLine::new();
    // Overflow truncates; every format here fits.
    let _ = s.write_fmt(args);
    s
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

impl StatusSnapshot {
    /// Soil average truncated toward zero, as shown to the user.
    pub fn soil_display(&self) -> i32 {
        self.soil_avg as i32
    }

    pub fn display_lines(&self) -> [StatusLine; DISPLAY_LINES] {
        [
            line(format_args!("Temp: {:.1} C", self.temperature_c)),
            line(format_args!("Hum: {:.0} %", self.humidity_pct)),
            line(format_args!("Soil: {}", self.soil_display())),
            line(format_args!("Pump: {}", on_off(self.pump_on))),
            line(format_args!("Step: {}", self.step)),
            line(format_args!("Ang: {:.1}", self.angle)),
        ]
    }

    pub fn plot_lines(&self) -> [StatusLine; PLOT_LINES] {
        let drive = if self.pump_on { 255 } else { 0 };
        [
            line(format_args!("Temp: {:.2} C", self.temperature_c)),
            line(format_args!("Humidity: {:.2} %", self.humidity_pct)),
            line(format_args!("Pot: {}", self.soil_display())),
            line(format_args!("Servo: {:.2}\u{00b0}", self.angle)),
            line(format_args!("Motor: {} | {}", drive, on_off(self.pump_on))),
        ]
    }
}
