//! GPIO / peripheral pin assignments for the turntable controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Stepper (28BYJ-48 via ULN2003, IN1..IN4)
// ---------------------------------------------------------------------------

pub const COIL_GPIOS: [i32; 4] = [4, 5, 6, 7];

// ---------------------------------------------------------------------------
// Buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Marks sweep positions.
pub const MARK_BUTTON_GPIO: i32 = 10;
/// Latches the whole system off until power cycle.
pub const STOP_BUTTON_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Pump (DC motor via L293D half-bridge)
// ---------------------------------------------------------------------------

/// L293D EN1: LEDC PWM, soft-start ramp.
pub const PUMP_ENABLE_GPIO: i32 = 12;
/// L293D IN1, HIGH for forward.
pub const PUMP_IN1_GPIO: i32 = 13;
/// L293D IN2, LOW for forward.
pub const PUMP_IN2_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// Capacitive soil moisture probe on ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const SOIL_ADC_GPIO: i32 = 1;
/// DHT11 single-wire data line (open-drain, pull-up).
pub const DHT_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 128x64 at 0x3C)
// ---------------------------------------------------------------------------

/// Must match the `peripherals.pins.gpioNN` handles used in `main`.
pub const I2C_SDA_GPIO: i32 = 17;
pub const I2C_SCL_GPIO: i32 = 18;
pub const I2C_BAUDRATE_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the pump enable line.
pub const PUMP_PWM_FREQ_HZ: u32 = 25_000;
