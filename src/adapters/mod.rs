//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                    |
//! |------------|---------------|--------------------------------|
//! | `hardware` | InputPort     | Mark / stop buttons            |
//! |            | SensorPort    | Soil ADC, DHT11                |
//! |            | ActuatorPort  | Stepper coils, L293D pump      |
//! | `dht11`    | ClimateSource | DHT11 single-wire (device only)|
//! | `display`  | DisplayPort   | SSD1306 OLED over I²C          |
//! | `log_sink` | EventSink     | Serial log output              |
//! | `time`     | ClockPort     | ESP32 system timer             |

pub mod dht11;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
