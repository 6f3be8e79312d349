//! Rotating plant table firmware, main entry point.
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          OledDisplay   LogEventSink  Esp32Time│
//! │  (Input+Sensor+Actuator)  (Display)     (EventSink)   (Clock)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Motion FSM · Stepper · Pump hysteresis · Stop latch   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (per-task intervals, polled every tick)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{error, info};

use turntable::adapters::dht11::Dht11;
use turntable::adapters::display::OledDisplay;
use turntable::adapters::hardware::HardwareAdapter;
use turntable::adapters::log_sink::LogEventSink;
use turntable::adapters::time::Esp32TimeAdapter;
use turntable::app::ports::ClockPort;
use turntable::app::service::{AppService, TickOutcome};
use turntable::config::SystemConfig;
use turntable::drivers::button::ActiveLowButton;
use turntable::drivers::hw_init::{self, LedcChannel, SoilAdc, SysInput, SysOutput};
use turntable::drivers::pump::PumpBridge;
use turntable::drivers::stepper::CoilBank;
use turntable::pins;

/// Park the main task forever.  Only a power cycle gets out of here.
fn halt(clock: &Esp32TimeAdapter, slice_ms: u32) -> ! {
    loop {
        clock.sleep_ms(slice_ms);
    }
}

/// Boot steps whose failure leaves the device unusable.
fn bring_up<'d>(
    i2c: I2cDriver<'d>,
    clock: &Esp32TimeAdapter,
    config: &SystemConfig,
) -> turntable::error::Result<OledDisplay<I2cDriver<'d>>> {
    hw_init::init_peripherals()?;
    clock.sleep_ms(config.climate_warmup_ms);
    Ok(OledDisplay::new(i2c)?)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Rotating table with watering system setup.");
    info!("turntable v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    let clock = Esp32TimeAdapter::new();
    match serde_json::to_string(&config) {
        Ok(json) => info!("config: {}", json),
        Err(e) => error!("config dump failed: {}", e),
    }

    // ── 2. I²C bus for the status panel ───────────────────────
    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
    )?;
    info!(
        "I2C0 up: SDA=GPIO{} SCL=GPIO{} @ {} Hz",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::I2C_BAUDRATE_HZ
    );

    // ── 3. Peripherals, climate warm-up, display (all fatal) ──
    let mut display = match bring_up(i2c, &clock, &config) {
        Ok(d) => d,
        Err(e) => {
            error!("{}, halting", e);
            halt(&clock, config.halted_idle_ms);
        }
    };
    let climate = Dht11::new(pins::DHT_GPIO);

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        CoilBank::new(pins::COIL_GPIOS.map(SysOutput)),
        PumpBridge::new(
            LedcChannel(hw_init::LEDC_CH_PUMP),
            SysOutput(pins::PUMP_IN1_GPIO),
            SysOutput(pins::PUMP_IN2_GPIO),
        ),
        ActiveLowButton::new(SysInput(pins::STOP_BUTTON_GPIO)),
        ActiveLowButton::new(SysInput(pins::MARK_BUTTON_GPIO)),
        SoilAdc::new(hw_init::ADC1_CH_SOIL),
        climate,
    );
    let mut log_sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();
        match app.tick(now, &mut hw, &mut display, &mut log_sink) {
            TickOutcome::Running => clock.sleep_ms(config.loop_idle_ms),
            TickOutcome::Halted => clock.sleep_ms(config.halted_idle_ms),
        }
    }
}
