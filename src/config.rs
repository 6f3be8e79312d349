//! System configuration parameters
//!
//! All tunable parameters for the rotating table.  Values are compile-time
//! constants: there is no persisted or runtime override path, the struct
//! only exists so the whole parameter set can be logged at boot and passed
//! to each subsystem's constructor.

use serde::Serialize;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemConfig {
    // --- Soil moisture (10-bit ADC scale) ---
    /// Smoothed reading above this is "dry"
    pub dry_threshold: u16,
    /// Smoothed reading below this is "wet"
    pub wet_threshold: u16,
    /// Weight of the previous average in the exponential filter (0.0–1.0)
    pub moisture_retain: f32,
    /// Dry condition must persist this long before the pump may start (ms)
    pub dry_stable_ms: u64,
    /// Wet condition must persist this long before the pump may stop (ms)
    pub wet_stable_ms: u64,
    /// Moisture ADC sampling interval (ms)
    pub moisture_sample_interval_ms: u64,

    // --- Pump ---
    /// Minimum pump run time before a wet reading may stop it (ms)
    pub pump_min_on_ms: u64,
    /// Minimum pump rest time before a dry reading may start it (ms)
    pub pump_min_off_ms: u64,
    /// Absolute ceiling on continuous pump run time (ms)
    pub pump_max_on_ms: u64,
    /// Soft-start increment per ramp step (PWM counts)
    pub pump_ramp_increment: u8,
    /// Pause between soft-start increments (ms)
    pub pump_ramp_interval_ms: u64,

    // --- Stepper / positioning ---
    /// Settle pause between micro-steps (ms)
    pub step_interval_ms: u64,
    /// Minimum gap between the first and second mark press (ms)
    pub second_mark_gap_ms: u64,
    /// Pause at each sweep turnaround (ms)
    pub turnaround_dwell_ms: u64,
    /// Button lockout after an accepted press (ms)
    pub button_lockout_ms: u64,
    /// Emit a step trace every N micro-steps
    pub trace_every_steps: u32,

    // --- Climate sensor ---
    /// Temperature / humidity sampling interval (ms)
    pub climate_interval_ms: u64,
    /// Sensor stabilisation delay at boot (ms)
    pub climate_warmup_ms: u32,
    /// Temperature shown until the first valid sample (°C)
    pub initial_temperature_c: f32,
    /// Humidity shown until the first valid sample (%)
    pub initial_humidity_pct: f32,
    /// Consecutive failed samples before a stale-sensor warning
    pub climate_stale_after: u32,

    // --- Status / loop ---
    /// Display + status log refresh interval (ms)
    pub status_interval_ms: u64,
    /// Sleep between control loop iterations (ms)
    pub loop_idle_ms: u32,
    /// Sleep slice while the stop latch holds the loop (ms)
    pub halted_idle_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Soil moisture
            dry_threshold: 400,
            wet_threshold: 200,
            moisture_retain: 0.9,
            dry_stable_ms: 1000,
            wet_stable_ms: 1000,
            moisture_sample_interval_ms: 10,

            // Pump
            pump_min_on_ms: 3000,
            pump_min_off_ms: 5000,
            pump_max_on_ms: 10_000,
            pump_ramp_increment: 10,
            pump_ramp_interval_ms: 20, // ~0.5 s to full drive

            // Stepper / positioning
            step_interval_ms: 5,
            second_mark_gap_ms: 10_000,
            turnaround_dwell_ms: 500,
            button_lockout_ms: 200,
            trace_every_steps: 100,

            // Climate sensor
            climate_interval_ms: 1000, // DHT11 max 1 Hz
            climate_warmup_ms: 2000,
            initial_temperature_c: 22.0,
            initial_humidity_pct: 50.0,
            climate_stale_after: 5,

            // Status / loop
            status_interval_ms: 500, // 2 Hz
            loop_idle_ms: 1,
            halted_idle_ms: 1000,
        }
    }
}
