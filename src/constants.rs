use crate::color::Color;

// Timing
pub const REACTION_WINDOW_MS: f64 = 5000.0; // nominal time for a reaction to run to completion
pub const DEFAULT_TICK_INTERVAL_MS: f64 = 500.0; // live readout cadence
pub const DEFAULT_REPORT_FREQUENCY_PERCENT: f64 = 10.0;

// Temperature
pub const TO_KELVIN: f64 = 273.15;
pub const DEFAULT_BOIL_TEMP_C: f64 = 100.0;

// Color returned when a simulation type is not in the config table (#4287f5)
pub const DEFAULT_REACTION_COLOR: Color = Color::new(0x42, 0x87, 0xf5);

// Explosions
/// Descriptors with `explosiveness` strictly above this are treated as explosive
/// even without an explicit `can_explode` flag.
pub const EXPLOSIVENESS_THRESHOLD: f64 = 0.7;
pub const DEFAULT_EXPLOSION_RADIUS: f64 = 2.0;

// Effects
pub const BOILING_EVAPORATION_MULTIPLIER: f64 = 2.0;

// Overlay parameter names read by the session driver
pub const TEMPERATURE_PARAM: &str = "temperature";
pub const PH_PARAM: &str = "ph";
