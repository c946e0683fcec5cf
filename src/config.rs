//! Application-level configuration constants.

// Default values for the calculator on page load
pub const DEFAULT_PACE: f64 = 5.0;
pub const DEFAULT_SPEED: f64 = 12.0;
pub const DEFAULT_DISTANCE: f64 = 10.0;
pub const DEFAULT_TIME: f64 = 50.0;

// Unit conversion factors
pub const KM_TO_MILES: f64 = 0.621371;
pub const MILES_TO_KM: f64 = 1.609344;

// Segmented time field defaults, restored by Delete or a cleared selection
pub const HOURS_MASK_DEFAULT: &str = "00:00:00";
pub const MINUTES_MASK_DEFAULT: &str = "05:00";

// Decimal places per numeric field
pub const SPEED_DECIMALS: usize = 2;
pub const DISTANCE_DECIMALS: usize = 2;
pub const LAP_SECONDS_DECIMALS: usize = 0;

// Track-lap mode
pub const LAP_DISTANCE_KM: f64 = 0.4;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
