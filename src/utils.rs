use crate::engine::track::{minutes_to_seconds, seconds_to_minutes};

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Parse a strictly positive decimal such as a speed or distance.
pub fn parse_positive_decimal(input: &str, field_name: &str) -> Result<f64, String> {
    let value: f64 = validate_numeric_input(input, None, None, field_name)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be greater than 0", field_name))
    }
}

/// Parse a whole number of lap seconds into minutes.
pub fn parse_lap_seconds(input: &str) -> Result<f64, String> {
    let seconds: u32 = validate_numeric_input(input, Some(1), None, "Lap time")?;
    Ok(seconds_to_minutes(seconds as f64))
}

/// Fixed-point display with exactly `decimals` places.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Lap time in minutes rendered as whole seconds.
pub fn format_lap_seconds(minutes: f64) -> String {
    format_decimal(minutes_to_seconds(minutes), 0)
}
