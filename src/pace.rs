//! Pace, speed, distance and time identities plus the `M:SS` / `H:MM:SS`
//! text forms used by the calculator fields.
//!
//! Everything here is total: degenerate inputs (zero or negative
//! denominators, malformed strings) map to `0` rather than an error. The
//! `try_parse_*` variants expose the reason a string was rejected for
//! callers that want it.

use log::debug;
use std::fmt;

/// Minutes in an hour, used by the pace/speed identity.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Speed (units/hour) for a pace (minutes/unit). Non-positive pace gives 0.
pub fn pace_to_speed(pace: f64) -> f64 {
    if pace > 0.0 {
        MINUTES_PER_HOUR / pace
    } else {
        0.0
    }
}

/// Pace (minutes/unit) for a speed (units/hour). Non-positive speed gives 0.
pub fn speed_to_pace(speed: f64) -> f64 {
    if speed > 0.0 {
        MINUTES_PER_HOUR / speed
    } else {
        0.0
    }
}

#[inline]
pub fn time_from_pace_distance(pace: f64, distance: f64) -> f64 {
    pace * distance
}

pub fn distance_from_pace_time(pace: f64, time: f64) -> f64 {
    if pace > 0.0 {
        time / pace
    } else {
        0.0
    }
}

pub fn pace_from_time_distance(time: f64, distance: f64) -> f64 {
    if distance > 0.0 {
        time / distance
    } else {
        0.0
    }
}

/// Reasons a pace or time string is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    EmptyInput,
    WrongSegmentCount(usize),
    InvalidSegment(String),
    InvalidSeconds(u32),
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeParseError::EmptyInput => write!(f, "Time cannot be empty"),
            TimeParseError::WrongSegmentCount(n) => {
                write!(f, "Unexpected number of ':' separated segments: {}", n)
            }
            TimeParseError::InvalidSegment(s) => write!(f, "Segment is not a number: {:?}", s),
            TimeParseError::InvalidSeconds(s) => write!(f, "Invalid seconds: {} (must be 0-59)", s),
        }
    }
}

impl std::error::Error for TimeParseError {}

fn parse_segment(segment: &str) -> Result<u32, TimeParseError> {
    segment
        .trim()
        .parse::<u32>()
        .map_err(|_| TimeParseError::InvalidSegment(segment.to_string()))
}

fn split_segments(input: &str) -> Result<Vec<&str>, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::EmptyInput);
    }
    Ok(trimmed.split(':').collect())
}

/// Format a pace in minutes as `MM:SS`.
///
/// Seconds are rounded and never carried, so a pace a hair below a whole
/// minute renders with `60` in the seconds slot (`4.9999` → `"04:60"`).
pub fn format_pace(minutes: f64) -> String {
    let whole = minutes.floor();
    let seconds = ((minutes - whole) * 60.0).round();
    format!("{:02}:{:02}", whole as u64, seconds as u64)
}

/// Parse `M:SS` into minutes, reporting why the string was rejected.
pub fn try_parse_pace(input: &str) -> Result<f64, TimeParseError> {
    let segments = split_segments(input)?;
    if segments.len() != 2 {
        return Err(TimeParseError::WrongSegmentCount(segments.len()));
    }
    let minutes = parse_segment(segments[0])?;
    let seconds = parse_segment(segments[1])?;
    if seconds >= 60 {
        return Err(TimeParseError::InvalidSeconds(seconds));
    }
    Ok(minutes as f64 + seconds as f64 / 60.0)
}

/// Parse `M:SS` into minutes. Any malformed input yields `0`.
pub fn parse_pace(input: &str) -> f64 {
    try_parse_pace(input).unwrap_or_else(|e| {
        debug!("Ignoring pace {:?}: {}", input, e);
        0.0
    })
}

/// Format a duration in minutes as `HH:MM:SS`.
///
/// Like [`format_pace`], a seconds part that rounds to `60` is not carried.
pub fn format_time(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor();
    let mins = (minutes % 60.0).floor();
    let seconds = ((minutes % 1.0) * 60.0).round();
    format!(
        "{:02}:{:02}:{:02}",
        hours as u64, mins as u64, seconds as u64
    )
}

/// Parse `M:SS` or `H:MM:SS` into minutes, reporting why it was rejected.
pub fn try_parse_time(input: &str) -> Result<f64, TimeParseError> {
    let segments = split_segments(input)?;
    let values = segments
        .iter()
        .map(|s| parse_segment(s))
        .collect::<Result<Vec<u32>, _>>()?;

    match values.as_slice() {
        [m, s] => Ok(*m as f64 + *s as f64 / 60.0),
        [h, m, s] => Ok(*h as f64 * 60.0 + *m as f64 + *s as f64 / 60.0),
        other => Err(TimeParseError::WrongSegmentCount(other.len())),
    }
}

/// Parse `M:SS` or `H:MM:SS` into minutes. Any malformed input yields `0`.
pub fn parse_time(input: &str) -> f64 {
    try_parse_time(input).unwrap_or_else(|e| {
        debug!("Ignoring time {:?}: {}", input, e);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_pace_to_speed_scenarios() {
        assert_eq!(pace_to_speed(5.0), 12.0);
        assert_eq!(pace_to_speed(0.0), 0.0);
        assert_eq!(pace_to_speed(-1.0), 0.0);
        assert_eq!(speed_to_pace(0.0), 0.0);
        assert_eq!(speed_to_pace(-3.0), 0.0);
    }

    #[test]
    fn test_pace_speed_round_trip() {
        for p in [0.5, 2.75, 3.0, 4.123456, 5.0, 6.25, 12.0, 37.3] {
            assert_close(speed_to_pace(pace_to_speed(p)), p);
        }
    }

    #[test]
    fn test_identities_guard_denominators() {
        assert_eq!(time_from_pace_distance(5.0, 10.0), 50.0);
        assert_eq!(distance_from_pace_time(5.0, 50.0), 10.0);
        assert_eq!(distance_from_pace_time(0.0, 50.0), 0.0);
        assert_eq!(pace_from_time_distance(50.0, 8.0), 6.25);
        assert_eq!(pace_from_time_distance(50.0, 0.0), 0.0);
        assert_eq!(pace_from_time_distance(50.0, -2.0), 0.0);
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(5.0), "05:00");
        assert_eq!(format_pace(5.5), "05:30");
        assert_eq!(format_pace(6.25), "06:15");
        assert_eq!(format_pace(0.0), "00:00");
        assert_eq!(format_pace(12.0 + 7.0 / 60.0), "12:07");
    }

    #[test]
    fn test_format_pace_does_not_carry_sixty_seconds() {
        // 4 minutes and 59.994 seconds rounds the seconds slot to 60
        assert_eq!(format_pace(4.9999), "04:60");
        assert_eq!(format_time(59.9999), "00:59:60");
    }

    #[test]
    fn test_parse_pace() {
        assert_close(parse_pace("5:30"), 5.5);
        assert_close(parse_pace("05:00"), 5.0);
        assert_eq!(parse_pace("5:60"), 0.0);
        assert_eq!(parse_pace("5"), 0.0);
        assert_eq!(parse_pace("1:2:3"), 0.0);
        assert_eq!(parse_pace("a:30"), 0.0);
        assert_eq!(parse_pace(""), 0.0);
    }

    #[test]
    fn test_try_parse_pace_reports_reason() {
        assert_eq!(try_parse_pace(""), Err(TimeParseError::EmptyInput));
        assert_eq!(try_parse_pace("7"), Err(TimeParseError::WrongSegmentCount(1)));
        assert_eq!(try_parse_pace("7:75"), Err(TimeParseError::InvalidSeconds(75)));
        assert!(matches!(
            try_parse_pace("x:00"),
            Err(TimeParseError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_pace_format_parse_round_trip() {
        for minutes in 0..20u32 {
            for seconds in [0u32, 1, 15, 30, 45, 59] {
                let v = minutes as f64 + seconds as f64 / 60.0;
                assert_close(parse_pace(&format_pace(v)), v);
            }
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(50.0), "00:50:00");
        assert_eq!(format_time(90.0), "01:30:00");
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(125.5), "02:05:30");
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("01:30:00"), 90.0);
        assert_eq!(parse_time("1:2:3:4"), 0.0);
        assert_eq!(parse_time(""), 0.0);
        assert_close(parse_time("50:30"), 50.5);
        assert_close(parse_time("2:05:30"), 125.5);
        assert_eq!(parse_time("1:xx:00"), 0.0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TimeParseError::InvalidSeconds(61).to_string(),
            "Invalid seconds: 61 (must be 0-59)"
        );
        assert_eq!(TimeParseError::EmptyInput.to_string(), "Time cannot be empty");
    }
}
