//! Duration parsing: "3s", "500ms", "1.5m", "2h", or bare milliseconds.

use std::time::Duration;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Why a duration literal was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("unknown unit {0:?} (expected ms, s, m or h)")]
    UnknownUnit(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("duration must be greater than zero")]
    NotPositive,

    #[error("duration is out of range")]
    OutOfRange,
}

/// Parse a duration literal. A value without a unit is in milliseconds.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DurationError::Empty);
    }

    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| DurationError::InvalidNumber(number.trim().to_string()))?;

    let millis_per_unit = match unit.trim() {
        "" | "ms" => 1.0,
        "s" => 1_000.0,
        "m" => 60_000.0,
        "h" => 3_600_000.0,
        other => return Err(DurationError::UnknownUnit(other.to_string())),
    };

    duration_from_millis(value * millis_per_unit)
}

/// Convert a millisecond count to a `Duration`, rounding to whole nanoseconds.
pub fn duration_from_millis(millis: f64) -> Result<Duration, DurationError> {
    if millis.is_nan() || millis <= 0.0 {
        return Err(DurationError::NotPositive);
    }
    let nanos = (millis * NANOS_PER_MILLI).round();
    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Err(DurationError::OutOfRange);
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Render a duration in the shortest exact unit: "3s", "250ms", "1.5ms".
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos % 1_000_000_000 == 0 {
        format!("{}s", nanos / 1_000_000_000)
    } else if nanos % 1_000_000 == 0 {
        format!("{}ms", nanos / 1_000_000)
    } else {
        format!("{}ms", nanos as f64 / NANOS_PER_MILLI)
    }
}
