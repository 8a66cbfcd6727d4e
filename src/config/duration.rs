//! Go-style duration strings (`90s`, `1m30s`, `1.5h`, `250ms`).
//!
//! Intervals are configured and rendered in the same notation the alert
//! messages have always used, so both directions live here.

use std::fmt::Write;
use std::time::Duration;

use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", NANOS_PER_MICRO),
    ("µs", NANOS_PER_MICRO),
    ("μs", NANOS_PER_MICRO),
    ("ms", NANOS_PER_MILLI),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
];

// Fraction digits past nanosecond precision do not change the result.
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration")]
    Invalid,
    #[error("missing unit in duration")]
    MissingUnit,
    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),
    #[error("negative durations are not allowed")]
    Negative,
    #[error("duration out of range")]
    Overflow,
}

/// Parse a duration in Go's `time.ParseDuration` syntax.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let whole_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (whole, tail) = rest.split_at(whole_len);

        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => {
                let len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(len)
            }
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::Invalid);
        }

        let unit_len = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit);
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let mut nanos = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| DurationError::Overflow)?
                .checked_mul(scale)
                .ok_or(DurationError::Overflow)?
        };

        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let numerator: u128 = digits.parse().map_err(|_| DurationError::Invalid)?;
            let denominator = 10u128.pow(digits.len() as u32);
            let partial = (numerator * u128::from(scale) / denominator) as u64;
            nanos = nanos.checked_add(partial).ok_or(DurationError::Overflow)?;
        }

        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    if total > i64::MAX as u64 {
        return Err(DurationError::Overflow);
    }
    if negative && total != 0 {
        return Err(DurationError::Negative);
    }

    Ok(Duration::from_nanos(total))
}

/// Render a duration the way Go's `Duration.String()` does:
/// `0s`, `750ms`, `1.5s`, `5m0s`, `1h0m30s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal(nanos, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, 6));
    }

    let total_secs = nanos / NANOS_PER_SEC;
    let fraction = fraction_digits(nanos % NANOS_PER_SEC, 9);
    let total_mins = total_secs / 60;

    let mut out = String::new();
    if total_mins > 0 {
        let hours = total_mins / 60;
        if hours > 0 {
            let _ = write!(out, "{hours}h");
        }
        let _ = write!(out, "{}m", total_mins % 60);
    }
    let _ = write!(out, "{}{}s", total_secs % 60, fraction);
    out
}

fn decimal(value: u64, precision: u32) -> String {
    let scale = 10u64.pow(precision);
    format!(
        "{}{}",
        value / scale,
        fraction_digits(value % scale, precision as usize)
    )
}

fn fraction_digits(remainder: u64, precision: usize) -> String {
    if remainder == 0 {
        return String::new();
    }
    let padded = format!("{remainder:0precision$}");
    format!(".{}", padded.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7_200)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("10us"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("10µs"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("42ns"), Ok(Duration::from_nanos(42)));
    }

    #[test]
    fn parses_compound_and_fractional_values() {
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1h15m"), Ok(Duration::from_secs(4_500)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1_500)));
        assert_eq!(parse_duration(".5m"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("1.s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_duration("+10s"), Ok(Duration::from_secs(10)));
    }

    #[test]
    fn accepts_bare_zero() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("-0"), Ok(Duration::ZERO));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_duration(""), Err(DurationError::Invalid));
        assert_eq!(parse_duration("."), Err(DurationError::Invalid));
        assert_eq!(parse_duration("s"), Err(DurationError::Invalid));
        assert_eq!(parse_duration("10"), Err(DurationError::MissingUnit));
        assert_eq!(
            parse_duration("10d"),
            Err(DurationError::UnknownUnit("d".to_string()))
        );
        assert_eq!(parse_duration("-5s"), Err(DurationError::Negative));
        assert_eq!(
            parse_duration("99999999999999999999h"),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn formats_like_go() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(300)), "5m0s");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(3_630)), "1h0m30s");
    }

    #[test]
    fn formatting_round_trips_through_parser() {
        for text in ["5m0s", "1h0m30s", "1.5s", "250ms"] {
            let parsed = parse_duration(text).unwrap();
            assert_eq!(format_duration(parsed), text);
        }
    }
}
