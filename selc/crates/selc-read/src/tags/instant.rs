//! RFC-3339-like timestamp parsing for `#inst`.
//!
//! The grammar allows progressively truncated timestamps: a bare year,
//! year-month, date, date plus time to any precision, with an optional
//! `Z` or `±HH:MM` offset. Omitted fields default to the epoch values
//! (January 1st, midnight, UTC). Fields are range-checked, including the
//! Gregorian leap-year rule and the leap-second allowance at 23:59:60.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::error::{ReadError, ReadResult};

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(\d{4})(?:-(\d{2})(?:-(\d{2})(?:T(\d{2})(?::(\d{2})(?::(\d{2})(?:\.(\d+))?)?)?)?)?)?(?:(Z)|([-+])(\d{2}):(\d{2}))?$",
        )
        .expect("timestamp pattern is valid")
    })
}

/// Parses a timestamp string into a UTC instant.
pub(crate) fn parse_timestamp(s: &str) -> ReadResult<DateTime<Utc>> {
    let caps = timestamp_pattern()
        .captures(s)
        .ok_or_else(|| ReadError::Tag(format!("Unrecognized date/time syntax: {}", s)))?;

    let field = |i: usize, default: u32| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(default)
    };

    let year: i32 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ReadError::Tag(format!("Unrecognized date/time syntax: {}", s)))?;
    let month = field(2, 1);
    let day = field(3, 1);
    let hour = field(4, 0);
    let minute = field(5, 0);
    let second = field(6, 0);
    let millis = caps
        .get(7)
        .map(|m| fraction_to_millis(m.as_str()))
        .unwrap_or(0);

    let check = |ok: bool, name: &str, value: u32| -> ReadResult<()> {
        if ok {
            Ok(())
        } else {
            Err(ReadError::Tag(format!(
                "Invalid {}: {} in timestamp \"{}\"",
                name, value, s
            )))
        }
    };

    check((1..=12).contains(&month), "month", month)?;
    check(
        (1..=days_in_month(year, month)).contains(&day),
        "day",
        day,
    )?;
    check(hour <= 23, "hour", hour)?;
    check(minute <= 59, "minute", minute)?;
    let second_limit = if minute == 59 { 60 } else { 59 };
    check(second <= second_limit, "second", second)?;

    let offset_minutes: i64 = match caps.get(9) {
        None => 0,
        Some(sign) => {
            let magnitude = (field(10, 0) * 60 + field(11, 0)) as i64;
            if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            }
        }
    };

    let out_of_range = || ReadError::Tag(format!("Timestamp out of range: \"{}\"", s));
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)?;
    // chrono carries a leap second as second 59 with the millisecond
    // field pushed past 1000.
    let (sec, ms) = if second == 60 {
        (59, millis + 1000)
    } else {
        (second, millis)
    };
    let time = NaiveTime::from_hms_milli_opt(hour, minute, sec, ms).ok_or_else(out_of_range)?;
    let naive = NaiveDateTime::new(date, time) - Duration::minutes(offset_minutes);
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Scales a fraction-of-second digit string to milliseconds.
fn fraction_to_millis(fraction: &str) -> u32 {
    let mut digits: String = fraction.chars().take(3).collect();
    while digits.len() < 3 {
        digits.push('0');
    }
    digits.parse().unwrap_or(0)
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}
