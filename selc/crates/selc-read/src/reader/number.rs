//! Numeric literal parsing.
//!
//! A number token is matched against the integer, ratio and float
//! grammars in that order. The patterns are compiled once and shared.

use std::sync::OnceLock;

use regex::Regex;
use selc_val::{Ratio, Value};

use crate::error::{ReadError, ReadResult};
use crate::reader::Reader;

fn int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^([-+]?)(?:(0)|([1-9][0-9]*)|0[xX]([0-9A-Fa-f]+)|0([0-7]+)|([1-9][0-9]?)[rR]([0-9A-Za-z]+)|0[0-9]+)(N)?$",
        )
        .expect("integer pattern is valid")
    })
}

fn ratio_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([-+]?[0-9]+)/([0-9]+)$").expect("ratio pattern is valid")
    })
}

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([-+]?[0-9]+(\.[0-9]*)?([eE][-+]?[0-9]+)?)(M)?$")
            .expect("float pattern is valid")
    })
}

impl Reader<'_> {
    /// Scans the token starting at `initial` and parses it as a number.
    pub(crate) fn read_number(&mut self, initial: char) -> ReadResult<Value> {
        let token = self.read_token(initial);
        parse_number(&token)
    }
}

/// Parses a complete token as a numeric literal.
pub(crate) fn parse_number(token: &str) -> ReadResult<Value> {
    if let Some(caps) = int_pattern().captures(token) {
        return parse_int(token, &caps);
    }
    if let Some(caps) = ratio_pattern().captures(token) {
        return parse_ratio(token, &caps);
    }
    if let Some(caps) = float_pattern().captures(token) {
        return parse_float(token, &caps);
    }
    Err(ReadError::InvalidNumber(token.to_string()))
}

fn parse_int(token: &str, caps: &regex::Captures<'_>) -> ReadResult<Value> {
    let invalid = || ReadError::InvalidNumber(token.to_string());
    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
    let big = caps.get(8).is_some();

    // The `0` alternative: "0", "-0" and "+0" are all integer zero.
    if caps.get(2).is_some() {
        return Ok(if big { Value::BigInt(0) } else { Value::Int(0) });
    }

    let (digits, radix) = if let Some(m) = caps.get(3) {
        (m.as_str(), 10)
    } else if let Some(m) = caps.get(4) {
        (m.as_str(), 16)
    } else if let Some(m) = caps.get(5) {
        (m.as_str(), 8)
    } else if let Some(m) = caps.get(6) {
        let radix: u32 = m.as_str().parse().map_err(|_| invalid())?;
        if !(2..=36).contains(&radix) {
            return Err(invalid());
        }
        let digits = caps.get(7).ok_or_else(invalid)?.as_str();
        (digits, radix)
    } else {
        // The trailing alternative catches malformed octals like "08".
        return Err(invalid());
    };

    // The sign goes into the parsed string so the most-negative literal
    // is in range; negating a positive magnitude would reject it.
    let value = if negative {
        i64::from_str_radix(&format!("-{}", digits), radix)
    } else {
        i64::from_str_radix(digits, radix)
    }
    .map_err(|_| invalid())?;
    Ok(if big {
        Value::BigInt(value)
    } else {
        Value::Int(value)
    })
}

fn parse_ratio(token: &str, caps: &regex::Captures<'_>) -> ReadResult<Value> {
    let invalid = || ReadError::InvalidNumber(token.to_string());
    let num: i64 = caps
        .get(1)
        .ok_or_else(invalid)?
        .as_str()
        .parse()
        .map_err(|_| invalid())?;
    let den: i64 = caps
        .get(2)
        .ok_or_else(invalid)?
        .as_str()
        .parse()
        .map_err(|_| invalid())?;
    let ratio = Ratio::new(num, den).ok_or(ReadError::DivideByZero)?;
    Ok(if ratio.is_integral() {
        Value::Int(ratio.numerator())
    } else {
        Value::Ratio(ratio)
    })
}

fn parse_float(token: &str, caps: &regex::Captures<'_>) -> ReadResult<Value> {
    let invalid = || ReadError::InvalidNumber(token.to_string());
    let body = caps.get(1).ok_or_else(invalid)?.as_str();
    let value: f64 = body.parse().map_err(|_| invalid())?;
    Ok(if caps.get(4).is_some() {
        Value::BigDec(value)
    } else {
        Value::Float(value)
    })
}
