use rust_decimal::Decimal;
use serde_json::Value;
use std::borrow::Cow;
use std::str::FromStr;

use crate::tree::{ATTR_KEY, TEXT_KEY};

/// What a tree node looks like when a single text leaf is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf<'a> {
    Absent,
    Text(Cow<'a, str>),
    Malformed(&'static str),
}

/// Read a node as leaf text.
///
/// Handles plain text, attribute-bearing leaves (`{"$": .., "_": "text"}`),
/// and scalar JSON values for trees that did not come from XML.
pub fn leaf(value: Option<&Value>) -> Leaf<'_> {
    match value {
        None | Some(Value::Null) => Leaf::Absent,
        Some(Value::String(s)) => Leaf::Text(Cow::Borrowed(s)),
        Some(Value::Number(n)) => Leaf::Text(Cow::Owned(n.to_string())),
        Some(Value::Bool(b)) => Leaf::Text(Cow::Owned(b.to_string())),
        Some(Value::Object(map)) => match map.get(TEXT_KEY) {
            Some(Value::String(s)) => Leaf::Text(Cow::Borrowed(s)),
            Some(_) => Leaf::Malformed("element text is not a string"),
            None if map.keys().all(|k| k == ATTR_KEY) => Leaf::Text(Cow::Borrowed("")),
            None => Leaf::Malformed("expected text, found nested elements"),
        },
        Some(Value::Array(_)) => Leaf::Malformed("expected a single value, found a repeated element"),
    }
}

/// Leaf text with the empty-string default. The second element is the
/// reason the value was discarded, if it was present but unusable.
pub fn coerce_text(value: Option<&Value>) -> (String, Option<&'static str>) {
    match leaf(value) {
        Leaf::Absent => (String::new(), None),
        Leaf::Text(text) => (text.into_owned(), None),
        Leaf::Malformed(reason) => (String::new(), Some(reason)),
    }
}

/// Numeric coercion: anything missing or not a finite number becomes zero.
pub fn coerce_number(value: Option<&Value>) -> (Decimal, Option<&'static str>) {
    let parsed = match value {
        Some(Value::Bool(b)) => Ok(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Some(Value::Number(n)) => number_to_decimal(n),
        other => match leaf(other) {
            Leaf::Absent => Ok(Decimal::ZERO),
            Leaf::Text(text) => parse_number(&text),
            Leaf::Malformed(reason) => Err(reason),
        },
    };
    match parsed {
        Ok(d) => (d, None),
        Err(reason) => (Decimal::ZERO, Some(reason)),
    }
}

fn number_to_decimal(n: &serde_json::Number) -> Result<Decimal, &'static str> {
    if let Some(i) = n.as_i64() {
        return Ok(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Decimal::from(u));
    }
    n.as_f64()
        .and_then(Decimal::from_f64_retain)
        .ok_or("number out of range")
}

/// Parse numeric text the way the bureau feed's consumers always have:
/// surrounding whitespace ignored, empty means zero, an optional sign,
/// decimal digits with optional fraction and exponent, or an unsigned
/// `0x`/`0o`/`0b` integer.
///
/// Grouping separators, `Infinity` and `NaN` are rejected.
pub fn parse_number(text: &str) -> Result<Decimal, &'static str> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }

    if let Some(value) = parse_prefixed_integer(s) {
        return value;
    }

    let (negative, unsigned) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err("not a number");
    }

    let canonical = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    let is_zero = canonical.bytes().all(|b| b == b'0' || b == b'.');

    let value = match exponent {
        None => Decimal::from_str(&canonical).map_err(|_| "number out of range")?,
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !all_digits(digits) {
                return Err("not a number");
            }
            let below_one = e.starts_with('-');
            // Past this magnitude the result is zero or beyond Decimal's range.
            let within_range = digits.trim_start_matches('0').len() <= 2;
            if is_zero || (below_one && !within_range) {
                Decimal::ZERO
            } else if !within_range {
                return Err("number out of range");
            } else {
                match Decimal::from_scientific(&format!("{canonical}e{}", e.trim_start_matches('+'))) {
                    Ok(v) => v,
                    // Underflow towards zero is still a finite number.
                    Err(_) if below_one => Decimal::ZERO,
                    Err(_) => return Err("number out of range"),
                }
            }
        }
    };

    let value = if negative { -value } else { value };
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(value.normalize())
}

fn parse_prefixed_integer(s: &str) -> Option<Result<Decimal, &'static str>> {
    let lower = s.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    let parsed = u64::from_str_radix(digits, radix);
    Some(match parsed {
        Ok(v) if !digits.starts_with('+') => Ok(Decimal::from(v)),
        Err(e) if matches!(e.kind(), std::num::IntErrorKind::PosOverflow) => {
            Err("number out of range")
        }
        _ => Err("not a number"),
    })
}
