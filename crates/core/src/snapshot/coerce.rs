//! Lenient field coercion for debugger payloads.
//!
//! The debugger serializes numbers as either JSON numbers or strings, booleans
//! as either `true` or `"true"`, and omits fields freely. Every helper here
//! accepts any JSON value and falls back to zero, `false` or `None` instead of
//! failing, so one malformed field never rejects a whole snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::latches::ForwardSource;

/// Parses the leading integer of `text`.
///
/// Accepts surrounding whitespace, an optional sign, and either decimal
/// digits or a `0x`/`0X` hexadecimal prefix. Parsing stops at the first
/// character that is not a digit, so `"12abc"` yields 12. Text without any
/// leading digit yields 0. Overflow saturates.
pub fn parse_int_prefix(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit))
        });

    if negative { -magnitude } else { magnitude }
}

/// Coerces any JSON value to a signed integer, defaulting to 0.
///
/// Floats truncate toward zero; non-finite floats, booleans, arrays and
/// objects yield 0.
pub fn to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(0),
        Value::String(text) => parse_int_prefix(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Coerces any JSON value to a non-negative count; negative values become 0.
pub fn to_u64(value: &Value) -> u64 {
    u64::try_from(to_i64(value)).unwrap_or(0)
}

/// Coerces a JSON value to a flag. Only `true` and `"true"` are truthy.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        _ => false,
    }
}

/// Coerces a JSON value to display text. Empty strings count as absent.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_i64(&value))
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_u64(&value))
}

pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_bool(&value))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_text(&value))
}

pub(crate) fn lenient_forward<'de, D>(deserializer: D) -> Result<ForwardSource, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer)
        .map(|value| value.as_str().map_or(ForwardSource::None, ForwardSource::parse))
}

/// Deserializes a nested section, replacing anything that is not a usable
/// object with the section's default.
pub(crate) fn lenient_section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserializes an optional nested section; non-objects become `None`.
pub(crate) fn lenient_optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        Ok(T::deserialize(value).ok())
    } else {
        Ok(None)
    }
}
