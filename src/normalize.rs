//! String-to-number normalization for API payloads.
//!
//! Many fields arrive as strings (`"bid": "1.5"`, `"adjustedFlag": "False"`).
//! [`strvals_to_real`] walks a mapping and replaces every string leaf that is
//! a numeric, boolean or null literal with the corresponding JSON value.
//!
//! Recognized literals, after trimming surrounding ASCII whitespace (spaces,
//! tabs and line breaks):
//!
//! | Input | Output |
//! |---|---|
//! | `True`, `False` | boolean |
//! | `None` | `null` |
//! | `42`, `-7`, `1_000`, `0x1F`, `0o17`, `0b101` | integer |
//! | `1.5`, `.5`, `5.`, `-2e-3`, `1_0.0_1` | float |
//!
//! Anything else is left untouched, including `inf`/`nan`, integers with
//! leading zeros (`007`), integers outside the 64-bit range, and quoted or
//! bracketed text. Parentheses are not unwrapped either: `(1)` stays a
//! string. Only spaces and tabs may separate a sign from its digits. Since
//! converted leaves are no longer strings, running the walk twice gives the
//! same result as running it once.

use serde_json::{Number, Value};

use crate::types::market::RawMap;

/// Return a copy of `map` with string leaves converted where they parse as
/// literals. Nested mappings are walked; sequences are copied as-is.
pub fn strvals_to_real(map: &RawMap) -> RawMap {
    map.iter()
        .map(|(k, v)| (k.clone(), normalize_value(v)))
        .collect()
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => parse_literal(s).unwrap_or_else(|| value.clone()),
        Value::Object(map) => Value::Object(strvals_to_real(map)),
        other => other.clone(),
    }
}

/// Parse a single literal, or `None` if `s` is not one.
pub fn parse_literal(s: &str) -> Option<Value> {
    let s = s.trim_matches(|c: char| c.is_ascii_whitespace());
    match s {
        "True" => return Some(Value::Bool(true)),
        "False" => return Some(Value::Bool(false)),
        "None" => return Some(Value::Null),
        _ => {}
    }

    let (negative, body) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest.trim_start_matches(is_blank))
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest.trim_start_matches(is_blank))
    } else {
        (false, s)
    };

    parse_int(body, negative).or_else(|| parse_float(body, negative))
}

/// Whitespace allowed between a sign and its digits.
fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Digits of `radix` with single underscores between them.
fn is_digitpart(s: &str, radix: u32) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut prev_underscore = true;
    for c in s.chars() {
        if c == '_' {
            if prev_underscore {
                return false;
            }
            prev_underscore = true;
        } else if c.is_digit(radix) {
            prev_underscore = false;
        } else {
            return false;
        }
    }
    !prev_underscore
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|&c| c != '_').collect()
}

fn parse_int(body: &str, negative: bool) -> Option<Value> {
    let (radix, digits) = match body.get(..2) {
        Some("0x" | "0X") => (16, &body[2..]),
        Some("0o" | "0O") => (8, &body[2..]),
        Some("0b" | "0B") => (2, &body[2..]),
        _ => (10, body),
    };

    let clean = if radix == 10 {
        if !is_digitpart(digits, 10) {
            return None;
        }
        let clean = strip_underscores(digits);
        // "0", "000" are fine; "007" is not a literal
        if clean.len() > 1 && clean.starts_with('0') && clean.bytes().any(|b| b != b'0') {
            return None;
        }
        clean
    } else {
        // an underscore may follow the radix prefix directly: 0x_ff
        let rest = digits.strip_prefix('_').unwrap_or(digits);
        if !is_digitpart(rest, radix) {
            return None;
        }
        strip_underscores(rest)
    };

    let magnitude = i128::from_str_radix(&clean, radix).ok()?;
    let n = if negative { -magnitude } else { magnitude };
    if let Ok(i) = i64::try_from(n) {
        Some(Value::from(i))
    } else if let Ok(u) = u64::try_from(n) {
        Some(Value::from(u))
    } else {
        None
    }
}

fn parse_float(body: &str, negative: bool) -> Option<Value> {
    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    if let Some(exp) = exponent {
        let exp_digits = exp.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exp);
        if !is_digitpart(exp_digits, 10) {
            return None;
        }
    }

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            !(int.is_empty() && frac.is_empty())
                && (int.is_empty() || is_digitpart(int, 10))
                && (frac.is_empty() || is_digitpart(frac, 10))
        }
        // plain digits are only a float with an exponent ("1e5")
        None => exponent.is_some() && is_digitpart(mantissa, 10),
    };
    if !mantissa_ok {
        return None;
    }

    let f: f64 = strip_underscores(body).parse().ok()?;
    let f = if negative { -f } else { f };
    Number::from_f64(f).map(Value::Number)
}
