// ABOUTME: Parser for inline `@(key=value, ...)` annotation lines
// ABOUTME: Coerces values and layers them onto a cloned page configuration

use crate::errors::{Result, SlideError};
use crate::option::{PageOption, StyleValue};
use once_cell::sync::Lazy;
use regex::Regex;

static DECO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*@\((.*?)\)\s*$").expect("valid deco regex"));
static DECO_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\-]+)\s*=\s*([^,]+)(?:,|$)").expect("valid pair regex"));

/// Parses a deco line and returns a new configuration with its pairs applied.
///
/// Starts from a clone of `base_option`, or from the default configuration
/// when none is given. The input configuration is never modified.
pub fn parse_deco(line: &str, base_option: Option<&PageOption>) -> Result<PageOption> {
    let pairs = parse_deco_pairs(line)?;
    match base_option {
        Some(base) => base.with_overrides(pairs),
        None => PageOption::default().with_overrides(pairs),
    }
}

/// Splits a deco line into its `(key, coerced value)` pairs, in source order.
pub fn parse_deco_pairs(line: &str) -> Result<Vec<(String, StyleValue)>> {
    let content = DECO
        .captures(line)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            SlideError::FormatError(format!("Input line should contain a deco, '{}' received", line))
        })?
        .as_str();

    Ok(DECO_PAIR
        .captures_iter(content)
        .map(|caps| {
            let key = caps[1].trim().to_string();
            let value = parse_value(rm_quotes(caps[2].trim()));
            (key, value)
        })
        .collect())
}

fn rm_quotes(s: &str) -> &str {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Coerces a raw string into a typed value.
///
/// `true`/`false` in any case become booleans, all-digit strings become
/// integers, strings with digits around a single `.` become floats, and
/// everything else stays a string.
pub fn parse_value(value: &str) -> StyleValue {
    if value.eq_ignore_ascii_case("true") {
        return StyleValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return StyleValue::Bool(false);
    }
    if is_all_digits(value) {
        if let Ok(i) = value.parse::<i64>() {
            return StyleValue::Int(i);
        }
    }
    if is_all_digits(&value.replacen('.', "", 1)) {
        if let Ok(x) = value.parse::<f64>() {
            return StyleValue::Float(x);
        }
    }
    StyleValue::Str(value.to_string())
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
