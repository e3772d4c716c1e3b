//! Type inference for unquoted values.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::EnvValue;

static FLOAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("float pattern is valid"));

/// Maps a raw unquoted value to a typed [`EnvValue`].
///
/// Checks run in a fixed order and the first match wins: null, boolean,
/// float, integer, string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeDetector {
    empty_as_null: bool,
}

impl TypeDetector {
    #[must_use]
    pub const fn new(empty_as_null: bool) -> Self {
        Self { empty_as_null }
    }

    #[must_use]
    pub const fn empty_as_null(&self) -> bool {
        self.empty_as_null
    }

    #[must_use]
    pub fn detect(&self, raw: &str) -> EnvValue {
        if raw.eq_ignore_ascii_case("null") || (self.empty_as_null && raw.is_empty()) {
            return EnvValue::Null;
        }

        if let Some(b) = detect_bool(raw) {
            return EnvValue::Bool(b);
        }

        if FLOAT_REGEX.is_match(raw)
            && let Ok(f) = raw.parse::<f64>()
        {
            return EnvValue::Float(f);
        }

        if let Some(i) = detect_int(raw) {
            return EnvValue::Int(i);
        }

        EnvValue::Str(raw.to_owned())
    }
}

fn detect_bool(raw: &str) -> Option<bool> {
    let lower = raw.to_ascii_lowercase();
    match lower.as_str() {
        "ok" | "true" | "yes" | "y" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

fn detect_int(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    // All zeros ("0", "000") strip down to nothing.
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some(0);
    }
    match trimmed.parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(i) => Some(i),
    }
}
