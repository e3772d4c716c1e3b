//! Serializes an [`EnvMap`] back into `.env` text.
//!
//! Each pair becomes one `KEY=VALUE` line; lines are joined with `\n`.
//! String values are quoted whenever the bare text would not read back
//! as the same string.

use std::borrow::Cow;

use crate::detect::TypeDetector;
use crate::token::{CARRIAGE_RETURN, COMMENT, NEW_LINE, QUOTE_END, QUOTE_START, SPACE};
use crate::value::{EnvMap, EnvValue};

/// Format an `EnvMap` as `.env` text.
///
/// Entries flagged as quoted keep their quotes.
#[must_use]
pub fn format(envs: &EnvMap) -> String {
    envs.iter()
        .map(|(key, value)| format_line(key, value, envs.is_quoted(key)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single `KEY=VALUE` line without a line terminator.
#[must_use]
pub fn format_entry(key: &str, value: &EnvValue) -> String {
    format_line(key, value, false)
}

fn format_line(key: &str, value: &EnvValue, quoted: bool) -> String {
    format!("{key}={}", format_value(value, quoted))
}

fn format_value(value: &EnvValue, quoted: bool) -> Cow<'_, str> {
    match (quoted_text(value, quoted), value) {
        (Some(s), _) => Cow::Owned(quote(s)),
        (None, EnvValue::Str(s)) => Cow::Borrowed(s),
        (None, other) => Cow::Owned(other.to_string()),
    }
}

/// The text that will be written between quotes, if any.
fn quoted_text(value: &EnvValue, quoted: bool) -> Option<&str> {
    match value {
        EnvValue::Str(s) if quoted || needs_quotes(s) => Some(s),
        _ => None,
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(QUOTE_START);
    out.push_str(s);
    out.push(QUOTE_END);
    out
}

/// Whether `value` survives a format/parse round trip.
///
/// Quoted text cannot contain a quote character or an interpolation
/// marker, since neither can be escaped.
#[must_use]
pub fn is_representable(value: &EnvValue) -> bool {
    representable(value, false)
}

/// First key in `envs` whose value would not read back unchanged.
#[must_use]
pub fn find_unrepresentable(envs: &EnvMap) -> Option<&str> {
    envs.iter()
        .find(|(key, value)| !representable(value, envs.is_quoted(key)))
        .map(|(key, _)| key)
}

fn representable(value: &EnvValue, quoted: bool) -> bool {
    quoted_text(value, quoted).is_none_or(|s| !s.contains(QUOTE_END) && !s.contains("${"))
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(QUOTE_START)
        || s.contains([SPACE, COMMENT, NEW_LINE, CARRIAGE_RETURN])
        || TypeDetector::default().detect(s).as_str() != Some(s)
}
