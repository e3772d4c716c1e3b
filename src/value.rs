use std::collections::HashMap;
use std::fmt;

/// A typed value produced for one assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl EnvValue {
    /// Short type label used by diagnostics and the CLI.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text published to an environment or substituted by interpolation.
    ///
    /// Identical to the `Display` form except that `Null` becomes the
    /// empty string.
    #[must_use]
    pub fn to_env_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            // Keep a fractional part so the value reads back as a float.
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for EnvValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Ordered mapping from variable name to value.
///
/// Iteration follows first insertion. Re-inserting an existing key
/// replaces its value in place.
///
/// Each entry also remembers whether its value came from (or should be
/// written as) a quoted literal. The flag only affects serialization and
/// is ignored by equality.
#[derive(Debug, Clone, Default)]
pub struct EnvMap {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: EnvValue,
    quoted: bool,
}

impl EnvMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: EnvValue) -> Option<EnvValue> {
        self.insert_entry(key.into(), value, false)
    }

    /// Like [`insert`](Self::insert), but marks the value as quoted so
    /// string values are always written back inside quotes.
    pub fn insert_quoted(&mut self, key: impl Into<String>, value: EnvValue) -> Option<EnvValue> {
        self.insert_entry(key.into(), value, true)
    }

    fn insert_entry(&mut self, key: String, value: EnvValue, quoted: bool) -> Option<EnvValue> {
        if let Some(&idx) = self.index.get(&key) {
            let entry = &mut self.entries[idx];
            entry.quoted = quoted;
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry { key, value, quoted });
        None
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.index.get(key).map(|&idx| &self.entries[idx].value)
    }

    /// Whether `key` holds a quoted value. False for missing keys.
    #[must_use]
    pub fn is_quoted(&self, key: &str) -> bool {
        self.index
            .get(key)
            .is_some_and(|&idx| self.entries[idx].quoted)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

impl PartialEq for EnvMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, EnvValue)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, EnvValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_position() {
        let mut map = EnvMap::new();
        map.insert("A", EnvValue::Int(1));
        map.insert("B", EnvValue::Int(2));
        let prev = map.insert("A", EnvValue::Int(3));
        assert_eq!(prev, Some(EnvValue::Int(1)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(&EnvValue::Int(3)));
    }

    #[test]
    fn quoted_flag_follows_last_insert() {
        let mut map = EnvMap::new();
        map.insert_quoted("A", EnvValue::from("x"));
        assert!(map.is_quoted("A"));
        map.insert("A", EnvValue::from("y"));
        assert!(!map.is_quoted("A"));
        assert!(!map.is_quoted("MISSING"));
    }

    #[test]
    fn equality_ignores_quoted_flag() {
        let mut quoted = EnvMap::new();
        quoted.insert_quoted("A", EnvValue::from("x"));
        let plain: EnvMap = [("A", EnvValue::from("x"))].into_iter().collect();
        assert_eq!(quoted, plain);
    }

    #[test]
    fn display_forms() {
        assert_eq!(EnvValue::Null.to_string(), "null");
        assert_eq!(EnvValue::Bool(true).to_string(), "true");
        assert_eq!(EnvValue::Int(-4).to_string(), "-4");
        assert_eq!(EnvValue::Float(1.65).to_string(), "1.65");
        assert_eq!(EnvValue::Float(2.0).to_string(), "2.0");
        assert_eq!(EnvValue::from("x y").to_string(), "x y");
    }

    #[test]
    fn env_string_of_null_is_empty() {
        assert_eq!(EnvValue::Null.to_env_string(), "");
        assert_eq!(EnvValue::Bool(false).to_env_string(), "false");
    }

    #[test]
    fn accessors() {
        assert_eq!(EnvValue::Int(7).as_int(), Some(7));
        assert_eq!(EnvValue::Int(7).as_str(), None);
        assert_eq!(EnvValue::from("s").as_str(), Some("s"));
        assert_eq!(EnvValue::Float(0.5).as_float(), Some(0.5));
        assert_eq!(EnvValue::Bool(true).as_bool(), Some(true));
        assert!(EnvValue::Null.is_null());
        assert_eq!(EnvValue::Float(0.5).type_name(), "float");
    }
}
