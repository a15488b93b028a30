//! Option records for `toregex-core`.
//!
//! An [`Options`] value is a flat, ordered record of named values. Order is
//! significant: the cache key lists every entry in the order it was added, so
//! two records built in a different order compile to the same pattern but are
//! cached separately. Setting a name that is already present replaces the
//! value in place and keeps its position.
//!
//! Records can be built in code with the typed builder methods, or loaded from
//! YAML and JSON documents. Unknown names are kept as-is and carried through to
//! the cache key and the cache metadata.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

pub const CACHE: &str = "cache";
pub const CONTAINS: &str = "contains";
pub const NEGATE: &str = "negate";
pub const STRICT_NEGATE: &str = "strictNegate";
pub const STRICT: &str = "strict";
pub const STRICT_OPEN: &str = "strictOpen";
pub const STRICT_CLOSE: &str = "strictClose";
pub const FLAGS: &str = "flags";
pub const NOCASE: &str = "nocase";
pub const WRAP: &str = "wrap";
pub const STRICT_ERRORS: &str = "strictErrors";
pub const END_CHAR: &str = "endChar";

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    /// `false`, `0`, `NaN` and the empty string are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Int(n) => *n != 0,
            OptionValue::Float(f) => *f != 0.0 && !f.is_nan(),
            OptionValue::Str(s) => !s.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way it appears in a cache key.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Float(x) if x.is_nan() => f.write_str("NaN"),
            OptionValue::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Integral floats print without a fractional part ("2", not "2.0").
            OptionValue::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{}", *x as i64)
            }
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Int(n) => serializer.serialize_i64(*n),
            OptionValue::Float(x) => serializer.serialize_f64(*x),
            OptionValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = OptionValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean, number or string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(i64::try_from(v)
                    .map(OptionValue::Int)
                    .unwrap_or(OptionValue::Float(v as f64)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(OptionValue::Str(v))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// An ordered option record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Options::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name`, replacing an existing value in place or appending a new entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Returns the value of `name` only if it is a boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    /// `true` when `name` is exactly the boolean `true`.
    pub fn is_true(&self, name: &str) -> bool {
        self.get_bool(name) == Some(true)
    }

    /// `true` when `name` is exactly the boolean `false`.
    pub fn is_false(&self, name: &str) -> bool {
        self.get_bool(name) == Some(false)
    }

    /// `true` when `name` is present and truthy.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_truthy)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: a copy of `self` with every top-level entry of `source`
    /// written over it. Neither input is modified.
    pub fn extend(&self, source: Option<&Options>) -> Options {
        let mut merged = self.clone();
        if let Some(source) = source {
            for (name, value) in source.iter() {
                merged.set(name, value.clone());
            }
        }
        merged
    }

    pub fn cache(self, enabled: bool) -> Self {
        self.with(CACHE, enabled)
    }

    pub fn contains(self, enabled: bool) -> Self {
        self.with(CONTAINS, enabled)
    }

    pub fn negate(self, enabled: bool) -> Self {
        self.with(NEGATE, enabled)
    }

    pub fn strict_negate(self, enabled: bool) -> Self {
        self.with(STRICT_NEGATE, enabled)
    }

    pub fn strict(self, enabled: bool) -> Self {
        self.with(STRICT, enabled)
    }

    pub fn strict_open(self, enabled: bool) -> Self {
        self.with(STRICT_OPEN, enabled)
    }

    pub fn strict_close(self, enabled: bool) -> Self {
        self.with(STRICT_CLOSE, enabled)
    }

    pub fn flags(self, flags: &str) -> Self {
        self.with(FLAGS, flags)
    }

    pub fn nocase(self, enabled: bool) -> Self {
        self.with(NOCASE, enabled)
    }

    pub fn wrap(self, enabled: bool) -> Self {
        self.with(WRAP, enabled)
    }

    pub fn strict_errors(self, enabled: bool) -> Self {
        self.with(STRICT_ERRORS, enabled)
    }

    pub fn end_char(self, end_char: &str) -> Self {
        self.with(END_CHAR, end_char)
    }

    /// Parses an option record from a YAML mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text).context("Failed to parse options as YAML")
    }

    /// Parses an option record from a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse options as JSON")
    }

    /// Loads an option record from a file. Files ending in `.json` are read as
    /// JSON, everything else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading pattern options from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let options = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .with_context(|| format!("Failed to parse options file {}", path.display()))?;

        debug!("Loaded {} option(s) from {}.", options.len(), path.display());
        Ok(options)
    }
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = Options;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option names to values")
            }

            // Document order is kept, which keeps the cache key stable.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut options = Options::new();
                while let Some((name, value)) = access.next_entry::<String, OptionValue>()? {
                    options.set(name, value);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut options = Options::new().negate(true).flags("g");
        options.set(NEGATE, false);
        let names: Vec<&str> = options.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![NEGATE, FLAGS]);
        assert!(options.is_false(NEGATE));
    }

    #[test]
    fn test_extend_is_shallow_and_non_mutating() {
        let base = Options::new().strict(true).flags("i");
        let overrides = Options::new().flags("g").with("custom", 3);
        let merged = base.extend(Some(&overrides));

        assert_eq!(merged.get(FLAGS), Some(&OptionValue::from("g")));
        assert_eq!(merged.get("custom"), Some(&OptionValue::Int(3)));
        assert_eq!(base.get(FLAGS), Some(&OptionValue::from("i")));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_truthiness() {
        assert!(!OptionValue::from("").is_truthy());
        assert!(!OptionValue::Int(0).is_truthy());
        assert!(!OptionValue::Float(f64::NAN).is_truthy());
        assert!(OptionValue::from("0").is_truthy());
        assert!(OptionValue::Float(0.5).is_truthy());
    }

    #[test]
    fn test_display_coercion() {
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
        assert_eq!(OptionValue::Float(2.0).to_string(), "2");
        assert_eq!(OptionValue::Float(0.25).to_string(), "0.25");
        assert_eq!(OptionValue::Float(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn test_json_keeps_document_order() -> Result<()> {
        let options = Options::from_json_str(r#"{"strictErrors": false, "contains": true, "flags": "i"}"#)?;
        let names: Vec<&str> = options.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![STRICT_ERRORS, CONTAINS, FLAGS]);
        Ok(())
    }

    #[test]
    fn test_rejects_nested_values() {
        assert!(Options::from_json_str(r#"{"flags": ["i"]}"#).is_err());
    }
}
