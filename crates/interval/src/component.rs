//! Components: immutable keyed attribute bags describing what an interval
//! contains (lithology, colour, grain size, ...).

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single attribute value.
///
/// Numbers compare and hash bitwise (`f64::to_bits`), and order via
/// `f64::total_cmp`, so a `Value` is usable inside map keys and as part of a
/// Markov state. The practical consequence is that `NaN == NaN` and
/// `0.0 != -0.0` here, unlike IEEE comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean flag, e.g. `"net": true`.
    Bool(bool),
    /// A numeric attribute, e.g. `"porosity": 0.23`.
    Number(f64),
    /// A textual attribute, e.g. `"lithology": "sandstone"`.
    Text(String),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.to_bits().hash(state),
            Value::Text(t) => t.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(t) => write!(f, "{t}"),
        }
    }
}

/// An immutable, ordered mapping of attribute names to values.
///
/// Two components are equal iff their full key-value sets are equal, so a
/// component is a value type: hashable, orderable, and safe to use as a
/// dictionary key or Markov state. Keys iterate in sorted order.
///
/// # Example
///
/// ```
/// use strata_interval::Component;
///
/// let sst = Component::new()
///     .with("lithology", "sandstone")
///     .with("colour", "grey");
/// assert_eq!(sst.get_text("lithology"), Some("sandstone"));
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Component {
    attrs: BTreeMap<String, Value>,
}

impl Component {
    /// Creates an empty component.
    ///
    /// The empty component stands in for "no classification" wherever a
    /// component is required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this component with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Returns the boolean value for `key`, if present and boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.attrs.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value for `key`, if present and numeric.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.attrs.get(key) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value for `key`, if present and textual.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.attrs.get(key) {
            Some(Value::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns true if the component has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A short human-readable summary: the attribute values joined by
    /// commas, in key order. Empty components summarize as `"(none)"`.
    pub fn summary(&self) -> String {
        if self.attrs.is_empty() {
            return "(none)".to_string();
        }
        self.attrs
            .values()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<(String, Value)> for Component {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}
