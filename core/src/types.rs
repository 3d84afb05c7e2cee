//! Switch type definitions and resolved values.
//!
//! This module defines the scalar vocabulary shared by the spec builder, the
//! tokenizer and the reconciler. Values serialize untagged, so a resolved
//! value map reads as plain JSON or YAML scalars.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a switch.
///
/// Determines whether the tokenizer expects a value after the flag and how a
/// supplied value is coerced.
///
/// # Examples
///
/// ```
/// use commando_core::SwitchType;
///
/// assert!(!SwitchType::Boolean.takes_value());
/// assert!(!SwitchType::Count.takes_value());
/// assert!(SwitchType::Integer.takes_value());
/// assert_eq!(SwitchType::Float.to_string(), "float");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchType {
    /// Bare flag, `true` when present.
    Boolean,
    /// Bare flag counted once per occurrence (e.g. `-vvv`).
    Count,
    /// Signed 64-bit integer value.
    Integer,
    /// 64-bit floating point value.
    Float,
    /// Free-form string value.
    String,
}

impl SwitchType {
    /// Returns `true` if the switch consumes one argument value.
    pub fn takes_value(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::String)
    }

    /// Returns `true` if `value` has the variant this type produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use commando_core::{SwitchType, Value};
    ///
    /// assert!(SwitchType::String.accepts(&Value::from("abc")));
    /// assert!(!SwitchType::Integer.accepts(&Value::from("abc")));
    /// ```
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Boolean, Value::Bool(_))
                | (Self::Count, Value::Count(_))
                | (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_))
                | (Self::String, Value::String(_))
        )
    }

    /// Coerces a raw string into a value of this type.
    ///
    /// Returns `None` when the text is not a valid literal for the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use commando_core::{SwitchType, Value};
    ///
    /// assert_eq!(SwitchType::Integer.coerce("-12"), Some(Value::Integer(-12)));
    /// assert_eq!(SwitchType::Boolean.coerce("false"), Some(Value::Bool(false)));
    /// assert_eq!(SwitchType::Float.coerce("abc"), None);
    /// ```
    pub fn coerce(self, raw: &str) -> Option<Value> {
        match self {
            Self::Boolean => match raw {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Self::Count => raw.parse().ok().map(Value::Count),
            Self::Integer => raw.parse().ok().map(Value::Integer),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            Self::String => Some(Value::String(raw.to_string())),
        }
    }
}

impl fmt::Display for SwitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Count => "count",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// A resolved switch value.
///
/// Serialized untagged, so `Value::Integer(3)` is the JSON number `3` and
/// `Value::String("abc")` is the JSON string `"abc"`. When deserializing,
/// non-negative integers become [`Value::Integer`]; counts only arise from
/// the tokenizer or from typed defaults.
///
/// # Examples
///
/// ```
/// use commando_core::Value;
///
/// assert_eq!(Value::from("abc").literal(), "\"abc\"");
/// assert_eq!(Value::from(3_i64).literal(), "3");
/// assert_eq!(Value::from(true).as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag state.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Occurrence count.
    Count(u64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns the canonical literal form used in help text.
    ///
    /// Strings are double-quoted with JSON escaping; numbers and booleans are
    /// rendered bare. Non-finite floats have no JSON form and render as
    /// `NaN`, `inf` or `-inf`.
    pub fn literal(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Count(c) => c.to_string(),
            Self::Float(f) if !f.is_finite() => f.to_string(),
            Self::Float(f) => serde_json::Value::from(*f).to_string(),
            Self::String(s) => serde_json::Value::String(s.clone()).to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a signed integer (counts convert when in range).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Count(c) => i64::try_from(*c).ok(),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the value as a float (integers widen).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Re-types a loosely deserialized value to match `ty` where lossless.
    ///
    /// Spec documents cannot distinguish a count default from an integer
    /// default, nor a whole-number float from an integer. Returns `None` when
    /// no lossless conversion exists.
    pub fn conform(self, ty: SwitchType) -> Option<Value> {
        match (ty, self) {
            (SwitchType::Count, Value::Integer(i)) => u64::try_from(i).ok().map(Value::Count),
            (SwitchType::Float, Value::Integer(i)) => Some(Value::Float(i as f64)),
            (SwitchType::Integer, Value::Count(c)) => i64::try_from(c).ok().map(Value::Integer),
            (ty, value) if ty.accepts(&value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            other => f.write_str(&other.literal()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u64> for Value {
    fn from(c: u64) -> Self {
        Self::Count(c)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Read-only view of one switch assembled from a [`SwitchSpec`](crate::SwitchSpec).
///
/// # Examples
///
/// ```
/// use commando_core::{SwitchOptions, SwitchSpec, SwitchType};
///
/// let spec = SwitchSpec::new("tool").add_switch(
///     "depth",
///     SwitchType::Integer,
///     "Traversal depth",
///     SwitchOptions::new().alias("d").required(),
/// );
/// let depth = spec.switch("depth").unwrap();
/// assert_eq!(depth.aliases, vec!["d"]);
/// assert!(depth.required);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Switch<'a> {
    /// Canonical long-form name.
    pub name: &'a str,
    /// Declared type.
    pub switch_type: SwitchType,
    /// Help description (empty when none was recorded).
    pub description: &'a str,
    /// Default injected when the switch is absent.
    pub default: Option<&'a Value>,
    /// Short-form aliases in registration order.
    pub aliases: Vec<&'a str>,
    /// Whether absence is an error.
    pub required: bool,
}
