//! Dynamic values passed to and returned from subject operations.
//!
//! Transition arguments, guard results and configuration-supplied guard or
//! action values are all carried as [`Value`]. Truthiness follows a narrow
//! rule: only [`Value::Nil`] and `Value::Bool(false)` are falsy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed argument or result.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Interned-style name, rendered as `:name`. Serializes as a plain string.
    Symbol(String),
}

impl Value {
    /// Create a symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Whether this value lets a guard pass.
    ///
    /// `0`, empty strings and empty collections are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Runtime type name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Symbol(_) => "symbol",
        }
    }

    /// The name carried by a string or symbol.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Str(name) | Value::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

/// Renders a slice of values as a list literal, e.g. `[5, :now]`.
pub struct Arguments<'a>(pub &'a [Value]);

impl fmt::Display for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::List(items) => write!(f, "{}", Arguments(items)),
            Value::Map(entries) => {
                if entries.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?} => {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Floats always carry a fractional part or an exponent: `1.0`, `2.5`,
/// `1.0e+20`, `1.0e-05`. Non-finite values render as `Infinity`,
/// `-Infinity` and `NaN`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }

    // Debug gives the shortest round-trip digits and switches to exponent
    // form below 1e-4 and from 1e16 upward.
    let repr = format!("{x:?}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return f.write_str(&repr);
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    let fraction = if mantissa.contains('.') { "" } else { ".0" };
    write!(f, "{mantissa}{fraction}e{sign}{digits:0>2}")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
