//! Open attribute maps carried by nodes and arcs.
//!
//! Clients attach arbitrary `key = value` data to graph elements, typically
//! straight from the option block of a graph description
//! (`A -> B (weight=3, label="x")`). Values are a small tagged union so a
//! map can be compared, serialized and printed without knowing which keys a
//! client uses.

use std::collections::BTreeMap;
use std::fmt;

/// Sign of an [`AttrValue::Infinity`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

/// Typed attribute value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AttrValue {
    /// The `none` constant.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// `inf` / `-inf`.
    Infinity(Sign),
}

impl AttrValue {
    /// Numeric view of the value; infinities map to `f64::INFINITY` and
    /// `f64::NEG_INFINITY`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            AttrValue::Int(i) => Some(i as f64),
            AttrValue::Float(f) => Some(f),
            AttrValue::Infinity(Sign::Positive) => Some(f64::INFINITY),
            AttrValue::Infinity(Sign::Negative) => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            AttrValue::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            AttrValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Negate a numeric value; used when a `-` prefixes a number or `inf`.
    pub fn negated(self) -> Option<Self> {
        match self {
            AttrValue::Int(i) => i.checked_neg().map(AttrValue::Int),
            AttrValue::Float(f) => Some(AttrValue::Float(-f)),
            AttrValue::Infinity(Sign::Positive) => Some(AttrValue::Infinity(Sign::Negative)),
            AttrValue::Infinity(Sign::Negative) => Some(AttrValue::Infinity(Sign::Positive)),
            _ => None,
        }
    }
}

/// Renders the value in the syntax accepted by the option scanner, so a
/// printed map parses back to an equal one.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("none"),
            AttrValue::Bool(true) => f.write_str("true"),
            AttrValue::Bool(false) => f.write_str("false"),
            AttrValue::Int(i) => write!(f, "{i}"),
            // `{:?}` keeps a fractional part (`2.0`) so it reads back as a float.
            AttrValue::Float(x) => write!(f, "{x:?}"),
            AttrValue::Str(s) => write!(f, "{}", quote(s)),
            AttrValue::Infinity(Sign::Positive) => f.write_str("inf"),
            AttrValue::Infinity(Sign::Negative) => f.write_str("-inf"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        if x == f64::INFINITY {
            AttrValue::Infinity(Sign::Positive)
        } else if x == f64::NEG_INFINITY {
            AttrValue::Infinity(Sign::Negative)
        } else {
            AttrValue::Float(x)
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

/// Ordered attribute map; ordering keeps printing and comparisons stable.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Access to the attribute map of a graph element.
pub trait Attributed {
    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Look up a single attribute.
    fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes().get(key)
    }

    /// Set `key` to `value`, returning the previous value.
    fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue>
    where
        Self: Sized,
    {
        self.attributes_mut().insert(key.into(), value.into())
    }

    /// Apply every pair of `attrs` in order; later keys overwrite earlier ones.
    fn apply_attributes<I>(&mut self, attrs: I)
    where
        Self: Sized,
        I: IntoIterator<Item = (String, AttrValue)>,
    {
        let map = self.attributes_mut();
        for (k, v) in attrs {
            map.insert(k, v);
        }
    }
}

/// Format an attribute map as an option block body: `k1=v1, k2=v2`.
pub fn format_attributes(attrs: &Attributes) -> String {
    use itertools::Itertools;
    attrs
        .iter()
        .map(|(k, v)| format!("{}={}", format_key(k), v))
        .join(", ")
}

pub(crate) fn format_key(k: &str) -> String {
    let is_ident = k
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && k.chars().all(|c| c.is_alphanumeric() || c == '_');
    if is_ident { k.to_owned() } else { quote(k) }
}

pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
