//! Values on the right-hand side of a comparison.

use crate::error::{PatternError, PatternResult};

/// A scalar literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "snake_case"))]
pub enum Value {
    /// String literal: `'text'`
    String(String),
    /// Integer literal: `42`
    Integer(i64),
    /// Floating point literal: `4.2`
    Float(f64),
    /// Boolean literal: `true`
    Boolean(bool),
    /// Timestamp literal: `t'2016-01-01T00:00:00Z'`
    Timestamp(String),
    /// Hex literal: `h'ff00'`
    Hex(String),
    /// Base64 binary literal: `b'AAEC'`
    Binary(String),
}

impl Value {
    /// The literal without quotes or kind prefix.
    fn raw(&self) -> String {
        match self {
            Value::String(s) | Value::Timestamp(s) | Value::Hex(s) | Value::Binary(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

/// Writes `prefix'text'`, escaping quotes and backslashes.
fn write_quoted(f: &mut std::fmt::Formatter<'_>, prefix: &str, text: &str) -> std::fmt::Result {
    use std::fmt::Write;

    f.write_str(prefix)?;
    f.write_char('\'')?;
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    f.write_char('\'')
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write_quoted(f, "", s),
            Value::Timestamp(s) => write_quoted(f, "t", s),
            Value::Hex(s) => write_quoted(f, "h", s),
            Value::Binary(s) => write_quoted(f, "b", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Lifecycle state of a [`ValueSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SetState {
    /// Values may still be appended.
    #[default]
    Open,
    /// The set is final. Never reopened.
    Closed,
}

/// Ordered set literal used with `IN`, `ISSUBSET` and `ISSUPERSET`.
///
/// A set starts open while a parser fills it and is closed once the literal
/// ends. Appending to a closed set is an error.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSet {
    values: Vec<Value>,
    state: SetState,
}

impl ValueSet {
    /// Creates an empty, open set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed set holding `values` in order.
    pub fn closed<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            state: SetState::Closed,
        }
    }

    /// Appends a value while the set is open.
    pub fn append(&mut self, value: impl Into<Value>) -> PatternResult<()> {
        match self.state {
            SetState::Open => {
                self.values.push(value.into());
                Ok(())
            }
            SetState::Closed => {
                let value = value.into();
                log::debug!("rejected append of {} to closed set", value);
                Err(PatternError::InvalidState(
                    "cannot append to a closed set".to_string(),
                ))
            }
        }
    }

    /// Closes the set. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.state == SetState::Open {
            log::trace!("closing value set with {} values", self.values.len());
        }
        self.state = SetState::Closed;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SetState {
        self.state
    }

    /// Returns true while values may be appended.
    pub fn is_open(&self) -> bool {
        self.state == SetState::Open
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates the values in insertion order.
    ///
    /// Each call starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Iterates the values rendered as plain strings, in insertion order.
    ///
    /// Unlike `Display`, strings come back unquoted and hex, binary and
    /// timestamp literals without their prefix.
    pub fn elements(&self) -> impl Iterator<Item = String> + '_ {
        self.values.iter().map(Value::raw)
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for ValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

/// The value side of a comparison: a scalar or a set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComparisonValue {
    /// Single literal.
    Scalar(Value),
    /// Set literal.
    Set(ValueSet),
}

impl ComparisonValue {
    /// Returns the scalar if this is one.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            ComparisonValue::Scalar(v) => Some(v),
            ComparisonValue::Set(_) => None,
        }
    }

    /// Returns the set if this is one.
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            ComparisonValue::Scalar(_) => None,
            ComparisonValue::Set(s) => Some(s),
        }
    }

    /// Returns true if this is a set.
    pub fn is_set(&self) -> bool {
        matches!(self, ComparisonValue::Set(_))
    }
}

impl std::fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonValue::Scalar(v) => write!(f, "{}", v),
            ComparisonValue::Set(s) => write!(f, "{}", s),
        }
    }
}

impl From<ValueSet> for ComparisonValue {
    fn from(set: ValueSet) -> Self {
        ComparisonValue::Set(set)
    }
}

impl From<Value> for ComparisonValue {
    fn from(value: Value) -> Self {
        ComparisonValue::Scalar(value)
    }
}

impl From<&str> for ComparisonValue {
    fn from(s: &str) -> Self {
        ComparisonValue::Scalar(s.into())
    }
}

impl From<String> for ComparisonValue {
    fn from(s: String) -> Self {
        ComparisonValue::Scalar(s.into())
    }
}

impl From<i64> for ComparisonValue {
    fn from(n: i64) -> Self {
        ComparisonValue::Scalar(n.into())
    }
}

impl From<i32> for ComparisonValue {
    fn from(n: i32) -> Self {
        ComparisonValue::Scalar(n.into())
    }
}

impl From<f64> for ComparisonValue {
    fn from(n: f64) -> Self {
        ComparisonValue::Scalar(n.into())
    }
}

impl From<bool> for ComparisonValue {
    fn from(b: bool) -> Self {
        ComparisonValue::Scalar(b.into())
    }
}
