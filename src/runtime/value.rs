use crate::runtime::{
    abi::{Function, Procedure},
    error::{RuntimeError, RuntimeResult},
};
use std::fmt;

/// Decimal places used when no configuration overrides them (`1.000000`).
pub const DEFAULT_PRECISION: usize = 6;

/// The universal runtime datum. Exactly one variant is active; the default is
/// `Boolean(false)`.
///
/// `String` and `List` payloads are exclusively owned, so `clone` is a deep
/// copy. Callables share their captured context between copies.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    List(Vec<Value>),
    Procedure(Procedure),
    Function(Function),
}

impl Default for Value {
    fn default() -> Self {
        Value::Boolean(false)
    }
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Moves the payload out, leaving `Boolean(false)` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Replaces whatever this value held with a number, dropping any owned
    /// string or list storage.
    pub fn assign_number(&mut self, number: f64) -> &mut Self {
        *self = Value::Number(number);
        self
    }

    pub fn as_condition(&self) -> RuntimeResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(RuntimeError::InvalidCondition),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Procedure(_) | Value::Function(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Procedure(_) => "sub",
            Value::Function(_) => "func",
        }
    }

    /// Text rendering with numbers printed to `precision` decimal places.
    pub fn render(&self, precision: usize) -> String {
        Rendered {
            value: self,
            precision,
        }
        .to_string()
    }

    pub fn rendered(&self, precision: usize) -> Rendered<'_> {
        Rendered {
            value: self,
            precision,
        }
    }
}

/// Display adapter carrying the number precision down into nested lists.
pub struct Rendered<'a> {
    value: &'a Value,
    precision: usize,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::String(v) => write!(f, "{v}"),
            Value::Number(v) => write_number(f, *v, self.precision),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::List(items) => {
                write!(f, "{{")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.rendered(self.precision))?;
                }
                write!(f, "}}")
            }
            Value::Procedure(_) => write!(f, "sub"),
            Value::Function(_) => write!(f, "func"),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, number: f64, precision: usize) -> fmt::Result {
    if number.is_nan() {
        write!(f, "nan")
    } else if number.is_infinite() {
        write!(f, "{}", if number > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(f, "{:.*}", precision, number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered(DEFAULT_PRECISION))
    }
}

/// Host-side structural comparison. Callables compare by identity; the
/// language-level `==` lives in `ops` and rejects them instead.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Procedure(a), Value::Procedure(b)) => a.same_target(b),
            (Value::Function(a), Value::Function(b)) => a.same_target(b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Procedure> for Value {
    fn from(value: Procedure) -> Self {
        Value::Procedure(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::list([
            Value::Number(1.0),
            Value::string("a"),
            Value::list([Value::Boolean(true)]),
        ])
    }

    #[test]
    fn default_is_false() {
        assert_eq!(Value::default(), Value::Boolean(false));
    }

    #[test]
    fn clone_is_deep() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy.render(6), original.render(6));
        if let Value::List(items) = &mut copy {
            items.push(Value::Number(9.0));
            if let Value::String(s) = &mut items[1] {
                s.push('z');
            }
        }
        assert_eq!(original.render(6), "{1.000000, a, {true}}");
        assert_eq!(copy.render(6), "{1.000000, az, {true}, 9.000000}");
    }

    #[test]
    fn take_resets_source() {
        let mut source = Value::string("moved");
        let before = source.render(6);
        let dest = source.take();
        assert_eq!(source, Value::Boolean(false));
        assert_eq!(dest.render(6), before);
    }

    #[test]
    fn assign_number_replaces_payload() {
        let mut value = sample();
        value.assign_number(2.5);
        assert_eq!(value, Value::Number(2.5));
    }

    #[test]
    fn renders_each_variant() {
        assert_eq!(Value::list([Value::from(1.0), Value::from("a")]).to_string(), "{1.000000, a}");
        assert_eq!(Value::List(Vec::new()).to_string(), "{}");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::Number(-0.5).render(2), "-0.50");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Number(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Number(3.0).render(0), "3");
    }

    #[test]
    fn only_booleans_are_conditions() {
        assert_eq!(Value::Boolean(true).as_condition(), Ok(true));
        assert_eq!(
            Value::Number(1.0).as_condition(),
            Err(RuntimeError::InvalidCondition)
        );
        assert_eq!(
            Value::string("true").as_condition(),
            Err(RuntimeError::InvalidCondition)
        );
    }
}
