use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    value::Value,
};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    /// Operator name as it appears in diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq | BinaryOp::NotEq => "equality",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "'and'",
            BinaryOp::Or => "'or'",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundOp {
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
}

impl CompoundOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompoundOp::AddAssign => "+=",
            CompoundOp::SubAssign => "-=",
            CompoundOp::MulAssign => "*=",
            CompoundOp::DivAssign => "/=",
            CompoundOp::RemAssign => "%=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "'not'",
            UnaryOp::Neg => "'-'",
        }
    }
}

const INDEX_OP: &str = ":";

impl Value {
    /// Applies a non-mutating binary operator. Operands are left untouched and
    /// the result is always a fresh value.
    pub fn binary(&self, op: BinaryOp, rhs: &Value) -> RuntimeResult<Value> {
        use BinaryOp::*;
        match op {
            Add => self.eval_add(rhs),
            Sub => self.eval_numeric(op, rhs, |a, b| a - b),
            Mul => self.eval_numeric(op, rhs, |a, b| a * b),
            Div => self.eval_numeric(op, rhs, |a, b| a / b),
            // `%` on f64 truncates like C's fmod: the sign follows the dividend.
            Rem => self.eval_numeric(op, rhs, |a, b| a % b),
            Eq => Ok(Value::Boolean(self.values_equal(rhs)?)),
            NotEq => Ok(Value::Boolean(!self.values_equal(rhs)?)),
            Lt => self.eval_compare(op, rhs, Ordering::is_lt),
            LtEq => self.eval_compare(op, rhs, Ordering::is_le),
            Gt => self.eval_compare(op, rhs, Ordering::is_gt),
            GtEq => self.eval_compare(op, rhs, Ordering::is_ge),
            And => self.eval_logical(op, rhs, |a, b| a && b),
            Or => self.eval_logical(op, rhs, |a, b| a || b),
        }
    }

    /// Applies a compound assignment in place and hands back the receiver.
    /// On failure the receiver is unchanged.
    pub fn compound(&mut self, op: CompoundOp, rhs: &Value) -> RuntimeResult<&mut Value> {
        let mismatch = || RuntimeError::TypeMismatch { op: op.symbol() };
        match (&mut *self, rhs) {
            (Value::Number(a), Value::Number(b)) => match op {
                CompoundOp::AddAssign => *a += b,
                CompoundOp::SubAssign => *a -= b,
                CompoundOp::MulAssign => *a *= b,
                CompoundOp::DivAssign => *a /= b,
                CompoundOp::RemAssign => *a %= b,
            },
            (Value::String(a), Value::String(b)) if op == CompoundOp::AddAssign => {
                a.push_str(b)
            }
            (Value::List(a), Value::List(b)) if op == CompoundOp::AddAssign => {
                a.extend(b.iter().cloned())
            }
            _ => return Err(mismatch()),
        }
        Ok(self)
    }

    pub fn unary(&self, op: UnaryOp) -> RuntimeResult<Value> {
        match (op, self) {
            (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::InvalidOperand { op: op.symbol() }),
        }
    }

    pub fn add(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Add, rhs)
    }

    pub fn sub(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Sub, rhs)
    }

    pub fn mul(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Mul, rhs)
    }

    pub fn div(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Div, rhs)
    }

    pub fn rem(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Rem, rhs)
    }

    pub fn equals(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn not_equals(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::NotEq, rhs)
    }

    pub fn and(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::And, rhs)
    }

    pub fn or(&self, rhs: &Value) -> RuntimeResult<Value> {
        self.binary(BinaryOp::Or, rhs)
    }

    pub fn not(&self) -> RuntimeResult<Value> {
        self.unary(UnaryOp::Not)
    }

    pub fn neg(&self) -> RuntimeResult<Value> {
        self.unary(UnaryOp::Neg)
    }

    /// Reads `self[index]`, returning a copy of the element.
    pub fn index(&self, index: &Value) -> RuntimeResult<Value> {
        match (self, index) {
            (Value::List(items), Value::Number(n)) => {
                let slot = list_slot(items.len(), *n)?;
                Ok(items[slot].clone())
            }
            _ => Err(RuntimeError::TypeMismatch { op: INDEX_OP }),
        }
    }

    /// Replaces `self[index]` with `value`.
    pub fn set(&mut self, index: &Value, value: Value) -> RuntimeResult<()> {
        match (self, index) {
            (Value::List(items), Value::Number(n)) => {
                let slot = list_slot(items.len(), *n)?;
                items[slot] = value;
                Ok(())
            }
            _ => Err(RuntimeError::TypeMismatch { op: INDEX_OP }),
        }
    }

    fn eval_add(&self, rhs: &Value) -> RuntimeResult<Value> {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::String(joined))
            }
            (Value::List(a), Value::List(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(Value::List(joined))
            }
            _ => Err(RuntimeError::TypeMismatch {
                op: BinaryOp::Add.symbol(),
            }),
        }
    }

    fn eval_numeric<F>(&self, op: BinaryOp, rhs: &Value, apply: F) -> RuntimeResult<Value>
    where
        F: Fn(f64, f64) -> f64,
    {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
            _ => Err(RuntimeError::TypeMismatch { op: op.symbol() }),
        }
    }

    fn eval_compare<F>(&self, op: BinaryOp, rhs: &Value, accept: F) -> RuntimeResult<Value>
    where
        F: Fn(Ordering) -> bool,
    {
        let ordering = match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => return Err(RuntimeError::TypeMismatch { op: op.symbol() }),
        };
        // NaN is unordered, so every comparison against it is false.
        Ok(Value::Boolean(ordering.map(accept).unwrap_or(false)))
    }

    fn eval_logical<F>(&self, op: BinaryOp, rhs: &Value, apply: F) -> RuntimeResult<Value>
    where
        F: Fn(bool, bool) -> bool,
    {
        match (self, rhs) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(apply(*a, *b))),
            _ => Err(RuntimeError::TypeMismatch { op: op.symbol() }),
        }
    }

    /// A callable receiver cannot be compared. Any other cross-variant pair,
    /// a callable on the right included, is simply unequal.
    fn values_equal(&self, rhs: &Value) -> RuntimeResult<bool> {
        if self.is_callable() {
            return Err(RuntimeError::TypeMismatch {
                op: BinaryOp::Eq.symbol(),
            });
        }
        match (self, rhs) {
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Number(a), Value::Number(b)) => Ok(a == b),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
            (Value::List(a), Value::List(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (left, right) in a.iter().zip(b) {
                    if !left.values_equal(right)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Truncates `index` toward zero and bounds-checks it against `len`.
fn list_slot(len: usize, index: f64) -> RuntimeResult<usize> {
    let truncated = index.trunc();
    if truncated.is_nan() || truncated < 0.0 || truncated >= len as f64 {
        return Err(RuntimeError::IndexOutOfRange { index, len });
    }
    Ok(truncated as usize)
}
