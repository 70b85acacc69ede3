//! Calling convention for natives bound into the language.
//!
//! A native is a Rust closure receiving the host [`Runtime`] and a
//! [`CallFrame`]. Whatever the closure captures is its context; copies of the
//! callable value share it through an `Rc` rather than duplicating it.

use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    value::Value,
    Runtime,
};
use std::fmt;
use std::rc::Rc;

type ProcedureFn = dyn Fn(&mut Runtime, CallFrame<'_>) -> RuntimeResult<()>;
type FunctionFn = dyn Fn(&mut Runtime, CallFrame<'_>) -> RuntimeResult<Value>;

/// Where a call appears. Only functions may produce an expression result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallSite {
    Expression,
    Statement,
}

/// Arguments of a single invocation plus the callable being invoked, so a
/// native can recurse through `this`.
#[derive(Clone, Copy)]
pub struct CallFrame<'a> {
    pub args: &'a [Value],
    pub this: &'a Value,
}

impl<'a> CallFrame<'a> {
    pub fn argc(&self) -> usize {
        self.args.len()
    }

    pub fn arg(&self, idx: usize) -> Option<&'a Value> {
        self.args.get(idx)
    }

    pub fn expect_arity(&self, expected: usize) -> RuntimeResult<()> {
        if self.argc() != expected {
            Err(RuntimeError::ArityMismatch {
                expected,
                received: self.argc(),
            })
        } else {
            Ok(())
        }
    }
}

/// Native run for effect only (`sub`).
#[derive(Clone)]
pub struct Procedure {
    name: Option<Rc<str>>,
    target: Rc<ProcedureFn>,
}

impl Procedure {
    pub fn new<F>(target: F) -> Self
    where
        F: Fn(&mut Runtime, CallFrame<'_>) -> RuntimeResult<()> + 'static,
    {
        Self {
            name: None,
            target: Rc::new(target),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Rc::from(name));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn same_target(&self, other: &Procedure) -> bool {
        Rc::ptr_eq(&self.target, &other.target)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Procedure({})", self.name().unwrap_or("<anonymous>"))
    }
}

/// Native producing a value (`func`).
#[derive(Clone)]
pub struct Function {
    name: Option<Rc<str>>,
    target: Rc<FunctionFn>,
}

impl Function {
    pub fn new<F>(target: F) -> Self
    where
        F: Fn(&mut Runtime, CallFrame<'_>) -> RuntimeResult<Value> + 'static,
    {
        Self {
            name: None,
            target: Rc::new(target),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Rc::from(name));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn same_target(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.target, &other.target)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name().unwrap_or("<anonymous>"))
    }
}

impl Value {
    /// Invokes this value. A procedure at a statement site yields the
    /// placeholder `Boolean(false)`; at an expression site it is rejected
    /// before running.
    pub fn invoke(
        &self,
        rt: &mut Runtime,
        args: &[Value],
        site: CallSite,
    ) -> RuntimeResult<Value> {
        let frame = CallFrame { args, this: self };
        match self {
            Value::Function(function) => {
                log::trace!(
                    "call func {} with {} args",
                    function.name().unwrap_or("<anonymous>"),
                    args.len()
                );
                (function.target)(rt, frame)
            }
            Value::Procedure(procedure) => {
                if site == CallSite::Expression {
                    return Err(RuntimeError::SubroutineInExpression);
                }
                log::trace!(
                    "call sub {} with {} args",
                    procedure.name().unwrap_or("<anonymous>"),
                    args.len()
                );
                (procedure.target)(rt, frame)?;
                Ok(Value::default())
            }
            other => Err(RuntimeError::InvalidCall {
                type_name: other.type_name(),
            }),
        }
    }

    /// Call whose result is used as an expression.
    pub fn call(&self, rt: &mut Runtime, args: &[Value]) -> RuntimeResult<Value> {
        self.invoke(rt, args, CallSite::Expression)
    }

    pub fn call_for_effect(&self, rt: &mut Runtime, args: &[Value]) -> RuntimeResult<()> {
        self.invoke(rt, args, CallSite::Statement).map(|_| ())
    }
}
