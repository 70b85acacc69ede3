use crate::runtime::{
    abi::{CallFrame, Procedure},
    error::RuntimeResult,
    value::Value,
    Runtime,
};

pub const PRINT: &str = "print";

/// Predefined bindings visible to every program. Immutable once built.
pub struct Builtins {
    entries: Vec<(&'static str, Value)>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        Self {
            entries: vec![(PRINT, print())],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }

    pub fn is_builtin_name(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

/// The `print` sub: renders every argument, space separated, then a newline.
pub fn print() -> Value {
    Value::Procedure(Procedure::new(print_args).named(PRINT))
}

fn print_args(rt: &mut Runtime, frame: CallFrame<'_>) -> RuntimeResult<()> {
    let precision = rt.config().precision;
    let mut line = String::new();
    for (idx, arg) in frame.args.iter().enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        line.push_str(&arg.render(precision));
    }
    line.push('\n');
    rt.write_stdout(&line)
}
