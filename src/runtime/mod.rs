pub mod abi;
pub mod builtins;
pub mod error;
pub mod ops;
pub mod platform;
pub mod value;

pub use abi::{CallFrame, CallSite, Function, Procedure};
pub use error::{ErrorKind, RuntimeError, RuntimeResult};
pub use ops::{BinaryOp, CompoundOp, UnaryOp};
pub use value::Value;

use crate::config::{DiagnosticStream, ReportStyle, RuntimeConfig};
use crate::diagnostics::{self, Fatal};
use builtins::Builtins;
use platform::{Platform, StdPlatform};

/// Status the process exits with after a fatal diagnostic.
pub const EXIT_FAILURE: i32 = 1;

/// Host state shared by every operation of one program run: configuration,
/// output streams, the builtin bindings, and the source line the driver is
/// currently executing.
pub struct Runtime {
    config: RuntimeConfig,
    platform: Box<dyn Platform>,
    builtins: Builtins,
    line: usize,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_platform(config, StdPlatform)
    }

    pub fn with_platform(config: RuntimeConfig, platform: impl Platform + 'static) -> Self {
        Self {
            config,
            platform: Box::new(platform),
            builtins: Builtins::new(),
            line: 0,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Copy of a predefined binding, ready to be invoked against `self`.
    pub fn builtin(&self, name: &str) -> Option<Value> {
        self.builtins.lookup(name).cloned()
    }

    /// Records the source line about to run. Only the driver calls this.
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn write_stdout(&mut self, text: &str) -> RuntimeResult<()> {
        self.platform.write_stdout(text)?;
        Ok(())
    }

    /// Attaches the current line to a failed operation.
    pub fn guard<T>(&self, result: RuntimeResult<T>) -> Result<T, Fatal> {
        result.map_err(|error| Fatal::new(self.line, error))
    }

    /// Writes `fatal` to the configured diagnostic stream. With the fancy
    /// report style a graphical report follows on stderr.
    pub fn report(&mut self, fatal: &Fatal) {
        log::debug!("fatal {:?} at line {}", fatal.error.kind(), fatal.line);
        let line = diagnostics::render_line(fatal);
        let written = match self.config.diagnostics {
            DiagnosticStream::Stdout => self.platform.write_stdout(&line),
            DiagnosticStream::Stderr => self.platform.write_stderr(&line),
        };
        if let Err(err) = written {
            log::warn!("failed to write diagnostic: {err}");
        }
        if self.config.report == ReportStyle::Fancy {
            if let Err(err) = self
                .platform
                .write_stderr(&diagnostics::render_report(fatal))
            {
                log::warn!("failed to write diagnostic report: {err}");
            }
        }
    }

    /// Unwraps `result`, or reports the fatal diagnostic and terminates the
    /// process with [`EXIT_FAILURE`].
    pub fn exit_on_fatal<T>(&mut self, result: Result<T, Fatal>) -> T {
        match result {
            Ok(value) => value,
            Err(fatal) => {
                self.report(&fatal);
                std::process::exit(EXIT_FAILURE)
            }
        }
    }

    /// [`Runtime::guard`] followed by [`Runtime::exit_on_fatal`].
    pub fn check<T>(&mut self, result: RuntimeResult<T>) -> T {
        let guarded = self.guard(result);
        self.exit_on_fatal(guarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::platform::CapturePlatform;

    fn capture(config: RuntimeConfig) -> (Runtime, CapturePlatform) {
        let platform = CapturePlatform::new();
        (Runtime::with_platform(config, platform.clone()), platform)
    }

    #[test]
    fn guard_attaches_current_line() {
        let (mut rt, _) = capture(RuntimeConfig::default());
        rt.set_line(12);
        let fatal = rt
            .guard(Value::Boolean(true).and(&Value::Number(1.0)))
            .unwrap_err();
        assert_eq!(fatal.line, 12);
        assert_eq!(fatal.to_string(), "at line 12: invalid types for 'and' operator");
        assert_eq!(rt.line(), 12);
    }

    #[test]
    fn guard_passes_success_through() {
        let (rt, _) = capture(RuntimeConfig::default());
        let sum = rt.guard(Value::Number(3.0).add(&Value::Number(4.0)));
        assert_eq!(sum.ok(), Some(Value::Number(7.0)));
    }

    #[test]
    fn report_uses_configured_stream() {
        let (mut rt, out) = capture(RuntimeConfig::default());
        rt.set_line(4);
        let fatal = rt.guard::<()>(Err(RuntimeError::InvalidCondition)).unwrap_err();
        rt.report(&fatal);
        assert_eq!(out.stdout(), "at line 4: invalid type for condition\n");
        assert_eq!(out.stderr(), "");

        let (mut rt, out) = capture(RuntimeConfig {
            diagnostics: DiagnosticStream::Stderr,
            ..RuntimeConfig::default()
        });
        rt.report(&fatal);
        assert_eq!(out.stdout(), "");
        assert_eq!(out.stderr(), "at line 4: invalid type for condition\n");
    }

    #[test]
    fn fancy_report_follows_the_plain_line() {
        let (mut rt, out) = capture(RuntimeConfig {
            report: ReportStyle::Fancy,
            ..RuntimeConfig::default()
        });
        let fatal = Fatal::new(2, RuntimeError::SubroutineInExpression);
        rt.report(&fatal);
        assert_eq!(out.stdout(), "at line 2: cannot call subroutine in expression\n");
        assert!(out.stderr().contains("cannot call subroutine in expression"));
    }

    struct ClosedStdout(CapturePlatform);

    impl Platform for ClosedStdout {
        fn write_stdout(&mut self, _text: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn write_stderr(&mut self, text: &str) -> std::io::Result<()> {
            self.0.write_stderr(text)
        }
    }

    #[test]
    fn report_survives_a_failing_stream() {
        let err_side = CapturePlatform::new();
        let mut rt = Runtime::with_platform(
            RuntimeConfig {
                report: ReportStyle::Fancy,
                ..RuntimeConfig::default()
            },
            ClosedStdout(err_side.clone()),
        );
        rt.report(&Fatal::new(6, RuntimeError::InvalidCondition));
        assert!(err_side.stderr().contains("invalid type for condition"));
        assert_eq!(err_side.stdout(), "");
    }

    #[test]
    fn builtin_print_writes_through_platform() {
        let (mut rt, out) = capture(RuntimeConfig::default());
        let print = rt.builtin("print").expect("print is predefined");
        let printed = print.invoke(&mut rt, &[Value::Number(1.0), Value::string("x")], CallSite::Statement);
        assert_eq!(printed, Ok(Value::Boolean(false)));
        assert_eq!(out.stdout(), "1.000000 x\n");
        assert!(rt.builtin("input").is_none());
    }
}
