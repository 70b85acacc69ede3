use crate::runtime::error::{ErrorKind, RuntimeError};
use miette::{Diagnostic, Report};
use std::fmt;
use thiserror::Error;

/// An unrecoverable runtime error pinned to the source line that raised it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("at line {line}: {error}")]
pub struct Fatal {
    pub line: usize,
    pub error: RuntimeError,
}

impl Fatal {
    pub fn new(line: usize, error: RuntimeError) -> Self {
        Self { line, error }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl Diagnostic for Fatal {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind() {
            ErrorKind::TypeMismatch => "aurora::runtime::type_mismatch",
            ErrorKind::InvalidCondition => "aurora::runtime::invalid_condition",
            ErrorKind::InvalidCallTarget => "aurora::runtime::invalid_call",
            ErrorKind::OutOfRange => "aurora::runtime::out_of_range",
            ErrorKind::Arity => "aurora::runtime::arity",
            ErrorKind::Output => "aurora::runtime::output",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.error {
            RuntimeError::TypeMismatch { .. } => {
                "both operands must be of a type this operator supports; only == and != accept mixed types"
                    .to_string()
            }
            RuntimeError::InvalidOperand { .. } => {
                "'not' takes a boolean and '-' takes a number".to_string()
            }
            RuntimeError::InvalidCondition => "conditions must be true or false".to_string(),
            RuntimeError::InvalidCall { type_name } => {
                format!("a {type_name} value is not a sub or func")
            }
            RuntimeError::SubroutineInExpression => {
                "a sub has no result; call it as a statement or declare a func".to_string()
            }
            RuntimeError::IndexOutOfRange { len: 0, .. } => "the list is empty".to_string(),
            RuntimeError::IndexOutOfRange { len, .. } => {
                format!("valid indices are 0 through {}", len - 1)
            }
            RuntimeError::ArityMismatch { expected, received } => {
                format!("expected {expected} arguments but received {received}")
            }
            RuntimeError::Output { .. } => return None,
        };
        Some(Box::new(help))
    }
}

/// The single diagnostic line written before the process exits.
pub fn render_line(fatal: &Fatal) -> String {
    format!("{fatal}\n")
}

/// Graphical miette rendering, used when the fancy report style is enabled.
pub fn render_report(fatal: &Fatal) -> String {
    format!("{:?}\n", Report::new(fatal.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_matches_driver_format() {
        let fatal = Fatal::new(7, RuntimeError::IndexOutOfRange { index: 5.0, len: 3 });
        assert_eq!(
            render_line(&fatal),
            "at line 7: index 5 out of range for list of length 3\n"
        );
    }

    #[test]
    fn codes_follow_error_kind() {
        let fatal = Fatal::new(1, RuntimeError::TypeMismatch { op: "%" });
        let code = fatal.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("aurora::runtime::type_mismatch"));
        let fatal = Fatal::new(1, RuntimeError::SubroutineInExpression);
        let code = fatal.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("aurora::runtime::invalid_call"));
    }

    #[test]
    fn help_describes_valid_indices() {
        let fatal = Fatal::new(1, RuntimeError::IndexOutOfRange { index: 3.0, len: 3 });
        let help = fatal.help().map(|help| help.to_string());
        assert_eq!(help.as_deref(), Some("valid indices are 0 through 2"));
        let empty = Fatal::new(1, RuntimeError::IndexOutOfRange { index: 0.0, len: 0 });
        assert_eq!(
            empty.help().map(|help| help.to_string()).as_deref(),
            Some("the list is empty")
        );
    }

    #[test]
    fn report_contains_message() {
        let fatal = Fatal::new(3, RuntimeError::InvalidCondition);
        let report = render_report(&fatal);
        assert!(report.contains("at line 3: invalid type for condition"));
    }
}
