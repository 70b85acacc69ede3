use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("invalid types for {op} operator")]
    TypeMismatch { op: &'static str },
    #[error("invalid type for {op} operator")]
    InvalidOperand { op: &'static str },
    #[error("invalid type for condition")]
    InvalidCondition,
    #[error("invalid type for call")]
    InvalidCall { type_name: &'static str },
    #[error("cannot call subroutine in expression")]
    SubroutineInExpression,
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: f64, len: usize },
    #[error("incorrect number of args")]
    ArityMismatch { expected: usize, received: usize },
    #[error("failed to write output: {message}")]
    Output { message: String },
}

/// Coarse classification of [`RuntimeError`], one per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    InvalidCondition,
    InvalidCallTarget,
    OutOfRange,
    Arity,
    Output,
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::TypeMismatch { .. } | RuntimeError::InvalidOperand { .. } => {
                ErrorKind::TypeMismatch
            }
            RuntimeError::InvalidCondition => ErrorKind::InvalidCondition,
            RuntimeError::InvalidCall { .. } | RuntimeError::SubroutineInExpression => {
                ErrorKind::InvalidCallTarget
            }
            RuntimeError::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            RuntimeError::ArityMismatch { .. } => ErrorKind::Arity,
            RuntimeError::Output { .. } => ErrorKind::Output,
        }
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(error: std::io::Error) -> Self {
        RuntimeError::Output {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_operator() {
        assert_eq!(
            RuntimeError::TypeMismatch { op: "+" }.to_string(),
            "invalid types for + operator"
        );
        assert_eq!(
            RuntimeError::TypeMismatch { op: "'and'" }.to_string(),
            "invalid types for 'and' operator"
        );
        assert_eq!(
            RuntimeError::InvalidOperand { op: "'not'" }.to_string(),
            "invalid type for 'not' operator"
        );
        assert_eq!(
            RuntimeError::SubroutineInExpression.to_string(),
            "cannot call subroutine in expression"
        );
        assert_eq!(
            RuntimeError::IndexOutOfRange { index: 5.0, len: 3 }.to_string(),
            "index 5 out of range for list of length 3"
        );
    }

    #[test]
    fn subroutine_misuse_is_a_call_target_error() {
        assert_eq!(
            RuntimeError::SubroutineInExpression.kind(),
            ErrorKind::InvalidCallTarget
        );
        assert_eq!(
            RuntimeError::InvalidCall { type_name: "number" }.kind(),
            ErrorKind::InvalidCallTarget
        );
        assert_ne!(
            RuntimeError::SubroutineInExpression.to_string(),
            RuntimeError::TypeMismatch { op: "+" }.to_string()
        );
    }
}
