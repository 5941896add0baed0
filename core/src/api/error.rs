//! Public error types for the guard API.

use core::fmt;

use crate::parser::{Span, ValidationError};

/// Result of [`validate_and_evaluate`](crate::api::validate_and_evaluate).
///
/// A rejected expression never reaches the evaluator, so the two variants
/// never describe the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError<E> {
    /// The expression is outside the admissible language.
    Rejected(ValidationError),

    /// The expression was valid and the evaluator itself failed.
    Evaluator(E),
}

impl<E> GuardError<E> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, GuardError::Rejected(_))
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            GuardError::Rejected(err) => Some(err),
            GuardError::Evaluator(_) => None,
        }
    }

    pub fn into_evaluator_error(self) -> Option<E> {
        match self {
            GuardError::Rejected(_) => None,
            GuardError::Evaluator(err) => Some(err),
        }
    }
}

impl<E> From<ValidationError> for GuardError<E> {
    fn from(err: ValidationError) -> Self {
        GuardError::Rejected(err)
    }
}

impl<E: fmt::Display> fmt::Display for GuardError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GuardError::Rejected(err) => write!(f, "Expression rejected: {}", err),
            GuardError::Evaluator(err) => write!(f, "Evaluation failed: {}", err),
        }
    }
}

impl<E> std::error::Error for GuardError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuardError::Rejected(err) => Some(err),
            GuardError::Evaluator(err) => Some(err),
        }
    }
}

/// Why an expression was rejected, with source location, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Suggestions for fixing the issue, one per line.
    pub help: Vec<String>,

    /// Optional error code (e.g., "V001").
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ValidationErrorKind;
    use std::error::Error as _;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("division by zero")]
    struct DivByZero;

    fn rejected() -> GuardError<DivByZero> {
        ValidationError::new(
            ValidationErrorKind::UnknownFunction {
                name: "eval".to_string(),
            },
            "eval(1)",
            Span(0..4),
        )
        .into()
    }

    #[test]
    fn test_rejected_accessors() {
        let err = rejected();
        assert!(err.is_rejected());
        assert_eq!(err.validation_error().map(|e| e.snippet()), Some("eval"));
        assert_eq!(err.into_evaluator_error(), None);
    }

    #[test]
    fn test_evaluator_accessors() {
        let err: GuardError<DivByZero> = GuardError::Evaluator(DivByZero);
        assert!(!err.is_rejected());
        assert!(err.validation_error().is_none());
        assert_eq!(err.into_evaluator_error(), Some(DivByZero));
    }

    #[test]
    fn test_display_and_source() {
        let err = rejected();
        assert_eq!(
            err.to_string(),
            "Expression rejected: Function 'eval' is not allowed (line 1, column 1)"
        );
        assert!(err.source().is_some());

        let err: GuardError<DivByZero> = GuardError::Evaluator(DivByZero);
        assert_eq!(err.to_string(), "Evaluation failed: division by zero");
        assert_eq!(err.source().map(|s| s.to_string()), Some("division by zero".to_string()));
    }
}
