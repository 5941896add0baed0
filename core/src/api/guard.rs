//! Validating dispatcher.
//!
//! Every expression is checked against the matcher before the evaluator sees
//! it. An expression that fails the check produces a [`GuardError::Rejected`]
//! and the evaluator is not called at all; an expression that passes is
//! forwarded together with its arguments, unchanged, and the evaluator's
//! result is returned as is.

use tracing::debug;

use crate::api::error::GuardError;
use crate::api::evaluator::{Arguments, Evaluator};
use crate::parser::{Matcher, get_matcher};

/// Validate `expression` with the shared matcher, then hand it to `evaluator`.
///
/// # Example
///
/// ```
/// use numexpr_guard_core::api::{Arguments, validate_and_evaluate};
///
/// let evaluator = |expr: &str, _args: Arguments<f64>| -> Result<String, ()> {
///     Ok(format!("evaluated {expr}"))
/// };
///
/// let ok = validate_and_evaluate(&evaluator, "sin(a) > 5", Arguments::new().named("a", 1.0));
/// assert_eq!(ok.unwrap(), "evaluated sin(a) > 5");
///
/// let err = validate_and_evaluate(&evaluator, "eval('1')", Arguments::new()).unwrap_err();
/// assert!(err.is_rejected());
/// ```
pub fn validate_and_evaluate<V, E>(
    evaluator: &E,
    expression: &str,
    args: Arguments<V>,
) -> Result<E::Output, GuardError<E::Error>>
where
    E: Evaluator<V>,
{
    dispatch(get_matcher(), evaluator, expression, args)
}

/// An evaluator wrapped with a matcher.
#[derive(Debug, Clone)]
pub struct Guard<'m, E> {
    matcher: &'m Matcher,
    evaluator: E,
}

impl<E> Guard<'static, E> {
    /// Guard `evaluator` with the shared default matcher.
    pub fn new(evaluator: E) -> Self {
        Self::with_matcher(get_matcher(), evaluator)
    }
}

impl<'m, E> Guard<'m, E> {
    pub fn with_matcher(matcher: &'m Matcher, evaluator: E) -> Self {
        Self { matcher, evaluator }
    }

    pub fn matcher(&self) -> &'m Matcher {
        self.matcher
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn into_evaluator(self) -> E {
        self.evaluator
    }

    pub fn validate_and_evaluate<V>(
        &self,
        expression: &str,
        args: Arguments<V>,
    ) -> Result<E::Output, GuardError<E::Error>>
    where
        E: Evaluator<V>,
    {
        dispatch(self.matcher, &self.evaluator, expression, args)
    }
}

fn dispatch<V, E>(
    matcher: &Matcher,
    evaluator: &E,
    expression: &str,
    args: Arguments<V>,
) -> Result<E::Output, GuardError<E::Error>>
where
    E: Evaluator<V>,
{
    matcher.check(expression)?;

    debug!(
        len = expression.len(),
        positional = args.positional().len(),
        named = args.named_args().len(),
        "dispatching validated expression"
    );
    evaluator
        .evaluate(expression, args)
        .map_err(GuardError::Evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GuardOptions;
    use crate::parser::ValidationErrorKind;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl Evaluator<i32> for Counting {
        type Output = i32;
        type Error = String;

        fn evaluate(&self, _expression: &str, args: Arguments<i32>) -> Result<i32, String> {
            self.calls.set(self.calls.get() + 1);
            Ok(args.positional().iter().sum())
        }
    }

    fn counting() -> Counting {
        Counting {
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_valid_expression_is_forwarded() {
        crate::test_utils::init_test_logging();
        let guard = Guard::new(counting());
        let result = guard.validate_and_evaluate("a + b", Arguments::new().arg(2).arg(3));
        assert_eq!(result, Ok(5));
        assert_eq!(guard.evaluator().calls.get(), 1);
    }

    #[test]
    fn test_rejected_expression_is_not_forwarded() {
        let guard = Guard::new(counting());
        for expression in ["non_supported_func(1) > 5", "a = b", "'string'", ""] {
            let err = guard
                .validate_and_evaluate(expression, Arguments::new().arg(1))
                .unwrap_err();
            assert!(err.is_rejected(), "{expression}");
        }
        assert_eq!(guard.into_evaluator().calls.get(), 0);
    }

    #[test]
    fn test_evaluator_error_is_passed_through() {
        let failing = |_: &str, _: Arguments<i32>| -> Result<i32, String> {
            Err("boom".to_string())
        };
        let err = validate_and_evaluate(&failing, "a / 0", Arguments::new()).unwrap_err();
        assert_eq!(err, GuardError::Evaluator("boom".to_string()));
    }

    #[test]
    fn test_custom_matcher() {
        let shallow = Matcher::with_options(GuardOptions { max_depth: 1 });
        let guard = Guard::with_matcher(&shallow, counting());
        assert_eq!(guard.validate_and_evaluate("(a)", Arguments::new()), Ok(0));

        let err = guard
            .validate_and_evaluate("((a))", Arguments::new())
            .unwrap_err();
        match err {
            GuardError::Rejected(err) => assert_eq!(
                err.kind,
                ValidationErrorKind::MaxDepthExceeded {
                    depth: 2,
                    max_depth: 1
                }
            ),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(guard.evaluator().calls.get(), 1);
        assert!(core::ptr::eq(guard.matcher(), &shallow));
    }
}
