//! Allowlist validation for numexpr expression strings.
//!
//! [`parser`] defines the admissible language and the matcher that
//! recognizes it; [`api`] wraps an evaluator so that only accepted strings
//! ever reach it.

pub mod api;
pub mod parser;

pub use api::{Arguments, Evaluator, Guard, GuardError, GuardOptions, validate_and_evaluate};
pub use parser::{Matcher, ValidationError, ValidationErrorKind, get_matcher};
