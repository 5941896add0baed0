//! numexpr-guard - an allowlist guard in front of numexpr evaluation
//!
//! # Overview
//!
//! numexpr compiles expression strings, and older releases fall back to a
//! general-purpose evaluator that runs arbitrary code. This crate accepts an
//! expression only if it belongs to a small arithmetic language: operators,
//! numeric and string literals, identifiers and calls to 28 known functions.
//! Everything else is rejected before the evaluator is invoked.
//!
//! # Quick Start
//!
//! ```
//! use numexpr_guard::{Arguments, GuardError, validate_and_evaluate};
//!
//! // Stand-in for the real evaluator.
//! let evaluate = |expr: &str, args: Arguments<f64>| -> Result<String, String> {
//!     Ok(format!("{expr} with {} argument(s)", args.len()))
//! };
//!
//! let out = validate_and_evaluate(&evaluate, "sin(a) > 5", Arguments::new().named("a", 2.0));
//! assert_eq!(out.unwrap(), "sin(a) > 5 with 1 argument(s)");
//!
//! match validate_and_evaluate(&evaluate, "eval(12)", Arguments::new()) {
//!     Err(GuardError::Rejected(e)) => {
//!         let report = numexpr_guard::render_error_to_string_no_color(&e);
//!         assert!(report.contains("Function 'eval' is not allowed"));
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! # Matching without evaluating
//!
//! ```
//! use numexpr_guard::get_matcher;
//!
//! assert!(get_matcher().matches("where(a < 1, 2.0j, -b)"));
//! assert!(!get_matcher().matches("a = b"));
//! ```

mod error_renderer;

// Re-export public API from numexpr_guard_core
pub use numexpr_guard_core::api::{
    Arguments, DEFAULT_MAX_DEPTH, Diagnostic, Evaluator, Guard, GuardError, GuardOptions,
    validate_and_evaluate,
};
pub use numexpr_guard_core::parser::{
    FUNCTIONS, Grammar, Matcher, ParsedExpr, ValidationError, ValidationErrorKind, get_matcher,
};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
