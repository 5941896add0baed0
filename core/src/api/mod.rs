//! Public API for guarding a numexpr evaluator.
//!
//! The guard sits in front of an evaluator that would otherwise run any
//! string it is handed. It checks each expression against the admissible
//! grammar and only then delegates.
//!
//! # Example
//!
//! ```
//! use numexpr_guard_core::api::{Arguments, Guard, GuardError};
//!
//! let guard = Guard::new(|expr: &str, args: Arguments<i64>| -> Result<i64, String> {
//!     // A real embedding would call into the evaluator here.
//!     Ok(args.positional().iter().sum::<i64>() + expr.len() as i64)
//! });
//!
//! assert_eq!(guard.validate_and_evaluate("a + b", Arguments::new().arg(1)), Ok(6));
//!
//! let err = guard
//!     .validate_and_evaluate("__import__('os').system('ls')", Arguments::new())
//!     .unwrap_err();
//! assert!(matches!(err, GuardError::Rejected(_)));
//! ```

pub mod error;
pub mod evaluator;
pub mod guard;
pub mod options;

pub use error::{Diagnostic, GuardError};
pub use evaluator::{Arguments, Evaluator};
pub use guard::{Guard, validate_and_evaluate};
pub use options::{DEFAULT_MAX_DEPTH, GuardOptions};
