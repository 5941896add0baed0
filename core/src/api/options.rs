//! Configuration options for the guard.

/// Nesting limit used by [`GuardOptions::default`] and the shared matcher.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for validation.
///
/// # Example
///
/// ```
/// use numexpr_guard_core::api::GuardOptions;
/// use numexpr_guard_core::parser::Matcher;
///
/// let matcher = Matcher::with_options(GuardOptions { max_depth: 4 });
/// assert!(matcher.matches("((a + b))"));
/// assert!(!matcher.matches("(((((a)))))"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardOptions {
    /// Maximum combined depth of parentheses and chained negations.
    ///
    /// Deeper input is rejected with `MaxDepthExceeded` before it is parsed.
    ///
    /// Default: 128
    pub max_depth: usize,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
