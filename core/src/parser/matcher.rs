//! Reusable accept/reject procedure over the grammar.

use bumpalo::Bump;
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::api::GuardOptions;
use crate::parser::error::ValidationError;
use crate::parser::grammar::Grammar;
use crate::parser::parsed_expr::ParsedExpr;
use crate::parser::parser::parse_with_max_depth;

static MATCHER: Lazy<Matcher> = Lazy::new(Matcher::new);

/// The process-wide matcher with default options. Built on first use and
/// shared read-only afterwards.
pub fn get_matcher() -> &'static Matcher {
    &MATCHER
}

/// Recognizes the admissible expression language.
///
/// A matcher holds no per-call state: it is `Send + Sync` and every instance
/// with the same options accepts exactly the same strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matcher {
    grammar: Grammar,
    options: GuardOptions,
}

impl Matcher {
    pub fn new() -> Self {
        Self::with_options(GuardOptions::default())
    }

    pub fn with_options(options: GuardOptions) -> Self {
        Self {
            grammar: Grammar,
            options,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// Parse `text` into a tree allocated in `arena`. The whole input must
    /// match; a valid prefix followed by anything else is an error.
    pub fn parse<'a>(
        &self,
        arena: &'a Bump,
        text: &'a str,
    ) -> Result<ParsedExpr<'a>, ValidationError> {
        parse_with_max_depth(arena, text, self.options.max_depth)
    }

    /// Validate `text`, discarding the tree.
    pub fn check(&self, text: &str) -> Result<(), ValidationError> {
        let arena = Bump::new();
        match self.parse(&arena, text) {
            Ok(_) => {
                trace!(len = text.len(), "expression accepted");
                Ok(())
            }
            Err(err) => {
                debug!(
                    kind = %err.kind,
                    line = err.line,
                    column = err.column,
                    "expression rejected"
                );
                Err(err)
            }
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }
}
