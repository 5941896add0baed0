use crate::api::Diagnostic;
use crate::parser::grammar::FUNCTIONS;
use crate::parser::{Rule, Span};

/// An expression that does not match the grammar, with enough position
/// information to point at the offending text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (line {line}, column {column})")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// The rejected expression, unchanged.
    pub input: String,
    /// Byte range in `input`.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: usize,
    /// 1-based column of `span.start`, counted in chars.
    pub column: usize,
}

/// Why an expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// The text at the error position is not part of the grammar.
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    /// A well-formed call to a function outside the allowlist.
    #[error("Function '{name}' is not allowed")]
    UnknownFunction { name: String },
    /// The whole expression is a single string literal.
    #[error("A string literal is not an expression on its own")]
    BareString,
    /// Maximum nesting depth exceeded
    #[error("Expression nesting depth {depth} exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    #[error("{message}")]
    Other { message: String },
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, input: &str, span: Span) -> Self {
        let (line, column) = line_col(input, span.0.start);
        Self {
            kind,
            input: input.to_string(),
            span,
            line,
            column,
        }
    }

    /// The "expected" hint, when the matcher produced one.
    pub fn expected(&self) -> Option<&str> {
        match &self.kind {
            ValidationErrorKind::UnexpectedToken { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// The offending text as it appears in the input.
    pub fn snippet(&self) -> &str {
        self.span.str_of(&self.input)
    }

    /// Convert to a Diagnostic for rendering
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ValidationErrorKind::UnexpectedToken { found, .. } => {
                let help = if found == "'='" {
                    vec!["Assignment is not supported; use '==' to compare values".to_string()]
                } else {
                    vec![]
                };
                ("V001", help)
            }
            ValidationErrorKind::UnknownFunction { .. } => (
                "V002",
                vec![format!("Allowed functions are: {}", FUNCTIONS.join(", "))],
            ),
            ValidationErrorKind::BareString => (
                "V003",
                vec!["Strings may only appear as operands, e.g. contains(s, 'abc')".to_string()],
            ),
            ValidationErrorKind::MaxDepthExceeded { .. } => (
                "V004",
                vec!["Reduce nesting or simplify the expression".to_string()],
            ),
            ValidationErrorKind::Other { .. } => ("V999", vec![]),
        };

        Diagnostic {
            message: self.kind.to_string(),
            span: self.span.clone(),
            help,
            code: Some(code.to_string()),
        }
    }
}

/// Convert Pest error to human-readable ValidationError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ValidationError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => ValidationErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.0.start),
        },
        ErrorVariant::CustomError { message } => ValidationErrorKind::Other { message },
    };

    ValidationError::new(kind, source, span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "something else".to_string();
    }

    // Group related rules into higher-level concepts
    let mut concepts = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::bit_and
            | Rule::bit_or
            | Rule::bit_not
            | Rule::bit_xor
            | Rule::eq
            | Rule::ne
            | Rule::le
            | Rule::lt
            | Rule::ge
            | Rule::gt
            | Rule::pow
            | Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div
            | Rule::modulo
            | Rule::shl
            | Rule::shr => "operator",
            Rule::imaginary | Rule::real | Rule::integer | Rule::string => "literal",
            Rule::ident => "identifier",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => "something else".to_string(),
    }
}

/// Describe the token starting at `offset`, e.g. `'='` or `'eval'`.
fn describe_found(source: &str, offset: usize) -> String {
    let rest = source.get(offset..).unwrap_or("").trim_start();
    let is_word = |c: &char| *c == '_' || c.is_alphanumeric();

    match rest.chars().next() {
        None => "end of input".to_string(),
        Some(c) if is_word(&c) => {
            let word: String = rest.chars().take_while(is_word).collect();
            format!("'{}'", word)
        }
        Some(c) => format!("'{}'", c),
    }
}

fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_to_diagnostic() {
        let error = ValidationError::new(
            ValidationErrorKind::UnexpectedToken {
                expected: "operator or end of input".to_string(),
                found: "'='".to_string(),
            },
            "a = b",
            Span(2..2),
        );

        let diagnostic = error.to_diagnostic();
        assert!(diagnostic.message.contains("Expected operator or end of input"));
        assert!(diagnostic.message.contains("found '='"));
        assert_eq!(diagnostic.code, Some("V001".to_string()));
        assert_eq!(diagnostic.help.len(), 1);
        assert_eq!(error.expected(), Some("operator or end of input"));
    }

    #[test]
    fn test_unknown_function_diagnostic_lists_allowlist() {
        let error = ValidationError::new(
            ValidationErrorKind::UnknownFunction {
                name: "eval".to_string(),
            },
            "eval(12)",
            Span(0..4),
        );

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.message, "Function 'eval' is not allowed");
        assert_eq!(diagnostic.code, Some("V002".to_string()));
        assert!(diagnostic.help[0].contains("arctan2"));
        assert_eq!(error.snippet(), "eval");
        assert_eq!(error.expected(), None);
    }

    #[test]
    fn test_display_includes_position() {
        let error = ValidationError::new(
            ValidationErrorKind::BareString,
            "'string'",
            Span(0..8),
        );
        assert_eq!(
            error.to_string(),
            "A string literal is not an expression on its own (line 1, column 1)"
        );
    }

    #[test]
    fn test_format_expected_rules() {
        assert_eq!(format_expected_rules(&[Rule::integer, Rule::real]), "literal");
        assert_eq!(
            format_expected_rules(&[Rule::add, Rule::mul, Rule::EOI]),
            "operator or end of input"
        );
        assert_eq!(
            format_expected_rules(&[Rule::neg, Rule::integer, Rule::ident]),
            "expression, literal or identifier"
        );
        assert_eq!(format_expected_rules(&[]), "something else");
    }

    #[test]
    fn test_describe_found() {
        assert_eq!(describe_found("a = b", 2), "'='");
        assert_eq!(describe_found("a   = b", 1), "'='");
        assert_eq!(describe_found("eval(12)", 0), "'eval'");
        assert_eq!(describe_found("1 +", 3), "end of input");
        assert_eq!(describe_found("abc", 99), "end of input");
    }

    #[test]
    fn test_line_col() {
        assert_eq!(line_col("a = b", 2), (1, 3));
        assert_eq!(line_col("a +\n  = b", 6), (2, 3));
        assert_eq!(line_col("ä = b", 3), (1, 3));
        assert_eq!(line_col("", 0), (1, 1));
    }

    #[test]
    fn test_custom_pest_error_becomes_other() {
        let pest_err = pest::error::Error::<Rule>::new_from_pos(
            pest::error::ErrorVariant::CustomError {
                message: "unexpected pair".to_string(),
            },
            pest::Position::from_start("a + b"),
        );

        let error = convert_pest_error(pest_err, "a + b");
        assert_eq!(
            error.kind,
            ValidationErrorKind::Other {
                message: "unexpected pair".to_string()
            }
        );
        assert_eq!(error.span, Span(0..0));
        assert_eq!(error.to_diagnostic().code, Some("V999".to_string()));
    }
}
