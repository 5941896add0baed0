pub mod error;
pub mod grammar;
mod matcher;
mod parsed_expr;
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::parse;
pub use parser::parse_with_max_depth;

pub use error::{ValidationError, ValidationErrorKind};
pub use grammar::{
    Associativity, FUNCTIONS, Fixity, Grammar, LiteralForm, OPERATOR_TABLE, Operator,
    OperatorLevel, is_allowed_function,
};
pub use matcher::{Matcher, get_matcher};
pub use parsed_expr::{Expr, Literal, ParsedExpr};
pub use syntax::{BinaryOp, BitwiseOp, ComparisonOp, Span, UnaryOp};


#[cfg(test)]
mod precedence_test;
