use core::fmt;

use crate::parser::grammar::LiteralForm;
use crate::parser::{BinaryOp, BitwiseOp, ComparisonOp, UnaryOp};

/// An accepted expression. The tree lives in the arena passed to the parser
/// and is dropped with it; nothing downstream consumes it.
#[derive(Debug)]
pub struct ParsedExpr<'a> {
    pub expr: &'a Expr<'a>,
    pub source: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Bitwise {
        op: BitwiseOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    Call {
        function: &'a str,
        args: &'a [&'a Expr<'a>],
    },
    Literal(Literal<'a>),
    Ident(&'a str),
}

/// A literal exactly as written, quotes and sign included. No numeric
/// conversion happens, so digit strings of any length are admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    pub form: LiteralForm,
    pub text: &'a str,
}

impl<'a> Literal<'a> {
    pub fn new(form: LiteralForm, text: &'a str) -> Self {
        Self { form, text }
    }
}

impl<'a> Expr<'a> {
    pub fn is_string_literal(&self) -> bool {
        matches!(
            self,
            Expr::Literal(Literal {
                form: LiteralForm::Str,
                ..
            })
        )
    }
}

/// Renders the tree fully parenthesized, e.g. `a + b * c` as
/// `((a + b) * c)`.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Comparison { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Bitwise { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Unary { op, expr } => write!(f, "({}{})", op.symbol(), expr),
            Expr::Call { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Literal(literal) => write!(f, "{}", literal.text),
            Expr::Ident(name) => write!(f, "{}", name),
        }
    }
}
