//! The admissible expression language.
//!
//! The token-level grammar lives in `expression.pest`. This module holds the
//! parts of the language that are data rather than syntax: the function
//! allowlist, the operator precedence table and the literal forms. The Pratt
//! parser is built from [`OPERATOR_TABLE`], so the table is the only place
//! precedence is defined.

use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::parser::Rule;

/// Functions that may appear as call targets.
pub const FUNCTIONS: &[&str] = &[
    "where", "sin", "cos", "tan", "arcsin", "arccos", "arctan", "arctan2", "sinh", "cosh", "tanh",
    "arcsinh", "arccosh", "arctanh", "log", "log10", "log1p", "exp", "expm1", "sqrt", "abs",
    "conj", "real", "imag", "complex", "contains", "sum", "prod",
];

pub fn is_allowed_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fixity {
    /// Prefix operators are right-associative: `--a` is `-(-a)`.
    Prefix,
    Infix(Associativity),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operator {
    pub symbol: &'static str,
    pub rule: Rule,
}

/// One precedence level: every operator in it binds equally tight.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperatorLevel {
    pub name: &'static str,
    pub fixity: Fixity,
    pub operators: &'static [Operator],
}

impl OperatorLevel {
    pub fn arity(&self) -> usize {
        match self.fixity {
            Fixity::Prefix => 1,
            Fixity::Infix(_) => 2,
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.operators.iter().any(|op| op.symbol == symbol)
    }
}

// Note: precedence is defined lowest to highest.
pub const OPERATOR_TABLE: &[OperatorLevel] = &[
    OperatorLevel {
        name: "bitwise",
        fixity: Fixity::Infix(Associativity::Left),
        operators: &[
            Operator { symbol: "&", rule: Rule::bit_and },
            Operator { symbol: "|", rule: Rule::bit_or },
            Operator { symbol: "~", rule: Rule::bit_not },
            Operator { symbol: "^", rule: Rule::bit_xor },
        ],
    },
    OperatorLevel {
        name: "comparison",
        fixity: Fixity::Infix(Associativity::Left),
        operators: &[
            Operator { symbol: "<", rule: Rule::lt },
            Operator { symbol: "<=", rule: Rule::le },
            Operator { symbol: "==", rule: Rule::eq },
            Operator { symbol: "!=", rule: Rule::ne },
            Operator { symbol: ">=", rule: Rule::ge },
            Operator { symbol: ">", rule: Rule::gt },
        ],
    },
    OperatorLevel {
        name: "negation",
        fixity: Fixity::Prefix,
        operators: &[Operator { symbol: "-", rule: Rule::neg }],
    },
    OperatorLevel {
        name: "arithmetic",
        fixity: Fixity::Infix(Associativity::Left),
        operators: &[
            Operator { symbol: "+", rule: Rule::add },
            Operator { symbol: "-", rule: Rule::sub },
            Operator { symbol: "*", rule: Rule::mul },
            Operator { symbol: "/", rule: Rule::div },
            Operator { symbol: "**", rule: Rule::pow },
            Operator { symbol: "%", rule: Rule::modulo },
            Operator { symbol: "<<", rule: Rule::shl },
            Operator { symbol: ">>", rule: Rule::shr },
        ],
    },
];

/// Literal operand forms, in the order the grammar tries them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LiteralForm {
    /// A real or integer immediately followed by `j` or `J`.
    Imaginary,
    /// Fractional part and/or exponent; may carry a leading `+`.
    Real,
    Integer,
    /// Single- or double-quoted, single line.
    Str,
}

pub const LITERAL_FORMS: &[LiteralForm] = &[
    LiteralForm::Imaginary,
    LiteralForm::Real,
    LiteralForm::Integer,
    LiteralForm::Str,
];

impl LiteralForm {
    pub fn name(self) -> &'static str {
        match self {
            LiteralForm::Imaginary => "imaginary",
            LiteralForm::Real => "real",
            LiteralForm::Integer => "integer",
            LiteralForm::Str => "string",
        }
    }
}

/// Read-only view of the language. Carries no state; every instance
/// describes the same grammar.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Grammar;

impl Grammar {
    pub fn functions(&self) -> &'static [&'static str] {
        FUNCTIONS
    }

    pub fn operators(&self) -> &'static [OperatorLevel] {
        OPERATOR_TABLE
    }

    pub fn literal_forms(&self) -> &'static [LiteralForm] {
        LITERAL_FORMS
    }

    pub fn is_allowed_function(&self, name: &str) -> bool {
        is_allowed_function(name)
    }

    /// Whether `symbol` is an operator at any level.
    pub fn is_operator(&self, symbol: &str) -> bool {
        OPERATOR_TABLE.iter().any(|level| level.contains(symbol))
    }
}

pub(crate) fn build_pratt_parser(table: &[OperatorLevel]) -> PrattParser<Rule> {
    table.iter().fold(PrattParser::new(), |pratt, level| {
        let mut ops = level.operators.iter().map(|op| match level.fixity {
            Fixity::Prefix => Op::prefix(op.rule),
            Fixity::Infix(Associativity::Left) => Op::infix(op.rule, Assoc::Left),
            Fixity::Infix(Associativity::Right) => Op::infix(op.rule, Assoc::Right),
        });
        match ops.next() {
            Some(first) => pratt.op(ops.fold(first, |acc, op| acc | op)),
            None => pratt,
        }
    })
}
