use bumpalo::Bump;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::PrattParser;
use pest_derive::Parser;

use crate::api::options::DEFAULT_MAX_DEPTH;
use crate::parser::error::{ValidationError, ValidationErrorKind, convert_pest_error};
use crate::parser::grammar::{LiteralForm, OPERATOR_TABLE, build_pratt_parser, is_allowed_function};
use crate::parser::parsed_expr::{Expr, Literal, ParsedExpr};
use crate::parser::{BinaryOp, BitwiseOp, ComparisonOp, Span, UnaryOp};

lazy_static! {
    static ref PRATT_PARSER: PrattParser<Rule> = build_pratt_parser(OPERATOR_TABLE);
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

/// Parse `source` with the default nesting limit.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<ParsedExpr<'a>, ValidationError> {
    parse_with_max_depth(arena, source, DEFAULT_MAX_DEPTH)
}

/// Parse `source`, requiring the whole input to match the grammar.
///
/// Input nested deeper than `max_depth` is rejected before the recursive
/// parser runs, so no input can exhaust the stack.
pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &'a str,
    max_depth: usize,
) -> Result<ParsedExpr<'a>, ValidationError> {
    let (depth, offset) = nesting_depth(source);
    if depth > max_depth {
        return Err(ValidationError::new(
            ValidationErrorKind::MaxDepthExceeded { depth, max_depth },
            source,
            Span::at(offset),
        ));
    }

    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|err| convert_pest_error(err, source))?;
    let builder = TreeBuilder { arena, source };
    let main = pairs
        .next()
        .ok_or_else(|| builder.missing("expression", Span::at(0)))?;
    let main_span = Span::from(main.as_span());
    let expression = main
        .into_inner()
        .next()
        .ok_or_else(|| builder.missing("expression", main_span.clone()))?;

    let expr = builder.expression(expression)?;
    if expr.is_string_literal() {
        return Err(ValidationError::new(
            ValidationErrorKind::BareString,
            source,
            main_span,
        ));
    }

    Ok(ParsedExpr { expr, source })
}

struct TreeBuilder<'a> {
    arena: &'a Bump,
    source: &'a str,
}

impl<'a> TreeBuilder<'a> {
    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    fn expression(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ValidationError> {
        PRATT_PARSER
            .map_primary(|primary| self.primary(primary))
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    _ => return Err(self.unexpected(&op)),
                };
                Ok(self.alloc(Expr::Unary { op, expr: rhs? }))
            })
            .map_infix(|lhs, op, rhs| {
                let (left, right) = (lhs?, rhs?);
                let expr = match op.as_rule() {
                    Rule::bit_and => Expr::Bitwise { op: BitwiseOp::And, left, right },
                    Rule::bit_or => Expr::Bitwise { op: BitwiseOp::Or, left, right },
                    Rule::bit_not => Expr::Bitwise { op: BitwiseOp::Not, left, right },
                    Rule::bit_xor => Expr::Bitwise { op: BitwiseOp::Xor, left, right },
                    Rule::lt => Expr::Comparison { op: ComparisonOp::Lt, left, right },
                    Rule::le => Expr::Comparison { op: ComparisonOp::Le, left, right },
                    Rule::eq => Expr::Comparison { op: ComparisonOp::Eq, left, right },
                    Rule::ne => Expr::Comparison { op: ComparisonOp::Ne, left, right },
                    Rule::ge => Expr::Comparison { op: ComparisonOp::Ge, left, right },
                    Rule::gt => Expr::Comparison { op: ComparisonOp::Gt, left, right },
                    Rule::add => Expr::Binary { op: BinaryOp::Add, left, right },
                    Rule::sub => Expr::Binary { op: BinaryOp::Sub, left, right },
                    Rule::mul => Expr::Binary { op: BinaryOp::Mul, left, right },
                    Rule::div => Expr::Binary { op: BinaryOp::Div, left, right },
                    Rule::pow => Expr::Binary { op: BinaryOp::Pow, left, right },
                    Rule::modulo => Expr::Binary { op: BinaryOp::Mod, left, right },
                    Rule::shl => Expr::Binary { op: BinaryOp::Shl, left, right },
                    Rule::shr => Expr::Binary { op: BinaryOp::Shr, left, right },
                    _ => return Err(self.unexpected(&op)),
                };
                Ok(self.alloc(expr))
            })
            .parse(pair.into_inner())
    }

    fn primary(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ValidationError> {
        let expr = match pair.as_rule() {
            Rule::call => return self.call(pair),
            Rule::grouped => {
                let span = Span::from(pair.as_span());
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.missing("expression", span))?;
                return self.expression(inner);
            }
            Rule::imaginary => Expr::Literal(Literal::new(LiteralForm::Imaginary, pair.as_str())),
            Rule::real => Expr::Literal(Literal::new(LiteralForm::Real, pair.as_str())),
            Rule::integer => Expr::Literal(Literal::new(LiteralForm::Integer, pair.as_str())),
            Rule::string => Expr::Literal(Literal::new(LiteralForm::Str, pair.as_str())),
            Rule::ident => Expr::Ident(pair.as_str()),
            _ => return Err(self.unexpected(&pair)),
        };
        Ok(self.alloc(expr))
    }

    fn call(&self, pair: Pair<'a, Rule>) -> Result<&'a Expr<'a>, ValidationError> {
        let span = Span::from(pair.as_span());
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .ok_or_else(|| self.missing("function name", span))?;

        let function = name.as_str();
        if !is_allowed_function(function) {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownFunction {
                    name: function.to_string(),
                },
                self.source,
                name.as_span().into(),
            ));
        }

        let args = inner
            .map(|arg| self.expression(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.alloc(Expr::Call {
            function,
            args: self.arena.alloc_slice_copy(&args),
        }))
    }

    fn unexpected(&self, pair: &Pair<'a, Rule>) -> ValidationError {
        ValidationError::new(
            ValidationErrorKind::Other {
                message: format!("Unhandled rule: {:?}", pair.as_rule()),
            },
            self.source,
            pair.as_span().into(),
        )
    }

    fn missing(&self, what: &str, span: Span) -> ValidationError {
        ValidationError::new(
            ValidationErrorKind::Other {
                message: format!("missing {} in parse tree", what),
            },
            self.source,
            span,
        )
    }
}

/// Deepest recursion `source` can cause, and the byte offset where it is
/// first reached.
///
/// Every open parenthesis counts one level, and so does every prefix `-`
/// that is still open. Negation binds looser than arithmetic, so the Pratt
/// fold keeps each prefix `-` open across the `+ - * / ** % << >>` chain
/// that follows it: `a + -b + -c` nests `-c` inside `-b`. A prefix `-` closes
/// at the next comparison or bitwise operator, `,` or `)` of its own group.
/// Quoted text is skipped.
fn nesting_depth(source: &str) -> (usize, usize) {
    let mut deepest = (0, 0);
    // Open prefix negations per parenthesis group, outermost first.
    let mut groups: Vec<usize> = vec![0];
    let mut negations = 0usize;
    let mut expect_operand = true;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let mut close_negations = false;
        match c {
            '"' | '\'' => {
                let mut escaped = false;
                for (_, inner) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if inner == '\\' {
                        escaped = true;
                    } else if inner == c {
                        break;
                    }
                }
                expect_operand = false;
            }
            '(' => {
                groups.push(0);
                expect_operand = true;
            }
            ')' => {
                if groups.len() > 1 {
                    negations -= groups.pop().unwrap_or(0);
                }
                expect_operand = false;
            }
            '-' if expect_operand => {
                if let Some(open) = groups.last_mut() {
                    *open += 1;
                }
                negations += 1;
            }
            '<' | '>' if chars.peek().map(|&(_, next)| next) == Some(c) => {
                chars.next();
                expect_operand = true;
            }
            '+' | '-' | '*' | '/' | '%' => expect_operand = true,
            '<' | '>' | '=' | '!' | '&' | '|' | '~' | '^' | ',' => {
                close_negations = true;
                expect_operand = true;
            }
            c if c.is_whitespace() => {}
            _ => expect_operand = false,
        }

        if close_negations {
            if let Some(open) = groups.last_mut() {
                negations -= *open;
                *open = 0;
            }
        }

        let depth = groups.len() - 1 + negations;
        if depth > deepest.0 {
            deepest = (depth, offset);
        }
    }

    deepest
}
