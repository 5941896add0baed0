use crate::parser::Expr;
use bumpalo::Bump;

use super::parser::parse;

// Helper function to parse an expression and return the AST.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast<'a>(arena: &'a Bump, source: &'a str) -> &'a Expr<'a> {
    let parsed = parse(arena, source)
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e));
    parsed.expr
}

fn rendered(source: &str) -> String {
    let arena = Bump::new();
    ast(&arena, source).to_string()
}

#[test]
fn test_arithmetic_is_one_left_associative_level() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a + b - c"), ast(&arena, "(a + b) - c"));
    assert_eq!(ast(&arena, "a + b * c"), ast(&arena, "(a + b) * c"));
    assert_eq!(ast(&arena, "a * b + c"), ast(&arena, "(a * b) + c"));
    assert_eq!(ast(&arena, "a ** b ** c"), ast(&arena, "(a ** b) ** c"));
    assert_eq!(
        ast(&arena, "a << b % c >> d / e"),
        ast(&arena, "(((a << b) % c) >> d) / e")
    );
}

#[test]
fn test_arithmetic_vs_comparison() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a + b < c"), ast(&arena, "(a + b) < c"));
    assert_eq!(ast(&arena, "a < b + c"), ast(&arena, "a < (b + c)"));
    assert_eq!(ast(&arena, "a * 2 >= b ** 2"), ast(&arena, "(a * 2) >= (b ** 2)"));
}

#[test]
fn test_comparison_is_left_associative() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a < b < c"), ast(&arena, "(a < b) < c"));
    assert_eq!(ast(&arena, "a == b != c"), ast(&arena, "(a == b) != c"));
}

#[test]
fn test_comparison_vs_bitwise() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a & b == c"), ast(&arena, "a & (b == c)"));
    assert_eq!(ast(&arena, "a == b & c"), ast(&arena, "(a == b) & c"));
    assert_eq!(
        ast(&arena, "c < 32.0 | d == -22.0"),
        ast(&arena, "(c < 32.0) | (d == -22.0)")
    );
}

#[test]
fn test_bitwise_is_one_left_associative_level() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a | b & c"), ast(&arena, "(a | b) & c"));
    assert_eq!(ast(&arena, "a & b | c"), ast(&arena, "(a & b) | c"));
    assert_eq!(ast(&arena, "a ^ b ~ c"), ast(&arena, "(a ^ b) ~ c"));
}

#[test]
fn test_negation_sits_between_comparison_and_arithmetic() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "--a"), ast(&arena, "-(-a)"));
    assert_eq!(ast(&arena, "-a + b"), ast(&arena, "-(a + b)"));
    assert_eq!(ast(&arena, "-a == b"), ast(&arena, "(-a) == b"));
    assert_eq!(ast(&arena, "a == -b"), ast(&arena, "a == (-b)"));
    assert_eq!(ast(&arena, "a * -b + c"), ast(&arena, "a * (-(b + c))"));
}

#[test]
fn test_call_arguments_are_full_expressions() {
    let arena = Bump::new();
    assert_eq!(
        ast(&arena, "where(a < 1 | b, -c + 1, 2)"),
        ast(&arena, "where(((a < 1) | b), (-(c + 1)), 2)")
    );
}

#[test]
fn test_rendered_trees() {
    assert_eq!(rendered("1 + 2.0 + _abc + sin(cos(o))"), "(((1 + 2.0) + _abc) + sin(cos(o)))");
    assert_eq!(rendered("((c<32.0) | (d==-22.0))"), "((c < 32.0) | (d == (-22.0)))");
    assert_eq!(rendered("where(a, 1, 2) ==  b"), "(where(a, 1, 2) == b)");
    assert_eq!(rendered("c - 1.0+2.0j"), "((c - 1.0) + 2.0j)");
}
