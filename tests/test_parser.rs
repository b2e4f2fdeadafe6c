//! AST-level parser tests.
//!
//! Grammar-rule coverage lives in the parser's unit tests; these check the
//! shapes `parse_to_ast` builds: precedence, associativity, statement line
//! numbers and the literal forms.

extern crate gaff;

use pretty_assertions::assert_eq;

use gaff::parser::ast::{
    AssignOp, AssignTarget, BinaryOp, Expr, Literal, LogicalOp, Script, Stmt, StmtKind, UnaryOp,
};
use gaff::parser::parse_to_ast;

/// Helper to parse source that must be valid.
fn parse(code: &str) -> Script {
    parse_to_ast(code).unwrap_or_else(|e| panic!("parse failed:\n{}", e))
}

/// Helper to parse a single expression statement and return its expression.
fn parse_expr(code: &str) -> Expr {
    let script = parse(code);
    assert_eq!(script.body.len(), 1, "expected one statement");
    match script.body.into_iter().next().unwrap().kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn int(n: i128) -> Expr {
    Expr::Literal(Literal::Int(n))
}

fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_string())
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

// ============================================================================
// Statement shape tests
// ============================================================================

#[test]
fn test_empty_script() {
    assert_eq!(parse("").body, vec![]);
    assert_eq!(parse("   \n\n  ").body, vec![]);
}

#[test]
fn test_simple_assignment() {
    let script = parse("x = 5 + 3;");
    assert_eq!(
        script.body,
        vec![Stmt {
            line: 1,
            kind: StmtKind::Assign {
                target: AssignTarget {
                    name: "x".to_string(),
                    indices: vec![],
                },
                op: AssignOp::Assign,
                value: binary(BinaryOp::Add, int(5), int(3)),
            },
        }]
    );
}

#[test]
fn test_indexed_assignment_target() {
    let script = parse("grid[0][1] = 5;");
    match &script.body[0].kind {
        StmtKind::Assign { target, op, .. } => {
            assert_eq!(target.name, "grid");
            assert_eq!(target.indices, vec![int(0), int(1)]);
            assert_eq!(*op, AssignOp::Assign);
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_compound_assignment_ops() {
    let cases = [
        ("x += 1;", AssignOp::AddAssign),
        ("x -= 1;", AssignOp::SubtractAssign),
        ("x *= 1;", AssignOp::MultiplyAssign),
        ("x /= 1;", AssignOp::DivideAssign),
    ];
    for (code, expected) in cases.iter() {
        match &parse(code).body[0].kind {
            StmtKind::Assign { op, .. } => assert_eq!(op, expected),
            other => panic!("expected assignment, got {:?}", other),
        }
    }
}

#[test]
fn test_statement_lines_skip_blanks_and_comments() {
    let script = parse("x = 1;\ny = 2;\n\n# comment\nz = 3;");
    let lines: Vec<usize> = script.body.iter().map(|stmt| stmt.line).collect();
    assert_eq!(lines, vec![1, 2, 5]);
}

#[test]
fn test_fn_decl_shape() {
    let script = parse("fn add(a, b) { return a + b; }");
    match &script.body[0].kind {
        StmtKind::FnDecl { name, params, body } => {
            assert_eq!(name, "add");
            assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
            assert_eq!(body.len(), 1);
            assert_eq!(
                body[0].kind,
                StmtKind::Return {
                    value: Some(binary(BinaryOp::Add, ident("a"), ident("b"))),
                }
            );
        }
        other => panic!("expected fn decl, got {:?}", other),
    }
}

#[test]
fn test_bare_return() {
    let script = parse("fn f() { return; }");
    match &script.body[0].kind {
        StmtKind::FnDecl { body, .. } => {
            assert_eq!(body[0].kind, StmtKind::Return { value: None });
        }
        other => panic!("expected fn decl, got {:?}", other),
    }
}

#[test]
fn test_else_if_nests_in_the_alternate() {
    let script = parse("if a { } else if b { } else { x = 1; }");
    match &script.body[0].kind {
        StmtKind::If {
            test, alternate, ..
        } => {
            assert_eq!(*test, ident("a"));
            let alternate = alternate.as_ref().expect("outer else");
            assert_eq!(alternate.len(), 1);
            match &alternate[0].kind {
                StmtKind::If {
                    test, alternate, ..
                } => {
                    assert_eq!(*test, ident("b"));
                    let last = alternate.as_ref().expect("inner else");
                    assert_eq!(last.len(), 1);
                }
                other => panic!("expected nested if, got {:?}", other),
            }
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_loop_statements() {
    let script = parse("while x { break; }\nfor n in xs { continue; }");
    match &script.body[0].kind {
        StmtKind::While { test, body } => {
            assert_eq!(*test, ident("x"));
            assert_eq!(body[0].kind, StmtKind::Break);
        }
        other => panic!("expected while, got {:?}", other),
    }
    match &script.body[1].kind {
        StmtKind::For {
            var,
            iterable,
            body,
        } => {
            assert_eq!(var, "n");
            assert_eq!(*iterable, ident("xs"));
            assert_eq!(body[0].kind, StmtKind::Continue);
        }
        other => panic!("expected for, got {:?}", other),
    }
}

// ============================================================================
// Precedence and associativity tests
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse_expr("1 + 2 * 3;"),
        binary(BinaryOp::Add, int(1), binary(BinaryOp::Multiply, int(2), int(3)))
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse_expr("(1 + 2) * 3;"),
        binary(BinaryOp::Multiply, binary(BinaryOp::Add, int(1), int(2)), int(3))
    );
}

#[test]
fn test_additive_chains_are_left_associative() {
    assert_eq!(
        parse_expr("1 - 2 - 3;"),
        binary(
            BinaryOp::Subtract,
            binary(BinaryOp::Subtract, int(1), int(2)),
            int(3)
        )
    );
}

#[test]
fn test_power_chains_are_right_associative() {
    assert_eq!(
        parse_expr("2 ** 3 ** 2;"),
        binary(BinaryOp::Power, int(2), binary(BinaryOp::Power, int(3), int(2)))
    );
}

#[test]
fn test_unary_minus_wraps_the_power() {
    assert_eq!(
        parse_expr("-2 ** 2;"),
        Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(binary(BinaryOp::Power, int(2), int(2))),
        }
    );
}

#[test]
fn test_not_wraps_the_comparison() {
    assert_eq!(
        parse_expr("not a == b;"),
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(binary(BinaryOp::Equal, ident("a"), ident("b"))),
        }
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse_expr("a and b or c;"),
        Expr::Logical {
            op: LogicalOp::Or,
            left: Box::new(Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(ident("a")),
                right: Box::new(ident("b")),
            }),
            right: Box::new(ident("c")),
        }
    );
}

#[test]
fn test_comparison_does_not_chain() {
    assert!(parse_to_ast("x = 1 < 2 < 3;").is_err());
}

#[test]
fn test_postfix_chains_left_to_right() {
    assert_eq!(
        parse_expr("f(1)[0];"),
        Expr::Index {
            object: Box::new(Expr::Call {
                callee: Box::new(ident("f")),
                args: vec![int(1)],
            }),
            index: Box::new(int(0)),
        }
    );
}

#[test]
fn test_call_with_no_args() {
    assert_eq!(
        parse_expr("f();"),
        Expr::Call {
            callee: Box::new(ident("f")),
            args: vec![],
        }
    );
}

// ============================================================================
// Literal tests
// ============================================================================

#[test]
fn test_numeric_literals() {
    assert_eq!(parse_expr("42;"), int(42));
    assert_eq!(parse_expr("2.5;"), Expr::Literal(Literal::Float(2.5)));
    assert_eq!(parse_expr("1e9;"), Expr::Literal(Literal::Float(1e9)));
    assert_eq!(parse_expr("2.5e-3;"), Expr::Literal(Literal::Float(0.0025)));
}

#[test]
fn test_int_literals_use_the_full_width() {
    assert_eq!(
        parse_expr("170141183460469231731687303715884105727;"),
        int(i128::max_value())
    );
}

#[test]
fn test_string_escapes_are_decoded() {
    assert_eq!(
        parse_expr(r#""a\nb\\c\"d";"#),
        Expr::Literal(Literal::Str("a\nb\\c\"d".to_string()))
    );
}

#[test]
fn test_keyword_literals() {
    assert_eq!(parse_expr("true;"), Expr::Literal(Literal::Bool(true)));
    assert_eq!(parse_expr("false;"), Expr::Literal(Literal::Bool(false)));
    assert_eq!(parse_expr("none;"), Expr::Literal(Literal::None));
}

#[test]
fn test_keyword_prefixed_identifiers() {
    // "and", "none" and "for" are keywords; these names only start with them.
    assert_eq!(parse_expr("andy;"), ident("andy"));
    assert_eq!(parse_expr("nonempty;"), ident("nonempty"));
    assert_eq!(parse_expr("fortune;"), ident("fortune"));
}

#[test]
fn test_container_literals() {
    assert_eq!(parse_expr("[1, 2];"), Expr::List(vec![int(1), int(2)]));
    assert_eq!(parse_expr("(1,);"), Expr::Tuple(vec![int(1)]));
    assert_eq!(parse_expr("();"), Expr::Tuple(vec![]));
    assert_eq!(parse_expr("(1);"), int(1));
    assert_eq!(
        parse_expr("{1: 2};"),
        Expr::Dict(vec![(int(1), int(2))])
    );
    assert_eq!(parse_expr("{};"), Expr::Dict(vec![]));
    assert_eq!(parse_expr("{1, 2};"), Expr::Set(vec![int(1), int(2)]));
}

// ============================================================================
// Rejection tests
// ============================================================================

#[test]
fn test_missing_semicolon() {
    assert!(parse_to_ast("x = 1").is_err());
}

#[test]
fn test_garbage_after_a_number() {
    assert!(parse_to_ast("x = 123abc;").is_err());
}

#[test]
fn test_unterminated_string() {
    assert!(parse_to_ast(r#"x = "abc;"#).is_err());
}

#[test]
fn test_keywords_are_not_identifiers() {
    assert!(parse_to_ast("for = 1;").is_err());
    assert!(parse_to_ast("fn = 1;").is_err());
}

#[test]
fn test_assignment_is_not_an_expression() {
    assert!(parse_to_ast("x = (y = 1);").is_err());
}
