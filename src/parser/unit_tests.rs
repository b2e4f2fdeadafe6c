use super::api::{parse_to_pairs, parse_to_token_tree, GaffParser, Rule};

use pest::consumes_to;
use pest::parses_to;
use pest::Parser;

#[test]
fn test_int_literal() {
    parses_to! {
        parser: GaffParser,
        input: "42",
        rule: Rule::literal,
        tokens: [
            literal(0, 2, [
                int_literal(0, 2)
            ])
        ]
    };
}

#[test]
fn test_float_literal_with_dot() {
    parses_to! {
        parser: GaffParser,
        input: "3.14",
        rule: Rule::literal,
        tokens: [
            literal(0, 4, [
                float_literal(0, 4)
            ])
        ]
    };
}

#[test]
fn test_float_literal_exponent_only() {
    parses_to! {
        parser: GaffParser,
        input: "1e9",
        rule: Rule::literal,
        tokens: [
            literal(0, 3, [
                float_literal(0, 3)
            ])
        ]
    };
}

#[test]
fn test_float_literal_negative_exponent() {
    parses_to! {
        parser: GaffParser,
        input: "2.5e-3",
        rule: Rule::literal,
        tokens: [
            literal(0, 6, [
                float_literal(0, 6)
            ])
        ]
    };
}

#[test]
fn test_string_literal_with_escape() {
    parses_to! {
        parser: GaffParser,
        input: "\"a\\nb\"",
        rule: Rule::literal,
        tokens: [
            literal(0, 6, [
                string_literal(0, 6)
            ])
        ]
    };
}

#[test]
fn test_bool_literal() {
    parses_to! {
        parser: GaffParser,
        input: "true",
        rule: Rule::literal,
        tokens: [
            literal(0, 4, [
                bool_literal(0, 4)
            ])
        ]
    };
}

#[test]
fn test_none_literal() {
    parses_to! {
        parser: GaffParser,
        input: "none",
        rule: Rule::literal,
        tokens: [
            literal(0, 4, [
                none_literal(0, 4)
            ])
        ]
    };
}

// `format` starts with `for` but must stay one identifier.
#[test]
fn test_ident_with_keyword_prefix() {
    parses_to! {
        parser: GaffParser,
        input: "format",
        rule: Rule::ident,
        tokens: [
            ident(0, 6)
        ]
    };
}

#[test]
fn test_ident_with_keyword_inside() {
    parses_to! {
        parser: GaffParser,
        input: "info",
        rule: Rule::ident,
        tokens: [
            ident(0, 4)
        ]
    };
}

#[test]
fn test_bare_keyword_is_not_an_ident() {
    assert!(GaffParser::parse(Rule::ident, "while").is_err());
    assert!(GaffParser::parse(Rule::ident, "none").is_err());
}

#[test]
fn test_assign_op_plain_equals() {
    parses_to! {
        parser: GaffParser,
        input: "=",
        rule: Rule::assign_op,
        tokens: [
            assign_op(0, 1)
        ]
    };
}

#[test]
fn test_assign_op_augmented() {
    parses_to! {
        parser: GaffParser,
        input: "+=",
        rule: Rule::assign_op,
        tokens: [
            assign_op(0, 2)
        ]
    };
}

#[test]
fn test_break_statement() {
    parses_to! {
        parser: GaffParser,
        input: "break;",
        rule: Rule::statement,
        tokens: [
            statement(0, 6, [
                break_stmt(0, 6)
            ])
        ]
    };
}

#[test]
fn test_continue_statement() {
    parses_to! {
        parser: GaffParser,
        input: "continue;",
        rule: Rule::statement,
        tokens: [
            statement(0, 9, [
                continue_stmt(0, 9)
            ])
        ]
    };
}

#[test]
fn test_keyword_operators_need_a_boundary() {
    assert!(GaffParser::parse(Rule::script, "a or b;").is_ok());
    assert!(GaffParser::parse(Rule::script, "a orb;").is_err());
    assert!(GaffParser::parse(Rule::script, "while not done { x = 1; }").is_ok());
}

#[test]
fn test_statement_keywords_accept_following_ident() {
    assert!(GaffParser::parse(Rule::script, "if x { y = 1; }").is_ok());
    assert!(GaffParser::parse(Rule::script, "for i in xs { }").is_ok());
    assert!(GaffParser::parse(Rule::script, "return x;").is_ok());
}

#[test]
fn test_chained_comparison_is_rejected() {
    assert!(GaffParser::parse(Rule::script, "a == b;").is_ok());
    assert!(GaffParser::parse(Rule::script, "a == b == c;").is_err());
}

#[test]
fn test_missing_semicolon_is_rejected() {
    assert!(GaffParser::parse(Rule::script, "return 1").is_err());
    assert!(GaffParser::parse(Rule::script, "x = 1").is_err());
}

#[test]
fn test_adjacent_idents_are_rejected() {
    assert!(GaffParser::parse(Rule::script, "123abc;").is_err());
}

#[test]
fn test_empty_and_comment_only_scripts() {
    assert!(GaffParser::parse(Rule::script, "").is_ok());
    assert!(GaffParser::parse(Rule::script, "# nothing here\n").is_ok());
}

#[test]
fn test_token_tree_for_assignment() {
    let tree = parse_to_token_tree("x = 1;").unwrap();
    let expected = [
        r#"script => (0,6) #"x = 1;""#,
        r#"  statement => (0,6) #"x = 1;""#,
        r#"    assign_stmt => (0,6) #"x = 1;""#,
        r#"      assign_target => (0,1) #"x""#,
        r#"        ident => (0,1) #"x""#,
        r#"      assign_op => (2,3) #"=""#,
        r#"      or_expr => (4,5) #"1""#,
        r#"        and_expr => (4,5) #"1""#,
        r#"          not_expr => (4,5) #"1""#,
        r#"            comparison => (4,5) #"1""#,
        r#"              additive => (4,5) #"1""#,
        r#"                multiplicative => (4,5) #"1""#,
        r#"                  unary => (4,5) #"1""#,
        r#"                    power => (4,5) #"1""#,
        r#"                      postfix => (4,5) #"1""#,
        r#"                        primary => (4,5) #"1""#,
        r#"                          literal => (4,5) #"1""#,
        r#"                            int_literal => (4,5) #"1""#,
        r#"  EOI => (6,6) #"""#,
    ]
    .join("\n");
    assert_eq!(tree, expected);
}

#[test]
fn test_token_tree_reports_parse_errors() {
    let err = parse_to_token_tree("x = ;").unwrap_err();
    assert!(err.starts_with("Parse error"));
}

#[test]
fn test_pairs_expose_the_statement_sequence() {
    let mut pairs = parse_to_pairs("a = 1; b = a + 1;").unwrap();
    let script = pairs.next().unwrap();
    assert_eq!(script.as_rule(), Rule::script);
    let statements: Vec<_> = script
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::statement)
        .collect();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].as_str(), "b = a + 1;");
}
