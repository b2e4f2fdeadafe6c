use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/gaff_grammar.pest"] // relative to src
pub struct GaffParser;

const TAB_WIDTH: usize = 2;

/// Parse a script and render the raw pair tree, one rule per line.
/// Grammar debugging aid; the AST builders below are the real consumers.
pub fn parse_to_token_tree(script: &str) -> Result<String, String> {
    let mut tree = vec![];
    match GaffParser::parse(Rule::script, script) {
        Ok(pairs) => {
            for pair in pairs {
                tree.push(pair_to_string(pair, 0).join("\n"));
            }
        }
        Err(rule) => {
            return Err(format!("Parse error due to {:?}", rule));
        }
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    let mut string_pads = String::with_capacity(level * TAB_WIDTH);
    for _ in 1..level * TAB_WIDTH + 1 {
        string_pads.push(' ');
    }
    tree.push(format!("{}{}", string_pads, rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

pub fn parse_to_pairs(script: &str) -> Result<Pairs<Rule>, Error<Rule>> {
    GaffParser::parse(Rule::script, script)
}

pub fn parse_to_ast(script: &str) -> Result<Script, Error<Rule>> {
    let mut pairs = GaffParser::parse(Rule::script, script)?;
    let script_pair = pairs.next().unwrap();
    let mut body = vec![];
    for pair in script_pair.into_inner() {
        match pair.as_rule() {
            Rule::statement => body.push(build_ast_from_statement(pair)?),
            Rule::EOI => { /* Do nothing */ }
            _ => return Err(get_unexpected_error(1, &pair)),
        }
    }
    Ok(Script { body })
}

fn build_ast_from_statement(pair: Pair<Rule>) -> Result<Stmt, Error<Rule>> {
    let line = pair.as_span().start_pos().line_col().0;
    let inner_pair = pair.into_inner().next().unwrap();
    let kind = match inner_pair.as_rule() {
        Rule::fn_decl => build_ast_from_fn_decl(inner_pair)?,
        Rule::if_stmt => build_ast_from_if_stmt(inner_pair)?,
        Rule::while_stmt => {
            let mut pair_iter = inner_pair.into_inner();
            let test = build_ast_from_expression(pair_iter.next().unwrap())?;
            let body = build_ast_from_block(pair_iter.next().unwrap())?;
            StmtKind::While { test, body }
        }
        Rule::for_stmt => {
            let mut pair_iter = inner_pair.into_inner();
            let var = pair_iter.next().unwrap().as_str().to_string();
            let iterable = build_ast_from_expression(pair_iter.next().unwrap())?;
            let body = build_ast_from_block(pair_iter.next().unwrap())?;
            StmtKind::For {
                var,
                iterable,
                body,
            }
        }
        Rule::return_stmt => {
            let value = match inner_pair.into_inner().next() {
                Some(value_pair) => Some(build_ast_from_expression(value_pair)?),
                None => None,
            };
            StmtKind::Return { value }
        }
        Rule::break_stmt => StmtKind::Break,
        Rule::continue_stmt => StmtKind::Continue,
        Rule::assign_stmt => build_ast_from_assign_stmt(inner_pair)?,
        Rule::expr_stmt => StmtKind::Expr(build_ast_from_expression(
            inner_pair.into_inner().next().unwrap(),
        )?),
        _ => return Err(get_unexpected_error(2, &inner_pair)),
    };
    Ok(Stmt { line, kind })
}

fn build_ast_from_block(pair: Pair<Rule>) -> Result<Vec<Stmt>, Error<Rule>> {
    let mut body = vec![];
    for stmt_pair in pair.into_inner() {
        body.push(build_ast_from_statement(stmt_pair)?);
    }
    Ok(body)
}

fn build_ast_from_fn_decl(pair: Pair<Rule>) -> Result<StmtKind, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let name = pair_iter.next().unwrap().as_str().to_string();
    let next_pair = pair_iter.next().unwrap();
    let (params, block_pair) = if next_pair.as_rule() == Rule::param_list {
        let params = next_pair
            .into_inner()
            .map(|p| p.as_str().to_string())
            .collect();
        (params, pair_iter.next().unwrap())
    } else {
        (vec![], next_pair)
    };
    Ok(StmtKind::FnDecl {
        name,
        params,
        body: build_ast_from_block(block_pair)?,
    })
}

fn build_ast_from_if_stmt(pair: Pair<Rule>) -> Result<StmtKind, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let test = build_ast_from_expression(pair_iter.next().unwrap())?;
    let consequent = build_ast_from_block(pair_iter.next().unwrap())?;
    let alternate = match pair_iter.next() {
        Some(else_pair) => Some(build_ast_from_else_clause(else_pair)?),
        None => None,
    };
    Ok(StmtKind::If {
        test,
        consequent,
        alternate,
    })
}

fn build_ast_from_else_clause(pair: Pair<Rule>) -> Result<Vec<Stmt>, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::block => build_ast_from_block(inner_pair),
        Rule::if_stmt => {
            // `else if` re-enters as a one-statement alternate.
            let line = inner_pair.as_span().start_pos().line_col().0;
            let kind = build_ast_from_if_stmt(inner_pair)?;
            Ok(vec![Stmt { line, kind }])
        }
        _ => Err(get_unexpected_error(3, &inner_pair)),
    }
}

fn build_ast_from_assign_stmt(pair: Pair<Rule>) -> Result<StmtKind, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let target_pair = pair_iter.next().unwrap();
    let mut target_iter = target_pair.into_inner();
    let name = target_iter.next().unwrap().as_str().to_string();
    let mut indices = vec![];
    for index_pair in target_iter {
        indices.push(build_ast_from_expression(
            index_pair.into_inner().next().unwrap(),
        )?);
    }
    let op_pair = pair_iter.next().unwrap();
    let op = match op_pair.as_str() {
        "=" => AssignOp::Assign,
        "+=" => AssignOp::AddAssign,
        "-=" => AssignOp::SubtractAssign,
        "*=" => AssignOp::MultiplyAssign,
        "/=" => AssignOp::DivideAssign,
        _ => return Err(get_unexpected_error(4, &op_pair)),
    };
    let value = build_ast_from_expression(pair_iter.next().unwrap())?;
    Ok(StmtKind::Assign {
        target: AssignTarget { name, indices },
        op,
        value,
    })
}

fn build_ast_from_expression(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    // The silent `expression` alias always hands over an or_expr pair.
    match pair.as_rule() {
        Rule::or_expr => build_ast_from_or_expr(pair),
        _ => Err(get_unexpected_error(5, &pair)),
    }
}

fn build_ast_from_or_expr(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let mut node = build_ast_from_and_expr(pair_iter.next().unwrap())?;
    for inner_pair in pair_iter {
        node = Expr::Logical {
            op: LogicalOp::Or,
            left: Box::new(node),
            right: Box::new(build_ast_from_and_expr(inner_pair)?),
        };
    }
    Ok(node)
}

fn build_ast_from_and_expr(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let mut node = build_ast_from_not_expr(pair_iter.next().unwrap())?;
    for inner_pair in pair_iter {
        node = Expr::Logical {
            op: LogicalOp::And,
            left: Box::new(node),
            right: Box::new(build_ast_from_not_expr(inner_pair)?),
        };
    }
    Ok(node)
}

fn build_ast_from_not_expr(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::not_expr => Ok(Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(build_ast_from_not_expr(inner_pair)?),
        }),
        Rule::comparison => build_ast_from_comparison(inner_pair),
        _ => Err(get_unexpected_error(6, &inner_pair)),
    }
}

fn build_ast_from_comparison(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let left = build_ast_from_additive(pair_iter.next().unwrap())?;
    if let Some(op_pair) = pair_iter.next() {
        let op = match op_pair.as_str() {
            "==" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            "<=" => BinaryOp::LessThanEqual,
            ">=" => BinaryOp::GreaterThanEqual,
            "<" => BinaryOp::LessThan,
            ">" => BinaryOp::GreaterThan,
            _ => return Err(get_unexpected_error(7, &op_pair)),
        };
        let right = build_ast_from_additive(pair_iter.next().unwrap())?;
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    } else {
        Ok(left)
    }
}

fn build_ast_from_additive(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let mut node = build_ast_from_multiplicative(pair_iter.next().unwrap())?;
    loop {
        if let Some(op_pair) = pair_iter.next() {
            let op = match op_pair.as_str() {
                "+" => BinaryOp::Add,
                "-" => BinaryOp::Subtract,
                _ => return Err(get_unexpected_error(8, &op_pair)),
            };
            let right = build_ast_from_multiplicative(pair_iter.next().unwrap())?;
            node = Expr::Binary {
                op,
                left: Box::new(node),
                right: Box::new(right),
            };
        } else {
            break;
        }
    }
    Ok(node)
}

fn build_ast_from_multiplicative(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let mut node = build_ast_from_unary(pair_iter.next().unwrap())?;
    loop {
        if let Some(op_pair) = pair_iter.next() {
            let op = match op_pair.as_str() {
                "*" => BinaryOp::Multiply,
                "//" => BinaryOp::FloorDivide,
                "/" => BinaryOp::Divide,
                "%" => BinaryOp::Modulo,
                _ => return Err(get_unexpected_error(9, &op_pair)),
            };
            let right = build_ast_from_unary(pair_iter.next().unwrap())?;
            node = Expr::Binary {
                op,
                left: Box::new(node),
                right: Box::new(right),
            };
        } else {
            break;
        }
    }
    Ok(node)
}

fn build_ast_from_unary(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::unary => Ok(Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(build_ast_from_unary(inner_pair)?),
        }),
        Rule::power => build_ast_from_power(inner_pair),
        _ => Err(get_unexpected_error(10, &inner_pair)),
    }
}

fn build_ast_from_power(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let base = build_ast_from_postfix(pair_iter.next().unwrap())?;
    if let Some(exp_pair) = pair_iter.next() {
        // The exponent re-enters at unary, giving ** its right associativity.
        let exponent = build_ast_from_unary(exp_pair)?;
        Ok(Expr::Binary {
            op: BinaryOp::Power,
            left: Box::new(base),
            right: Box::new(exponent),
        })
    } else {
        Ok(base)
    }
}

fn build_ast_from_postfix(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let mut pair_iter = pair.into_inner();
    let mut node = build_ast_from_primary(pair_iter.next().unwrap())?;
    for op_pair in pair_iter {
        node = match op_pair.as_rule() {
            Rule::call_args => Expr::Call {
                callee: Box::new(node),
                args: get_call_arguments(op_pair)?,
            },
            Rule::index_suffix => Expr::Index {
                object: Box::new(node),
                index: Box::new(build_ast_from_expression(
                    op_pair.into_inner().next().unwrap(),
                )?),
            },
            _ => return Err(get_unexpected_error(11, &op_pair)),
        };
    }
    Ok(node)
}

fn get_call_arguments(pair: Pair<Rule>) -> Result<Vec<Expr>, Error<Rule>> {
    let mut arguments = vec![];
    if let Some(arg_list_pair) = pair.into_inner().next() {
        for inner_pair in arg_list_pair.into_inner() {
            arguments.push(build_ast_from_expression(inner_pair)?);
        }
    }
    Ok(arguments)
}

fn build_ast_from_primary(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::literal => build_ast_from_literal(inner_pair),
        Rule::ident => Ok(Expr::Ident(inner_pair.as_str().to_string())),
        Rule::tuple_literal => {
            let mut elements = vec![];
            for element_pair in inner_pair.into_inner() {
                elements.push(build_ast_from_expression(element_pair)?);
            }
            Ok(Expr::Tuple(elements))
        }
        Rule::paren_expr => build_ast_from_expression(inner_pair.into_inner().next().unwrap()),
        _ => Err(get_unexpected_error(12, &inner_pair)),
    }
}

fn build_ast_from_literal(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    Ok(match inner_pair.as_rule() {
        Rule::int_literal => match inner_pair.as_str().parse::<i128>() {
            Ok(n) => Expr::Literal(Literal::Int(n)),
            Err(_) => return Err(get_custom_error("integer literal too large", &inner_pair)),
        },
        Rule::float_literal => match inner_pair.as_str().parse::<f64>() {
            Ok(f) => Expr::Literal(Literal::Float(f)),
            Err(_) => return Err(get_custom_error("malformed float literal", &inner_pair)),
        },
        Rule::string_literal => {
            let s = inner_pair.as_str();
            Expr::Literal(Literal::Str(unescape_string(&s[1..s.len() - 1])))
        }
        Rule::bool_literal => Expr::Literal(Literal::Bool(inner_pair.as_str() == "true")),
        Rule::none_literal => Expr::Literal(Literal::None),
        Rule::list_literal => {
            let mut elements = vec![];
            if let Some(list_pair) = inner_pair.into_inner().next() {
                for element_pair in list_pair.into_inner() {
                    elements.push(build_ast_from_expression(element_pair)?);
                }
            }
            Expr::List(elements)
        }
        Rule::dict_literal => {
            let mut entries = vec![];
            if let Some(entries_pair) = inner_pair.into_inner().next() {
                for entry_pair in entries_pair.into_inner() {
                    let mut entry_iter = entry_pair.into_inner();
                    let key = build_ast_from_expression(entry_iter.next().unwrap())?;
                    let value = build_ast_from_expression(entry_iter.next().unwrap())?;
                    entries.push((key, value));
                }
            }
            Expr::Dict(entries)
        }
        Rule::set_literal => {
            let list_pair = inner_pair.into_inner().next().unwrap();
            let mut elements = vec![];
            for element_pair in list_pair.into_inner() {
                elements.push(build_ast_from_expression(element_pair)?);
            }
            Expr::Set(elements)
        }
        _ => return Err(get_unexpected_error(13, &inner_pair)),
    })
}

/// The grammar only admits the escapes `\"`, `\\`, `\n`, `\t` and `\r`,
/// so this never sees anything else after a backslash.
fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn get_custom_error(message: &str, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: message.to_string(),
        },
        pair.as_span(),
    )
}
