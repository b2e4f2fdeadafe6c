//! Statement execution.
//!
//! Control flow, assignment and declarations. Statements produce
//! completion records; loops and calls decide how far an abrupt
//! completion unwinds.

use std::rc::Rc;

use crate::parser::ast::{AssignOp, AssignTarget, BinaryOp, Expr, Stmt, StmtKind};
use crate::runner::ds::env::EvalContext;
use crate::runner::ds::error::ScriptError;
use crate::runner::ds::value::{is_truthy, FuncData, Value};

use super::expression::{apply_binary, check_dict_key, evaluate_expression, resolve_index};
use super::types::{Completion, CompletionType, EvalResult};

/// Execute one statement, attaching its line to any error that does not
/// already carry one. Errors from deeper statements keep their own line.
pub fn execute_statement(stmt: &Stmt, ctx: &mut EvalContext) -> EvalResult {
    dispatch_statement(stmt, ctx).map_err(|e| e.with_location(ctx.file(), stmt.line))
}

/// Execute statements in order until one completes abruptly.
pub fn execute_block(body: &[Stmt], ctx: &mut EvalContext) -> EvalResult {
    for stmt in body {
        let completion = execute_statement(stmt, ctx)?;
        if completion.is_abrupt() {
            return Ok(completion);
        }
    }
    Ok(Completion::normal())
}

fn dispatch_statement(stmt: &Stmt, ctx: &mut EvalContext) -> EvalResult {
    match &stmt.kind {
        StmtKind::Expr(expr) => {
            let value = evaluate_expression(expr, ctx)?;
            Ok(Completion::normal_value(value))
        }

        StmtKind::Assign { target, op, value } => execute_assign(target, op, value, ctx),

        StmtKind::FnDecl { name, params, body } => {
            for (i, param) in params.iter().enumerate() {
                if params[..i].contains(param) {
                    return Err(ScriptError::syntax(format!(
                        "duplicate parameter '{}' in function '{}'",
                        param, name
                    )));
                }
            }
            let func = FuncData {
                name: name.clone(),
                params: params.clone(),
                body: body.clone(),
            };
            ctx.assign(name, Value::Func(Rc::new(func)));
            Ok(Completion::normal())
        }

        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            let test_val = evaluate_expression(test, ctx)?;
            if is_truthy(&test_val) {
                execute_block(consequent, ctx)
            } else if let Some(alternate) = alternate {
                execute_block(alternate, ctx)
            } else {
                Ok(Completion::normal())
            }
        }

        StmtKind::While { test, body } => {
            loop {
                let test_val = evaluate_expression(test, ctx)?;
                if !is_truthy(&test_val) {
                    break;
                }
                let completion = execute_block(body, ctx)?;
                match completion.completion_type {
                    CompletionType::Break => break,
                    CompletionType::Return => return Ok(completion),
                    CompletionType::Continue | CompletionType::Normal => {}
                }
            }
            Ok(Completion::normal())
        }

        StmtKind::For {
            var,
            iterable,
            body,
        } => {
            let iterable_val = evaluate_expression(iterable, ctx)?;
            // The loop walks a snapshot, so the body cannot pull the
            // sequence out from under itself.
            let items = iteration_items(&iterable_val)?;
            for item in items {
                ctx.assign(var, item);
                let completion = execute_block(body, ctx)?;
                match completion.completion_type {
                    CompletionType::Break => break,
                    CompletionType::Return => return Ok(completion),
                    CompletionType::Continue | CompletionType::Normal => {}
                }
            }
            Ok(Completion::normal())
        }

        StmtKind::Return { value } => {
            let result = match value {
                Some(expr) => evaluate_expression(expr, ctx)?,
                None => Value::None,
            };
            Ok(Completion::return_value(result))
        }

        StmtKind::Break => Ok(Completion::break_completion()),

        StmtKind::Continue => Ok(Completion::continue_completion()),
    }
}

/// What `for` walks: list and tuple elements, string characters, dict
/// keys, set members.
fn iteration_items(value: &Value) -> Result<Vec<Value>, ScriptError> {
    match value {
        Value::List(items) | Value::Tuple(items) => Ok(items.clone()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        Value::Dict(dict) => Ok(dict.keys().cloned().collect()),
        Value::Set(set) => Ok(set.iter().cloned().collect()),
        other => Err(ScriptError::type_error(format!(
            "{} is not iterable",
            other.type_name()
        ))),
    }
}

fn execute_assign(
    target: &AssignTarget,
    op: &AssignOp,
    value: &Expr,
    ctx: &mut EvalContext,
) -> EvalResult {
    let rhs = evaluate_expression(value, ctx)?;

    if target.indices.is_empty() {
        let final_value = match augmented_binary(op) {
            None => rhs,
            Some(bin) => {
                let current = ctx
                    .lookup(&target.name)
                    .ok_or_else(|| undefined_name(&target.name))?;
                apply_binary(&bin, &current, &rhs)?
            }
        };
        ctx.assign(&target.name, final_value);
        return Ok(Completion::normal());
    }

    let mut indices = vec![];
    for index_expr in &target.indices {
        indices.push(evaluate_expression(index_expr, ctx)?);
    }

    // An indexed target mutates the binding in place, wherever it lives.
    let mut slot = ctx
        .binding_mut(&target.name)
        .ok_or_else(|| undefined_name(&target.name))?;
    for index in &indices[..indices.len() - 1] {
        slot = index_into_mut(slot, index)?;
    }
    store_final(slot, &indices[indices.len() - 1], op, rhs)?;
    Ok(Completion::normal())
}

/// The binary operator behind an augmented assignment, or `None` for
/// plain `=`.
fn augmented_binary(op: &AssignOp) -> Option<BinaryOp> {
    match op {
        AssignOp::Assign => None,
        AssignOp::AddAssign => Some(BinaryOp::Add),
        AssignOp::SubtractAssign => Some(BinaryOp::Subtract),
        AssignOp::MultiplyAssign => Some(BinaryOp::Multiply),
        AssignOp::DivideAssign => Some(BinaryOp::Divide),
    }
}

/// Step one level into a container on the write path. Tuples and strings
/// refuse: writing through them would mutate an immutable value.
fn index_into_mut<'a>(
    container: &'a mut Value,
    index: &Value,
) -> Result<&'a mut Value, ScriptError> {
    match container {
        Value::List(items) => {
            let i = resolve_index(items.len(), index, "list")?;
            Ok(&mut items[i])
        }
        Value::Dict(dict) => {
            check_dict_key(index)?;
            dict.get_mut(index).ok_or_else(|| key_not_found(index))
        }
        Value::Tuple(_) | Value::Str(_) => Err(no_item_assignment(container)),
        other => Err(ScriptError::type_error(format!(
            "{} is not indexable",
            other.type_name()
        ))),
    }
}

/// Write through the last index. Dict stores may create the key; list
/// stores require the index in range.
fn store_final(
    container: &mut Value,
    index: &Value,
    op: &AssignOp,
    rhs: Value,
) -> Result<(), ScriptError> {
    match container {
        Value::List(items) => {
            let i = resolve_index(items.len(), index, "list")?;
            let new_value = match augmented_binary(op) {
                None => rhs,
                Some(bin) => apply_binary(&bin, &items[i], &rhs)?,
            };
            items[i] = new_value;
            Ok(())
        }
        Value::Dict(dict) => {
            check_dict_key(index)?;
            let new_value = match augmented_binary(op) {
                None => rhs,
                Some(bin) => {
                    let current = dict
                        .get(index)
                        .cloned()
                        .ok_or_else(|| key_not_found(index))?;
                    apply_binary(&bin, &current, &rhs)?
                }
            };
            dict.insert(index.clone(), new_value);
            Ok(())
        }
        Value::Tuple(_) | Value::Str(_) => Err(no_item_assignment(container)),
        other => Err(ScriptError::type_error(format!(
            "{} is not indexable",
            other.type_name()
        ))),
    }
}

fn undefined_name(name: &str) -> ScriptError {
    ScriptError::name(format!("name '{}' is not defined", name))
}

fn key_not_found(key: &Value) -> ScriptError {
    ScriptError::key(format!("key not found: {}", key.repr()))
}

fn no_item_assignment(container: &Value) -> ScriptError {
    ScriptError::type_error(format!(
        "{} does not support item assignment",
        container.type_name()
    ))
}
