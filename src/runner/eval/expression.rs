//! Expression evaluation.
//!
//! The value-producing half of the interpreter: literals, operators,
//! indexing and calls. Statement control flow lives in `statement`.

use std::cmp::Ordering;
use std::convert::TryFrom;

use crate::parser::ast::{BinaryOp, Expr, Literal, LogicalOp, UnaryOp};
use crate::runner::ds::env::EvalContext;
use crate::runner::ds::error::ScriptError;
use crate::runner::ds::value::{is_truthy, script_equals, Dict, Set, Value};
use crate::runner::eval::function::call_value;
use crate::runner::std_lib::lookup_builtin;

use super::types::ValueResult;

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &Expr, ctx: &mut EvalContext) -> ValueResult {
    match expr {
        Expr::Literal(lit) => Ok(evaluate_literal(lit)),

        Expr::Ident(name) => evaluate_ident(name, ctx),

        Expr::List(elements) => {
            let mut items = vec![];
            for element in elements {
                items.push(evaluate_expression(element, ctx)?);
            }
            Ok(Value::List(items))
        }

        Expr::Tuple(elements) => {
            let mut items = vec![];
            for element in elements {
                items.push(evaluate_expression(element, ctx)?);
            }
            Ok(Value::Tuple(items))
        }

        Expr::Dict(entries) => {
            let mut dict = Dict::new();
            for (key_expr, value_expr) in entries {
                let key = evaluate_expression(key_expr, ctx)?;
                check_dict_key(&key)?;
                let value = evaluate_expression(value_expr, ctx)?;
                dict.insert(key, value);
            }
            Ok(Value::Dict(dict))
        }

        Expr::Set(elements) => {
            let mut set = Set::new();
            for element in elements {
                let item = evaluate_expression(element, ctx)?;
                check_dict_key(&item)?;
                set.insert(item);
            }
            Ok(Value::Set(set))
        }

        Expr::Unary { op, operand } => evaluate_unary(op, operand, ctx),

        Expr::Binary { op, left, right } => {
            let left_val = evaluate_expression(left, ctx)?;
            let right_val = evaluate_expression(right, ctx)?;
            apply_binary(op, &left_val, &right_val)
        }

        Expr::Logical { op, left, right } => evaluate_logical(op, left, right, ctx),

        Expr::Call { callee, args } => {
            let callee_val = evaluate_expression(callee, ctx)?;
            let mut arg_values = vec![];
            for arg in args {
                arg_values.push(evaluate_expression(arg, ctx)?);
            }
            call_value(ctx, callee_val, arg_values)
        }

        Expr::Index { object, index } => {
            let object_val = evaluate_expression(object, ctx)?;
            let index_val = evaluate_expression(index, ctx)?;
            index_value(&object_val, &index_val)
        }
    }
}

/// Evaluate a literal and return its value.
fn evaluate_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Int(n) => Value::Int(*n),
        Literal::Float(x) => Value::Float(*x),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::None => Value::None,
    }
}

/// Resolve a name: innermost frame, then globals, then builtins.
fn evaluate_ident(name: &str, ctx: &mut EvalContext) -> ValueResult {
    if let Some(value) = ctx.lookup(name) {
        return Ok(value);
    }
    match lookup_builtin(name) {
        Some(builtin) => Ok(Value::Builtin(builtin)),
        None => Err(ScriptError::name(format!("name '{}' is not defined", name))),
    }
}

/// Evaluate a unary expression.
fn evaluate_unary(op: &UnaryOp, operand: &Expr, ctx: &mut EvalContext) -> ValueResult {
    let value = evaluate_expression(operand, ctx)?;
    match op {
        UnaryOp::Not => Ok(Value::Bool(!is_truthy(&value))),
        UnaryOp::Negate => match value {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(overflow_error),
            Value::Float(x) => Ok(Value::Float(-x)),
            other => Err(ScriptError::type_error(format!(
                "bad operand type for unary -: {}",
                other.type_name()
            ))),
        },
    }
}

/// Evaluate a logical expression with short-circuit evaluation. `and` and
/// `or` hand back the deciding operand unchanged rather than coercing it
/// to a bool.
fn evaluate_logical(op: &LogicalOp, left: &Expr, right: &Expr, ctx: &mut EvalContext) -> ValueResult {
    let left_val = evaluate_expression(left, ctx)?;
    match op {
        LogicalOp::And => {
            if is_truthy(&left_val) {
                evaluate_expression(right, ctx)
            } else {
                Ok(left_val)
            }
        }
        LogicalOp::Or => {
            if is_truthy(&left_val) {
                Ok(left_val)
            } else {
                evaluate_expression(right, ctx)
            }
        }
    }
}

/// Apply a binary operator to two already-evaluated values. Also the
/// entry point for augmented assignment, which reuses the `+` family.
pub fn apply_binary(op: &BinaryOp, left: &Value, right: &Value) -> ValueResult {
    match op {
        // Arithmetic
        BinaryOp::Add => add_values(left, right),
        BinaryOp::Subtract => subtract_values(left, right),
        BinaryOp::Multiply => multiply_values(left, right),
        BinaryOp::Divide => divide_values(left, right),
        BinaryOp::FloorDivide => floor_divide_values(left, right),
        BinaryOp::Modulo => modulo_values(left, right),
        BinaryOp::Power => power_values(left, right),

        // Equality
        BinaryOp::Equal => Ok(Value::Bool(script_equals(left, right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!script_equals(left, right))),

        // Ordering; incomparable pairs like nan stay false on every arm.
        BinaryOp::LessThan => Ok(Value::Bool(matches!(
            compare_order(left, right)?,
            Some(Ordering::Less)
        ))),
        BinaryOp::LessThanEqual => Ok(Value::Bool(matches!(
            compare_order(left, right)?,
            Some(Ordering::Less) | Some(Ordering::Equal)
        ))),
        BinaryOp::GreaterThan => Ok(Value::Bool(matches!(
            compare_order(left, right)?,
            Some(Ordering::Greater)
        ))),
        BinaryOp::GreaterThanEqual => Ok(Value::Bool(matches!(
            compare_order(left, right)?,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ))),
    }
}

/// Numeric operand pairing. Bools deliberately stay out: `true + 1` is a
/// type error, not arithmetic on `1`.
enum NumericPair {
    Ints(i128, i128),
    Floats(f64, f64),
}

fn numeric_pair(left: &Value, right: &Value) -> Option<NumericPair> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(NumericPair::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Some(NumericPair::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Some(NumericPair::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Some(NumericPair::Floats(*a, *b)),
        _ => None,
    }
}

fn add_values(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.clone();
            items.extend(b.iter().cloned());
            Ok(Value::List(items))
        }
        (Value::Tuple(a), Value::Tuple(b)) => {
            let mut items = a.clone();
            items.extend(b.iter().cloned());
            Ok(Value::Tuple(items))
        }
        _ => match numeric_pair(left, right) {
            Some(NumericPair::Ints(a, b)) => {
                a.checked_add(b).map(Value::Int).ok_or_else(overflow_error)
            }
            Some(NumericPair::Floats(a, b)) => Ok(Value::Float(a + b)),
            None => Err(binary_type_error("+", left, right)),
        },
    }
}

fn subtract_values(left: &Value, right: &Value) -> ValueResult {
    match numeric_pair(left, right) {
        Some(NumericPair::Ints(a, b)) => {
            a.checked_sub(b).map(Value::Int).ok_or_else(overflow_error)
        }
        Some(NumericPair::Floats(a, b)) => Ok(Value::Float(a - b)),
        None => Err(binary_type_error("-", left, right)),
    }
}

fn multiply_values(left: &Value, right: &Value) -> ValueResult {
    match (left, right) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Ok(Value::Str(s.repeat(repeat_count(*n)?)))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            Ok(Value::List(repeat_items(items, repeat_count(*n)?)))
        }
        (Value::Tuple(items), Value::Int(n)) | (Value::Int(n), Value::Tuple(items)) => {
            Ok(Value::Tuple(repeat_items(items, repeat_count(*n)?)))
        }
        _ => match numeric_pair(left, right) {
            Some(NumericPair::Ints(a, b)) => {
                a.checked_mul(b).map(Value::Int).ok_or_else(overflow_error)
            }
            Some(NumericPair::Floats(a, b)) => Ok(Value::Float(a * b)),
            None => Err(binary_type_error("*", left, right)),
        },
    }
}

/// `/` always produces a float; a zero divisor of either flavor errors
/// rather than yielding an infinity.
fn divide_values(left: &Value, right: &Value) -> ValueResult {
    match numeric_pair(left, right) {
        Some(NumericPair::Ints(a, b)) => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(a as f64 / b as f64))
        }
        Some(NumericPair::Floats(a, b)) => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float(a / b))
        }
        None => Err(binary_type_error("/", left, right)),
    }
}

fn floor_divide_values(left: &Value, right: &Value) -> ValueResult {
    match numeric_pair(left, right) {
        Some(NumericPair::Ints(a, b)) => {
            if b == 0 {
                return Err(division_by_zero());
            }
            int_floor_div(a, b).map(Value::Int).ok_or_else(overflow_error)
        }
        Some(NumericPair::Floats(a, b)) => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Float((a / b).floor()))
        }
        None => Err(binary_type_error("//", left, right)),
    }
}

fn modulo_values(left: &Value, right: &Value) -> ValueResult {
    match numeric_pair(left, right) {
        Some(NumericPair::Ints(a, b)) => {
            if b == 0 {
                return Err(ScriptError::value("modulo by zero".to_string()));
            }
            Ok(Value::Int(int_mod(a, b)))
        }
        Some(NumericPair::Floats(a, b)) => {
            if b == 0.0 {
                return Err(ScriptError::value("modulo by zero".to_string()));
            }
            let r = a % b;
            let r = if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r + b
            } else {
                r
            };
            Ok(Value::Float(r))
        }
        None => Err(binary_type_error("%", left, right)),
    }
}

fn power_values(left: &Value, right: &Value) -> ValueResult {
    match numeric_pair(left, right) {
        Some(NumericPair::Ints(a, b)) => {
            if b < 0 {
                // A negative exponent leaves the integers.
                return Ok(Value::Float((a as f64).powf(b as f64)));
            }
            let exp = u32::try_from(b)
                .map_err(|_| ScriptError::value("exponent too large".to_string()))?;
            a.checked_pow(exp).map(Value::Int).ok_or_else(overflow_error)
        }
        Some(NumericPair::Floats(a, b)) => Ok(Value::Float(a.powf(b))),
        None => Err(binary_type_error("**", left, right)),
    }
}

/// Floor division with the quotient rounded toward negative infinity, so
/// `-7 // 3` is `-3`.
fn int_floor_div(a: i128, b: i128) -> Option<i128> {
    let q = a.checked_div(b)?;
    let r = a - q * b;
    if r != 0 && (r < 0) != (b < 0) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder taking the sign of the divisor, so `-7 % 3` is `2` and
/// `7 % -3` is `-2`.
fn int_mod(a: i128, b: i128) -> i128 {
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

/// Repetition count for `seq * n`. Negative counts mean zero repetitions;
/// counts beyond the address space are refused.
fn repeat_count(n: i128) -> Result<usize, ScriptError> {
    if n <= 0 {
        return Ok(0);
    }
    usize::try_from(n).map_err(|_| ScriptError::value("repeat count too large".to_string()))
}

fn repeat_items(items: &[Value], count: usize) -> Vec<Value> {
    let mut out = vec![];
    for _ in 0..count {
        out.extend(items.iter().cloned());
    }
    out
}

/// Ordering for `<`-family comparisons. Order exists for number/number
/// and string/string pairs only; everything else is `Err`, bools and
/// containers included. `Ok(None)` marks a pair that is ordered in
/// principle but not for these values (nan).
fn compare_order(left: &Value, right: &Value) -> Result<Option<Ordering>, ScriptError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        _ => match numeric_pair(left, right) {
            Some(NumericPair::Ints(a, b)) => Ok(Some(a.cmp(&b))),
            Some(NumericPair::Floats(a, b)) => Ok(a.partial_cmp(&b)),
            None => Err(ScriptError::type_error(format!(
                "cannot order {} and {}",
                left.type_name(),
                right.type_name()
            ))),
        },
    }
}

/// Index read on lists, tuples, strings and dicts. Negative sequence
/// indices count from the end.
fn index_value(object: &Value, index: &Value) -> ValueResult {
    match object {
        Value::List(items) => Ok(items[resolve_index(items.len(), index, "list")?].clone()),
        Value::Tuple(items) => Ok(items[resolve_index(items.len(), index, "tuple")?].clone()),
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let i = resolve_index(chars.len(), index, "string")?;
            Ok(Value::Str(chars[i].to_string()))
        }
        Value::Dict(dict) => {
            check_dict_key(index)?;
            dict.get(index)
                .cloned()
                .ok_or_else(|| ScriptError::key(format!("key not found: {}", index.repr())))
        }
        other => Err(ScriptError::type_error(format!(
            "{} is not indexable",
            other.type_name()
        ))),
    }
}

/// Resolve a script index against a sequence length, handling the
/// negative-from-the-end convention.
pub(crate) fn resolve_index(len: usize, index: &Value, kind: &str) -> Result<usize, ScriptError> {
    let raw = match index {
        Value::Int(n) => *n,
        other => {
            return Err(ScriptError::type_error(format!(
                "{} indices must be integers, not {}",
                kind,
                other.type_name()
            )))
        }
    };
    let adjusted = if raw < 0 { raw + len as i128 } else { raw };
    if adjusted < 0 || adjusted >= len as i128 {
        return Err(ScriptError::index(format!(
            "{} index out of range: {}",
            kind, raw
        )));
    }
    Ok(adjusted as usize)
}

/// Dict keys and set elements must hold still under mutation, so the
/// mutable containers are rejected. Tuples are checked recursively.
pub(crate) fn check_dict_key(key: &Value) -> Result<(), ScriptError> {
    match key {
        Value::List(_) | Value::Dict(_) | Value::Set(_) => Err(ScriptError::type_error(format!(
            "unhashable key type: {}",
            key.type_name()
        ))),
        Value::Tuple(items) => {
            for item in items {
                check_dict_key(item)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn overflow_error() -> ScriptError {
    ScriptError::value("integer overflow".to_string())
}

fn division_by_zero() -> ScriptError {
    ScriptError::value("division by zero".to_string())
}

fn binary_type_error(op: &str, left: &Value, right: &Value) -> ScriptError {
    ScriptError::type_error(format!(
        "unsupported operand types for {}: {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}
