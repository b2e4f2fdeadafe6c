//! Core built-ins.
//!
//! The native functions scripts reach by bare name. They resolve after
//! locals and globals, so a script binding `print` shadows the builtin.

use crate::runner::ds::env::EvalContext;
use crate::runner::ds::error::ScriptError;
use crate::runner::ds::value::{Builtin, Value};

lazy_static! {
    static ref BUILTINS: Vec<Builtin> = vec![
        Builtin {
            name: "print",
            func: builtin_print
        },
        Builtin {
            name: "len",
            func: builtin_len
        },
        Builtin {
            name: "str",
            func: builtin_str
        },
        Builtin {
            name: "int",
            func: builtin_int
        },
        Builtin {
            name: "float",
            func: builtin_float
        },
        Builtin {
            name: "type",
            func: builtin_type
        },
        Builtin {
            name: "range",
            func: builtin_range
        },
    ];
}

/// Find a builtin by name.
pub fn lookup_builtin(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|b| b.name == name).copied()
}

/// print - Write arguments joined by spaces to the host output sink.
fn builtin_print(ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let text = args
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    ctx.print(&text);
    Ok(Value::None)
}

/// len - Element count for containers, character count for strings.
fn builtin_len(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let value = single_arg("len", &args)?;
    let n = match value {
        Value::Str(s) => s.chars().count(),
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Dict(dict) => dict.len(),
        Value::Set(set) => set.len(),
        other => {
            return Err(ScriptError::type_error(format!(
                "{} has no length",
                other.type_name()
            )))
        }
    };
    Ok(Value::Int(n as i128))
}

/// str - Printable form of any value.
fn builtin_str(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let value = single_arg("str", &args)?;
    Ok(Value::Str(value.to_string()))
}

/// int - Convert numbers, numeric strings and bools to an integer.
/// Floats truncate toward zero.
fn builtin_int(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let value = single_arg("int", &args)?;
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(x) => {
            if !x.is_finite() {
                return Err(ScriptError::value(format!("cannot convert {} to int", x)));
            }
            let t = x.trunc();
            // Integers span [-2^127, 2^127); the cast saturates outside it.
            let limit = (2f64).powi(127);
            if t < -limit || t >= limit {
                return Err(ScriptError::value("integer overflow".to_string()));
            }
            Ok(Value::Int(t as i128))
        }
        Value::Bool(b) => Ok(Value::Int(*b as i128)),
        Value::Str(s) => s
            .trim()
            .parse::<i128>()
            .map(Value::Int)
            .map_err(|_| ScriptError::value(format!("invalid literal for int: {:?}", s))),
        other => Err(ScriptError::type_error(format!(
            "cannot convert {} to int",
            other.type_name()
        ))),
    }
}

/// float - Convert numbers, numeric strings and bools to a float.
fn builtin_float(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let value = single_arg("float", &args)?;
    match value {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ScriptError::value(format!("invalid literal for float: {:?}", s))),
        other => Err(ScriptError::type_error(format!(
            "cannot convert {} to float",
            other.type_name()
        ))),
    }
}

/// type - Name of a value's type.
fn builtin_type(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let value = single_arg("type", &args)?;
    Ok(Value::Str(value.type_name().to_string()))
}

/// range - List of integers from start (default 0) up to stop, by step
/// (default 1). A negative step counts down.
fn builtin_range(_ctx: &mut EvalContext, args: Vec<Value>) -> Result<Value, ScriptError> {
    let (start, stop, step) = match args.len() {
        1 => (0, int_arg(&args[0], "range")?, 1),
        2 => (int_arg(&args[0], "range")?, int_arg(&args[1], "range")?, 1),
        3 => (
            int_arg(&args[0], "range")?,
            int_arg(&args[1], "range")?,
            int_arg(&args[2], "range")?,
        ),
        n => {
            return Err(ScriptError::type_error(format!(
                "range() takes 1 to 3 arguments but {} were given",
                n
            )))
        }
    };
    if step == 0 {
        return Err(ScriptError::value("range() step must not be zero".to_string()));
    }
    let mut items = vec![];
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        items.push(Value::Int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::List(items))
}

fn single_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, ScriptError> {
    if args.len() != 1 {
        return Err(ScriptError::type_error(format!(
            "{}() takes 1 argument but {} were given",
            name,
            args.len()
        )));
    }
    Ok(&args[0])
}

fn int_arg(value: &Value, name: &str) -> Result<i128, ScriptError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(ScriptError::type_error(format!(
            "{}() arguments must be integers, not {}",
            name,
            other.type_name()
        ))),
    }
}
