//! Function call execution.
//!
//! Script functions get a fresh local frame pushed over the globals;
//! builtins run natively with the same context.

use crate::runner::ds::env::{Bindings, EvalContext};
use crate::runner::ds::error::ScriptError;
use crate::runner::ds::value::Value;

use super::statement::execute_block;
use super::types::{CompletionType, ValueResult};

/// Deepest allowed call nesting before the interpreter gives up.
pub const MAX_CALL_DEPTH: usize = 200;

/// Call a value with already-evaluated arguments.
pub fn call_value(ctx: &mut EvalContext, callee: Value, args: Vec<Value>) -> ValueResult {
    match callee {
        Value::Func(func) => {
            if ctx.call_depth() >= MAX_CALL_DEPTH {
                return Err(ScriptError::value(
                    "maximum recursion depth exceeded".to_string(),
                ));
            }
            if args.len() != func.params.len() {
                return Err(ScriptError::type_error(format!(
                    "{}() takes {} arguments but {} were given",
                    func.name,
                    func.params.len(),
                    args.len()
                )));
            }
            let mut locals = Bindings::new();
            for (param, arg) in func.params.iter().zip(args) {
                locals.set(param, arg);
            }
            ctx.push_frame(locals);
            let result = execute_block(&func.body, ctx);
            ctx.pop_frame();
            let completion = result?;
            match completion.completion_type {
                CompletionType::Return => Ok(completion.get_value()),
                CompletionType::Normal => Ok(Value::None),
                CompletionType::Break => {
                    Err(ScriptError::syntax("'break' outside loop".to_string()))
                }
                CompletionType::Continue => {
                    Err(ScriptError::syntax("'continue' outside loop".to_string()))
                }
            }
        }
        Value::Builtin(builtin) => (builtin.func)(ctx, args),
        other => Err(ScriptError::type_error(format!(
            "{} is not callable",
            other.type_name()
        ))),
    }
}
