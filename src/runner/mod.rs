//! Script execution engine.
//!
//! This module contains the tree-walking interpreter: runtime data
//! structures (values, bindings, errors), the evaluator and the standard
//! library of built-ins. [`execute`] is the front door: feed it source text
//! and seed globals, get the final globals back.

pub mod ds;
pub mod eval;
pub mod std_lib;

use pest::error::{Error, ErrorVariant, LineColLocation};
use tracing::debug;

use crate::parser;
use crate::parser::Rule;

use self::ds::env::{Bindings, EvalContext, OutputSink};
use self::ds::error::ScriptError;
use self::eval::statement::execute_statement;
use self::eval::CompletionType;

/// Parse and run a script.
///
/// `globals` seeds the global frame and `out` receives everything the
/// script prints. `file` only labels error locations. On success the final
/// global frame comes back, with the script's top-level assignments and
/// function declarations applied.
pub fn execute(
    source: &str,
    file: &str,
    globals: Bindings,
    out: OutputSink,
) -> Result<Bindings, ScriptError> {
    let script = parser::parse_to_ast(source).map_err(|e| syntax_error_from_pest(e, file))?;
    debug!(file, statements = script.body.len(), "executing script");
    let mut ctx = EvalContext::new(globals, out, file);
    for stmt in &script.body {
        let completion = execute_statement(stmt, &mut ctx)?;
        let outside = match completion.completion_type {
            CompletionType::Normal => continue,
            CompletionType::Return => "'return' outside function",
            CompletionType::Break => "'break' outside loop",
            CompletionType::Continue => "'continue' outside loop",
        };
        return Err(ScriptError::syntax(outside.to_string()).with_location(file, stmt.line));
    }
    let globals = ctx.into_globals();
    debug!(file, bindings = globals.len(), "script finished");
    Ok(globals)
}

/// Convert a pest parse failure into a syntax error carrying the failing
/// line.
fn syntax_error_from_pest(e: Error<Rule>, file: &str) -> ScriptError {
    let message = match &e.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            if positives.is_empty() {
                "unexpected token".to_string()
            } else {
                format!("expected {}", rule_list(positives))
            }
        }
        ErrorVariant::CustomError { message } => message.clone(),
    };
    let (line, _col) = match e.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };
    ScriptError::syntax(message).with_location(file, line)
}

fn rule_list(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(|rule| format!("{:?}", rule))
        .collect::<Vec<_>>()
        .join(", ")
}
