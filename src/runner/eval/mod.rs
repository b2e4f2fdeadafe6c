//! Evaluation module for executing the script AST.
//!
//! Statements produce completion records, expressions produce values and
//! errors propagate as `ScriptError` results.

pub mod types;
pub mod expression;
pub mod statement;
pub mod function;

pub use types::{Completion, CompletionType};
