//! Core types for the evaluation engine.

use crate::runner::ds::error::ScriptError;
use crate::runner::ds::value::Value;

/// Completion record type.
/// Represents how a statement finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionType {
    /// Normal completion - execution continues.
    Normal,
    /// Return completion - unwinds to the enclosing call.
    Return,
    /// Break completion - unwinds to the enclosing loop.
    Break,
    /// Continue completion - next iteration of the enclosing loop.
    Continue,
}

/// Completion record.
/// Every statement evaluation returns one; errors travel through the
/// `Err` arm of [`EvalResult`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The type of completion.
    pub completion_type: CompletionType,
    /// The carried value: a `Return`'s result, or an expression
    /// statement's value for callers that echo it.
    pub value: Option<Value>,
}

impl Completion {
    /// Create a normal completion.
    pub fn normal() -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: None,
        }
    }

    /// Create a normal completion carrying an expression statement's value.
    pub fn normal_value(value: Value) -> Self {
        Completion {
            completion_type: CompletionType::Normal,
            value: Some(value),
        }
    }

    /// Create a return completion carrying a value.
    pub fn return_value(value: Value) -> Self {
        Completion {
            completion_type: CompletionType::Return,
            value: Some(value),
        }
    }

    /// Create a break completion.
    pub fn break_completion() -> Self {
        Completion {
            completion_type: CompletionType::Break,
            value: None,
        }
    }

    /// Create a continue completion.
    pub fn continue_completion() -> Self {
        Completion {
            completion_type: CompletionType::Continue,
            value: None,
        }
    }

    /// Check if this is an abrupt completion (not normal).
    pub fn is_abrupt(&self) -> bool {
        !matches!(self.completion_type, CompletionType::Normal)
    }

    /// Get the carried value, or `none` when there is not one.
    pub fn get_value(self) -> Value {
        self.value.unwrap_or(Value::None)
    }
}

/// Result type for statement evaluation.
pub type EvalResult = Result<Completion, ScriptError>;

/// Result type for value-returning operations.
pub type ValueResult = Result<Value, ScriptError>;
