use std::fmt;

use thiserror::Error;

/// Script position an error was raised from.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Message plus the position it was raised from, once known.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorData {
    pub message: String,
    pub location: Option<Location>,
}

impl ErrorData {
    fn new(message: String) -> Self {
        ErrorData {
            message,
            location: None,
        }
    }
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({})", self.message, location),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Failure raised while parsing or executing a script.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("syntax error: {0}")]
    Syntax(ErrorData),
    #[error("name error: {0}")]
    Name(ErrorData),
    #[error("type error: {0}")]
    Type(ErrorData),
    #[error("value error: {0}")]
    Value(ErrorData),
    #[error("index error: {0}")]
    Index(ErrorData),
    #[error("key error: {0}")]
    Key(ErrorData),
}

impl ScriptError {
    pub fn syntax(message: String) -> Self {
        ScriptError::Syntax(ErrorData::new(message))
    }

    pub fn name(message: String) -> Self {
        ScriptError::Name(ErrorData::new(message))
    }

    pub fn type_error(message: String) -> Self {
        ScriptError::Type(ErrorData::new(message))
    }

    pub fn value(message: String) -> Self {
        ScriptError::Value(ErrorData::new(message))
    }

    pub fn index(message: String) -> Self {
        ScriptError::Index(ErrorData::new(message))
    }

    pub fn key(message: String) -> Self {
        ScriptError::Key(ErrorData::new(message))
    }

    /// Attach a position unless one is already recorded, so the deepest
    /// statement that saw the error wins.
    pub fn with_location(mut self, file: &str, line: usize) -> Self {
        let data = self.data_mut();
        if data.location.is_none() {
            data.location = Some(Location {
                file: file.to_string(),
                line,
            });
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.data().message
    }

    pub fn location(&self) -> Option<&Location> {
        self.data().location.as_ref()
    }

    fn data(&self) -> &ErrorData {
        match self {
            ScriptError::Syntax(data)
            | ScriptError::Name(data)
            | ScriptError::Type(data)
            | ScriptError::Value(data)
            | ScriptError::Index(data)
            | ScriptError::Key(data) => data,
        }
    }

    fn data_mut(&mut self) -> &mut ErrorData {
        match self {
            ScriptError::Syntax(data)
            | ScriptError::Name(data)
            | ScriptError::Type(data)
            | ScriptError::Value(data)
            | ScriptError::Index(data)
            | ScriptError::Key(data) => data,
        }
    }
}
