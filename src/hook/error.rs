use thiserror::Error;

use crate::runner::ds::error::ScriptError;

/// Failure reported by [`Gaff::run`](crate::hook::Gaff::run) or by a value
/// conversion. Each variant identifies the phase that failed: resolution,
/// decoding, conversion or execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The interpreter value has no host representation. Carries the
    /// value's type name.
    #[error("type {0} has no host representation")]
    UnsupportedType(&'static str),
    /// An interpreter integer outside both the signed and the unsigned
    /// 64-bit range.
    #[error("integer {0} does not fit in 64 bits signed or unsigned")]
    IntegerOutOfRange(i128),
    /// The filename was not readable in any search directory.
    #[error("cannot find plugin file {0:?} in any plugin directory")]
    PluginNotFound(String),
    /// The plugin file was read but is not UTF-8 text.
    #[error("plugin file {0:?} is not valid UTF-8")]
    InvalidUtf8(String),
    /// The script failed to parse or run.
    #[error(transparent)]
    Exec(#[from] ScriptError),
}
