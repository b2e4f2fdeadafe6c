//! Host-side values.
//!
//! [`HostValue`] is the closed set of shapes a host can hand to a script or
//! get back from one. Closed means every variant has a defined translation
//! into an interpreter [`Value`], so the host-to-script direction never
//! fails; the reverse direction is where conversion can be refused.

use std::collections::HashMap;

use crate::runner::ds::value::Value;

/// Name to value mapping used both for seeding a script's globals and for
/// the extracted result.
pub type Namespace = HashMap<String, HostValue>;

/// A host value the bridge knows how to carry across.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Fixed-arity sequence; becomes an interpreter tuple.
    Tuple(Vec<HostValue>),
    /// Variable-length sequence; becomes an interpreter list.
    List(Vec<HostValue>),
    /// Entries keep their order; a duplicate key keeps the first position
    /// and the last value.
    Dict(Vec<(HostValue, HostValue)>),
    /// Members keep their order; duplicates collapse.
    Set(Vec<HostValue>),
    /// A value that already belongs to the interpreter. It passes through
    /// conversion untouched, containers included.
    Foreign(Value),
}

impl From<i8> for HostValue {
    fn from(v: i8) -> Self {
        HostValue::Int(i64::from(v))
    }
}

impl From<i16> for HostValue {
    fn from(v: i16) -> Self {
        HostValue::Int(i64::from(v))
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(i64::from(v))
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<u8> for HostValue {
    fn from(v: u8) -> Self {
        HostValue::Uint(u64::from(v))
    }
}

impl From<u16> for HostValue {
    fn from(v: u16) -> Self {
        HostValue::Uint(u64::from(v))
    }
}

impl From<u32> for HostValue {
    fn from(v: u32) -> Self {
        HostValue::Uint(u64::from(v))
    }
}

impl From<u64> for HostValue {
    fn from(v: u64) -> Self {
        HostValue::Uint(v)
    }
}

impl From<f32> for HostValue {
    fn from(v: f32) -> Self {
        HostValue::Float(f64::from(v))
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Str(v.to_string())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Str(v)
    }
}

/// A bare sequence defaults to list semantics; tuples must be asked for
/// explicitly through [`HostValue::Tuple`].
impl From<Vec<HostValue>> for HostValue {
    fn from(v: Vec<HostValue>) -> Self {
        HostValue::List(v)
    }
}

impl From<Value> for HostValue {
    fn from(v: Value) -> Self {
        HostValue::Foreign(v)
    }
}
