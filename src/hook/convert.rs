//! The value marshaller.
//!
//! Pure, stateless conversion between [`HostValue`] and the interpreter's
//! [`Value`], in both directions, one function per direction plus the two
//! namespace entry points. The directions are deliberately asymmetric:
//!
//! - [`to_value`] and [`to_bindings`] are infallible. The closed
//!   [`HostValue`] enum means there is no unsupported input to reject.
//! - [`from_value`] is strict: the first unconvertible element fails the
//!   whole call, containers included.
//! - [`from_bindings`] is lenient: bindings whose value cannot cross, like
//!   the functions a script defines for itself, are dropped rather than
//!   reported.

use std::convert::TryFrom;

use crate::hook::error::Error;
use crate::hook::value::{HostValue, Namespace};
use crate::runner::ds::env::Bindings;
use crate::runner::ds::value::{Dict, Set, Value};

/// Convert a host value into an interpreter value.
///
/// [`HostValue::Foreign`] passes its wrapped value through unchanged.
/// Containers convert element by element; both integer flavors land in the
/// interpreter's integer, which holds every i64 and u64 magnitude exactly.
pub fn to_value(v: HostValue) -> Value {
    match v {
        HostValue::Foreign(value) => value,
        HostValue::Bool(b) => Value::Bool(b),
        HostValue::Int(n) => Value::Int(i128::from(n)),
        HostValue::Uint(n) => Value::Int(i128::from(n)),
        HostValue::Float(x) => Value::Float(x),
        HostValue::Str(s) => Value::Str(s),
        HostValue::Tuple(items) => Value::Tuple(items.into_iter().map(to_value).collect()),
        HostValue::List(items) => Value::List(items.into_iter().map(to_value).collect()),
        HostValue::Dict(entries) => {
            let mut dict = Dict::new();
            for (key, value) in entries {
                dict.insert(to_value(key), to_value(value));
            }
            Value::Dict(dict)
        }
        HostValue::Set(items) => {
            let mut set = Set::new();
            for item in items {
                set.insert(to_value(item));
            }
            Value::Set(set)
        }
    }
}

/// Convert an interpreter value back into a host value.
///
/// Integers try the signed 64-bit representation first, then unsigned;
/// magnitudes beyond both fail with [`Error::IntegerOutOfRange`]. Tuples
/// come back as [`HostValue::List`]; the distinction is not preserved on
/// the return trip. Values with no host shape, like `none` and functions,
/// fail with [`Error::UnsupportedType`].
pub fn from_value(v: &Value) -> Result<HostValue, Error> {
    match v {
        Value::Bool(b) => Ok(HostValue::Bool(*b)),
        Value::Int(n) => {
            if let Ok(signed) = i64::try_from(*n) {
                return Ok(HostValue::Int(signed));
            }
            if let Ok(unsigned) = u64::try_from(*n) {
                return Ok(HostValue::Uint(unsigned));
            }
            Err(Error::IntegerOutOfRange(*n))
        }
        Value::Float(x) => Ok(HostValue::Float(*x)),
        Value::Str(s) => Ok(HostValue::Str(s.clone())),
        Value::List(items) => Ok(HostValue::List(from_items(items)?)),
        Value::Tuple(items) => Ok(HostValue::List(from_items(items)?)),
        Value::Dict(dict) => {
            let mut entries = Vec::with_capacity(dict.len());
            for (key, value) in dict.iter() {
                // A failing key aborts before its value is looked at.
                let key = from_value(key)?;
                let value = from_value(value)?;
                entries.push((key, value));
            }
            Ok(HostValue::Dict(entries))
        }
        Value::Set(set) => {
            let mut items = Vec::with_capacity(set.len());
            for item in set.iter() {
                items.push(from_value(item)?);
            }
            Ok(HostValue::Set(items))
        }
        other => Err(Error::UnsupportedType(other.type_name())),
    }
}

fn from_items(items: &[Value]) -> Result<Vec<HostValue>, Error> {
    items.iter().map(from_value).collect()
}

/// Convert a host namespace into script globals.
pub fn to_bindings(ns: Namespace) -> Bindings {
    ns.into_iter()
        .map(|(name, value)| (name, to_value(value)))
        .collect()
}

/// Convert final script globals back into a host namespace. Bindings whose
/// value has no host representation are omitted; the result is always a
/// subset of the script's globals, possibly empty.
pub fn from_bindings(bindings: &Bindings) -> Namespace {
    let mut ns = Namespace::new();
    for (name, value) in bindings.iter() {
        if let Ok(host) = from_value(value) {
            ns.insert(name.to_string(), host);
        }
    }
    ns
}
