//! Runtime data structures.
//!
//! This module contains the interpreter's value types, the binding maps
//! and evaluation context, and the script error type.

pub mod env;
pub mod error;
pub mod value;
