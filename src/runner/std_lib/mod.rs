//! Standard library built-ins.
//!
//! This module contains the native functions every script can call by
//! bare name, like print, len, type conversions and range.

pub mod core;

pub use self::core::lookup_builtin;
