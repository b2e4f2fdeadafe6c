//! The host/plugin bridge.
//!
//! This module is the crate's host-facing surface: it finds a script by
//! name across an ordered set of directories, runs it with host-supplied
//! globals, and hands back the script's resulting globals as host values.
//!
//! ## Crossing the bridge
//!
//! Values cross in both directions through the marshaller in [`convert`]:
//!
//! ```text
//! Gaff::run
//!   1. search directories in order, first readable file wins
//!   2. args: Namespace --to_bindings--> script globals
//!   3. runner::execute(source, filename, globals, sink)
//!   4. final globals --from_bindings--> Namespace (lenient)
//! ```
//!
//! The input direction is total: [`HostValue`] is a closed enum, so every
//! variant converts and there is no error to report. The output direction
//! is lenient at the namespace level: a script's helper functions have no
//! host shape and are silently dropped, so the result is the convertible
//! subset of the final globals.
//!
//! ## Example
//!
//! With `plugins/greet.gaff` containing:
//!
//! ```text
//! greeting = "hello " + name;
//! ```
//!
//! ```no_run
//! use gaff::hook::{Gaff, HostValue, Namespace};
//!
//! let runner = Gaff::new(vec!["plugins"]);
//!
//! let mut args = Namespace::new();
//! args.insert("name".to_string(), HostValue::from("Ada"));
//!
//! let result = runner.run("greet.gaff", args).unwrap();
//! assert_eq!(result["greeting"], HostValue::from("hello Ada"));
//! ```
//!
//! Single values convert through [`to_value`] and [`from_value`] directly:
//!
//! ```
//! use gaff::hook::{from_value, to_value, HostValue};
//!
//! // Whatever fits in i64 comes back signed; only larger magnitudes
//! // come back as Uint.
//! assert_eq!(from_value(&to_value(HostValue::Uint(5))).unwrap(), HostValue::Int(5));
//! assert_eq!(
//!     from_value(&to_value(HostValue::Uint(u64::MAX))).unwrap(),
//!     HostValue::Uint(u64::MAX)
//! );
//! ```

pub mod convert;
pub mod error;
pub mod runner;
pub mod value;

pub use self::convert::{from_bindings, from_value, to_bindings, to_value};
pub use self::error::Error;
pub use self::runner::Gaff;
pub use self::value::{HostValue, Namespace};
