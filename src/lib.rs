//! # gaff - Embedded plugin scripting for Rust hosts
//!
//! A small dynamic scripting language plus the bridge that lets a host
//! application run script files as plugins:
//! - PEG parser with a line-tracking AST
//! - Tree-walking interpreter with completion-record control flow
//! - Closed host value enum with an infallible host-to-script direction
//! - Search-path plugin runner with lenient result extraction
//!
//! ## Quick Start
//!
//! ### Running a plugin
//!
//! ```no_run
//! use gaff::hook::{Gaff, HostValue, Namespace};
//!
//! let runner = Gaff::new(vec!["/etc/myapp/plugins", "./plugins"]);
//!
//! let mut args = Namespace::new();
//! args.insert("retries".to_string(), HostValue::Int(3));
//!
//! let result = runner.run("policy.gaff", args).unwrap();
//! println!("plugin returned {} bindings", result.len());
//! ```
//!
//! ### Parsing a script
//!
//! ```
//! use gaff::parser;
//!
//! let ast = parser::parse_to_ast("x = 5 + 3;").unwrap();
//! println!("parsed {} statements", ast.body.len());
//! ```
//!
//! ### Running script text directly
//!
//! ```
//! use gaff::runner;
//! use gaff::runner::ds::env::{stdout_sink, Bindings};
//!
//! let globals = runner::execute(
//!     "total = 0; for n in range(1, 6) { total += n; }",
//!     "sum.gaff",
//!     Bindings::new(),
//!     stdout_sink(),
//! )
//! .unwrap();
//!
//! assert_eq!(globals.get("total").unwrap().to_string(), "15");
//! ```
//!
//! ## The Value Bridge
//!
//! The architectural center of this crate is the marshaller in
//! [`hook::convert`], which carries values between the host's type system
//! and the interpreter's.
//!
//! ### How It Works
//!
//! 1. **Closed host enum**: [`hook::HostValue`] has one variant per
//!    supported shape (both 64-bit integer flavors, float, bool, string,
//!    tuple, list, dict, set). Because the set is closed, converting *into*
//!    the interpreter cannot fail and the compiler checks exhaustiveness.
//!
//! 2. **Pass-through**: `HostValue::Foreign` wraps a value that already
//!    belongs to the interpreter. It crosses untouched, even inside
//!    containers, so hosts can hand back values a previous run produced.
//!
//! 3. **Strict return conversion**: converting a single interpreter value
//!    back is all-or-nothing. A container with one unconvertible element
//!    fails whole; integers beyond both 64-bit ranges are rejected, never
//!    truncated.
//!
//! 4. **Lenient extraction**: converting a script's *final globals* drops
//!    unconvertible bindings instead of failing, because scripts
//!    legitimately define helper functions the host cannot represent.
//!
//! ### Example: host round trip
//!
//! ```
//! use gaff::hook::{from_value, to_value, HostValue};
//!
//! let config = HostValue::Dict(vec![
//!     ("name".into(), "cache".into()),
//!     ("size".into(), HostValue::Uint(512)),
//! ]);
//!
//! let script_side = to_value(config);
//! let back = from_value(&script_side).unwrap();
//!
//! // Magnitudes that fit signed 64-bit come back signed.
//! assert_eq!(
//!     back,
//!     HostValue::Dict(vec![
//!         ("name".into(), "cache".into()),
//!         ("size".into(), HostValue::Int(512)),
//!     ])
//! );
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - pest grammar and AST types
//! - **[`runner`]** - the interpreter
//!   - **[`runner::ds`]** - values, bindings, errors
//!   - **[`runner::eval`]** - statement and expression evaluation
//!   - **[`runner::std_lib`]** - built-in functions
//! - **[`hook`]** - the host/plugin bridge (search path, marshalling)

#[macro_use]
extern crate lazy_static;

pub mod hook;
pub mod parser;
pub mod runner;
