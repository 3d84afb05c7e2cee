//! Declarative command-line switch specifications and parse reconciliation.
//!
//! This crate lets an application describe its switches once and turn raw
//! argument tokens into exactly one outcome:
//!
//! - [`SwitchSpec`]: insertion-ordered switch tables (types, defaults,
//!   descriptions, aliases) plus the required list, built by chaining.
//! - [`Tokenizer`]: the seam that converts raw tokens into typed values;
//!   [`StrictTokenizer`] is the bundled implementation.
//! - [`reconcile`] / [`parse`]: resolve a tokenizer result into a
//!   [`ParseOutcome`]: `Help`, `Ok` with defaults merged in, or `Error`.
//! - [`render_help`]: stable help text for a spec.
//!
//! Spec documents ([`SpecDocument`]) load a spec from YAML or JSON, and
//! [`validate_spec`] reports structural mistakes that parsing tolerates.
//!
//! # Example
//!
//! ```
//! use commando_core::*;
//!
//! let spec = SwitchSpec::create("fetch", "Download a file", "fetch --url http://example.com")
//!     .add_switch("url", SwitchType::String, "Source URL", SwitchOptions::new().required())
//!     .add_switch("retries", SwitchType::Integer, "Retry budget", SwitchOptions::new().default_value(3_i64))
//!     .add_switch("verbose", SwitchType::Count, "More output", SwitchOptions::new().alias("v"))
//!     .add_help_switch();
//!
//! match parse(&spec, &["--url", "http://example.com", "-vv"]) {
//!     ParseOutcome::Ok { values } => {
//!         assert_eq!(values["retries"], Value::Integer(3));
//!         assert_eq!(values["verbose"], Value::Count(2));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! assert!(parse(&spec, &["--help", "--bogus"]).is_help());
//! assert_eq!(
//!     parse(&spec, &["--bogus"]).message(),
//!     Some("Unknown options: --bogus")
//! );
//! ```

mod document;
mod error;
mod reconcile;
mod render;
mod spec;
mod tokenizer;
mod types;
mod validate;

pub use document::{SpecDocument, SwitchDocument};
pub use error::{Result, SpecFileError};
pub use reconcile::{ParseExit, ParseOutcome, Values, parse, parse_with, reconcile};
pub use render::{ParseError, render_help, render_invalid_options, render_missing_options};
pub use spec::{HELP_SWITCH, SwitchOptions, SwitchSpec};
pub use tokenizer::{RawParse, StrictTokenizer, Tokenizer};
pub use types::*;
pub use validate::{SpecIssue, validate_spec};
