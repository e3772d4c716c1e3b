//! `.env` lexer, parser, and writer.
//!
//! Scans newline-delimited `KEY=value` assignments character by character,
//! with comments, quoted multi-line values, `${NAME}` interpolation against
//! earlier assignments, and typed value inference (null, boolean, integer,
//! float, string).
//!
//! # Quick start
//!
//! ## Parse text
//!
//! ```
//! use envfile_rs::{EnvValue, parse_str};
//!
//! let envs = parse_str("PORT=8080\nHOST=\"localhost\"\nURL=\"${HOST}:${PORT}\"\n").unwrap();
//! assert_eq!(envs.get("PORT"), Some(&EnvValue::Int(8080)));
//! assert_eq!(envs.get("URL"), Some(&EnvValue::from("localhost:8080")));
//! ```
//!
//! ## Parse a file and publish it
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use envfile_rs::EnvParser;
//!
//! let mut parser = EnvParser::open(".env")?;
//! parser.parse(false)?;
//! let mut target: BTreeMap<String, String> = BTreeMap::new();
//! parser.load_into(&mut target)?;
//! # Ok::<(), envfile_rs::Error>(())
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod detect;
pub mod env;
pub mod file;
pub mod formatter;
pub mod loader;
pub mod parser;
pub mod token;
pub mod value;

use std::path::PathBuf;

pub use detect::TypeDetector;
pub use env::{EnvSink, ProcessEnv};
pub use file::{EnvFile, LockGuard};
pub use formatter::{find_unrepresentable, format, format_entry, is_representable};
pub use loader::EnvParser;
pub use parser::{InterpolationError, ParseOptions, SyntaxError, SyntaxErrorKind, parse_str_with};
pub use token::Span;
pub use value::{EnvMap, EnvValue};

/// Unified error type for parsing, reading, and writing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// `${NAME}` refers to a name not defined earlier.
    #[error("{0}")]
    Interpolation(#[from] InterpolationError),
    /// Variables were requested before a successful parse.
    #[error("env file has not been parsed")]
    NotParsed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
    #[error("invalid variable name: {0:?}")]
    InvalidKey(String),
    /// The value cannot be written so that it reads back unchanged.
    #[error("value for {key} cannot be represented in an env file")]
    UnrepresentableValue { key: String },
}

/// Parse `.env` source text with default options.
pub fn parse_str(input: &str) -> Result<EnvMap, Error> {
    parse_str_with(input, &ParseOptions::default())
}
