//! Pinpoint - Parser Combinators With Precise Error Positions
//!
//! A library for turning text into structured values. Small primitive
//! parsers (match a literal, consume a character class, recognize a
//! number, capture a name) compose into larger parsers via combinators
//! (sequence, alternation, mapping, chaining, lazy recursion, backtracking
//! control).
//!
//! Two things set the engine apart:
//!
//! - **Committed choice**: once an alternative in a choice set has
//!   consumed input, the choice commits to it: its failure is final
//!   unless explicitly wrapped as backtrackable. Parsing stays linear and
//!   never silently re-parses.
//! - **Positioned errors**: every failure carries a 1-based row and
//!   column, a caller-defined problem tag, and a stack of the syntactic
//!   contexts that were open, so "expected `)` at row 3, column 17 while
//!   parsing a list" falls out of the structure of the grammar.
//!
//! # Quick Start
//!
//! ```rust
//! use pinpoint::basic;
//!
//! // A decimal integer followed by the end of input.
//! let parser = basic::skip(basic::integer(), basic::end());
//!
//! assert_eq!(basic::run(&parser, "1776"), Ok(1776));
//! assert!(basic::run(&parser, "3.1415").is_err());
//! ```
//!
//! # Picking A Facade
//!
//! - [`basic`] fixes the problem type to a built-in set
//!   ([`basic::Problem`]) and needs nothing beyond the grammar. Start
//!   here.
//! - [`advanced`] is generic over your own context and problem types, for
//!   error reports in the vocabulary of your language.
//!
//! A run is a pure function of the parser and the source string, with no
//! global state and no I/O. Runs on independent threads need no
//! coordination.
//!
//! # Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `serde` - Serialize/deserialize positions, problems, and dead ends

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::redundant_closure)]

mod engine;

pub mod advanced;
pub mod basic;

/// Re-export commonly used types for convenience
pub use advanced::{Located, Position, Token};
