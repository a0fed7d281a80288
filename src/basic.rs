//! Ready-To-Use Parsers
//!
//! The same engine as [`crate::advanced`], with the context fixed to `()`
//! and the problem type fixed to the built-in [`Problem`] set, so nothing
//! has to be supplied beyond the grammar itself:
//!
//! ```rust
//! use pinpoint::basic;
//!
//! let boolean = basic::one_of(vec![
//!     basic::map(|_| true, basic::keyword("true")),
//!     basic::map(|_| false, basic::keyword("false")),
//! ]);
//!
//! assert_eq!(basic::run(&boolean, "true"), Ok(true));
//! ```
//!
//! [`basic::Parser`](Parser) is an alias of the advanced type, so the
//! generic combinators (`map`, `and_then`, `one_of`, ...) are simply
//! re-exported; only the parsers that need a problem filled in are
//! defined here.

use std::fmt;

use hashbrown::HashSet;

use crate::advanced::{self, NumberConfig, Token};

pub use crate::advanced::{
    and_then, backtrackable, chomp_until_end_or, chomp_while, get_chomped_string, get_column,
    get_indent, get_offset, get_position, get_row, get_source, lazy, map, map2,
    map_chomped_string, one_of, problem, skip, spaces, succeed, with_indent, Position,
};

/// What a built-in parser was expecting when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Problem {
    /// A [`token`] literal was not next in the input
    Expecting(String),
    /// An integer was not next in the input
    ExpectingInt,
    /// A number was not next in the input, or it was malformed
    ExpectingNumber,
    /// Hexadecimal digits were expected after `0x`
    ExpectingHex,
    /// Octal digits were expected after `0o`
    ExpectingOctal,
    /// Binary digits were expected after `0b`
    ExpectingBinary,
    /// A float was not next in the input
    ExpectingFloat,
    /// [`end`] was not at the end of the input
    ExpectingEnd,
    /// A [`variable`] could not start here, or matched a reserved word
    ExpectingVariable,
    /// A [`symbol`] literal was not next in the input
    ExpectingSymbol(String),
    /// A [`keyword`] was not next, or ran into a word boundary violation
    ExpectingKeyword(String),
    /// [`chomp_if`]'s predicate rejected the next character
    UnexpectedCharacter,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Expecting(literal) => write!(f, "expecting `{literal}`"),
            Problem::ExpectingInt => write!(f, "expecting an integer"),
            Problem::ExpectingNumber => write!(f, "expecting a number"),
            Problem::ExpectingHex => write!(f, "expecting a hexadecimal number"),
            Problem::ExpectingOctal => write!(f, "expecting an octal number"),
            Problem::ExpectingBinary => write!(f, "expecting a binary number"),
            Problem::ExpectingFloat => write!(f, "expecting a float"),
            Problem::ExpectingEnd => write!(f, "expecting end of input"),
            Problem::ExpectingVariable => write!(f, "expecting a variable name"),
            Problem::ExpectingSymbol(symbol) => write!(f, "expecting symbol `{symbol}`"),
            Problem::ExpectingKeyword(keyword) => write!(f, "expecting keyword `{keyword}`"),
            Problem::UnexpectedCharacter => write!(f, "unexpected character"),
        }
    }
}

/// One failure record: where parsing got stuck and what was expected
/// there.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeadEnd {
    /// Row of the failure (1-based)
    pub row: usize,
    /// Column of the failure (1-based)
    pub column: usize,
    /// What the failing parser was expecting
    pub problem: Problem,
}

impl fmt::Display for DeadEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at row {}, column {}",
            self.problem, self.row, self.column
        )
    }
}

/// A parser producing a `T` with the built-in problem set.
pub type Parser<T> = advanced::Parser<(), Problem, T>;

/// Run a parser against a source string.
///
/// ```rust
/// use pinpoint::basic;
///
/// assert!(basic::run(&basic::keyword("true"), "true").is_ok());
/// assert!(basic::run(&basic::keyword("true"), "false").is_err());
///
/// // Parsers chomp as much as they can and ignore the rest:
/// assert!(basic::run(&basic::keyword("true"), "true!").is_ok());
/// ```
///
/// Finish with [`end`] when the whole source must be consumed.
pub fn run<T>(parser: &Parser<T>, source: &str) -> Result<T, Vec<DeadEnd>> {
    advanced::run(parser, source).map_err(|dead_ends| {
        dead_ends
            .into_iter()
            .map(|dead_end| DeadEnd {
                row: dead_end.row,
                column: dead_end.column,
                problem: dead_end.problem,
            })
            .collect()
    })
}

/// Parse exactly the given literal, with no regard to what comes next.
pub fn token(string: &str) -> Parser<()> {
    advanced::token(Token::new(string, Problem::Expecting(string.to_string())))
}

/// Parse symbols like `(` and `,`.
pub fn symbol(string: &str) -> Parser<()> {
    advanced::symbol(Token::new(
        string,
        Problem::ExpectingSymbol(string.to_string()),
    ))
}

/// Parse keywords like `let`, `if`, and `match`. The code point after the
/// match must not be a letter, digit, or underscore, so `keyword("let")`
/// rejects `"letter"`.
pub fn keyword(string: &str) -> Parser<()> {
    advanced::keyword(Token::new(
        string,
        Problem::ExpectingKeyword(string.to_string()),
    ))
}

/// Succeed only at the end of the source.
///
/// Ending a parser with `end` guarantees the whole source was consumed.
pub fn end() -> Parser<()> {
    advanced::end(Problem::ExpectingEnd)
}

/// Chomp one code point if it passes the test.
pub fn chomp_if(is_good: impl Fn(char) -> bool + 'static) -> Parser<()> {
    advanced::chomp_if(is_good, Problem::UnexpectedCharacter)
}

/// Chomp until the given literal is next in the input, leaving it
/// unconsumed; fail at the end of the source if it never appears.
pub fn chomp_until(string: &str) -> Parser<()> {
    advanced::chomp_until(Token::new(string, Problem::Expecting(string.to_string())))
}

/// Parse a single-line comment: the start marker, then everything up to
/// (but not including) the next newline.
pub fn line_comment(start: &str) -> Parser<()> {
    advanced::line_comment(Token::new(start, Problem::Expecting(start.to_string())))
}

/// Parse an identifier: one code point accepted by `start`, extended by
/// code points accepted by `inner`, rejecting matches listed in
/// `reserved`.
pub fn variable(
    start: impl Fn(char) -> bool + 'static,
    inner: impl Fn(char) -> bool + 'static,
    reserved: HashSet<String>,
) -> Parser<String> {
    advanced::variable(start, inner, reserved, Problem::ExpectingVariable)
}

/// Parse a number in any of the enabled shapes, without backtracking.
///
/// Each slot is `Some(convert)` to permit that shape or `None` to report
/// the matching built-in problem when a lexeme of that shape shows up.
#[allow(clippy::type_complexity)]
pub fn number<T: 'static>(
    int: Option<Box<dyn Fn(i64) -> T>>,
    hexadecimal: Option<Box<dyn Fn(i64) -> T>>,
    octal: Option<Box<dyn Fn(i64) -> T>>,
    binary: Option<Box<dyn Fn(i64) -> T>>,
    float: Option<Box<dyn Fn(f64) -> T>>,
) -> Parser<T> {
    advanced::number(NumberConfig {
        int: int.ok_or(Problem::ExpectingInt),
        hexadecimal: hexadecimal.ok_or(Problem::ExpectingHex),
        octal: octal.ok_or(Problem::ExpectingOctal),
        binary: binary.ok_or(Problem::ExpectingBinary),
        float: float.ok_or(Problem::ExpectingFloat),
        invalid: Problem::ExpectingNumber,
        expecting: Problem::ExpectingNumber,
    })
}

/// Parse a decimal integer. Negation is up to the caller.
///
/// ```rust
/// use pinpoint::basic;
///
/// assert_eq!(basic::run(&basic::integer(), "123456"), Ok(123456));
/// assert!(basic::run(&basic::integer(), "3.1415").is_err());
/// ```
pub fn integer() -> Parser<i64> {
    number(Some(Box::new(|n| n)), None, None, None, None)
}

/// Parse a decimal integer or float as an `f64`.
pub fn float() -> Parser<f64> {
    number(
        Some(Box::new(|n| n as f64)),
        None,
        None,
        None,
        Some(Box::new(|f| f)),
    )
}
