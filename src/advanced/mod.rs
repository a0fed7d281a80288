//! Fully Parameterized Parsers
//!
//! This module is the engine's complete surface: every primitive and
//! combinator, generic over a caller-supplied context type `C` (what
//! syntactic construct is being parsed, for error reports) and problem
//! type `X` (what went wrong). If you do not need custom problems, start
//! with [`crate::basic`], which fixes both.
//!
//! A [`Parser`] is a value; combinators build bigger parsers out of
//! smaller ones, and [`run`] executes the result against a source string:
//!
//! ```rust
//! use pinpoint::advanced::{self, Token};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Problem {
//!     ExpectingComma,
//! }
//!
//! let comma: advanced::Parser<(), Problem, ()> =
//!     advanced::token(Token::new(",", Problem::ExpectingComma));
//!
//! assert!(advanced::run(&comma, ",").is_ok());
//! assert!(advanced::run(&comma, "x").is_err());
//! ```
//!
//! # Committed choice
//!
//! Once an alternative in [`one_of`] has consumed input, the choice set is
//! committed to it: its failure is final and later alternatives are never
//! tried. This keeps parsing linear and failure positions precise. Wrap an
//! alternative in [`backtrackable`] when you explicitly want a failure to
//! fall through even after consuming input.

use std::rc::Rc;

use hashbrown::HashSet;
use once_cell::unsync::OnceCell;

use crate::engine::bag::Bag;
use crate::engine::number::{consume_base, consume_base16, consume_dot_and_exp};
use crate::engine::scan::{self, SubChar};
use crate::engine::state::State;
use crate::engine::step::Step;

pub use crate::engine::bag::DeadEnd;
pub use crate::engine::state::{Located, Position};

/// Logging macro - no-op when the logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macro - forwards to the log crate when the logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Parser
// ============================================================================

/// A parser from source text to a `T`, reporting failures as problems of
/// type `X` inside contexts of type `C`.
///
/// Parsers are cheap to clone (the underlying function is shared) and are
/// composed with the free functions in this module.
pub struct Parser<C, X, T> {
    parse: Rc<dyn Fn(State<C>) -> Step<C, X, T>>,
}

impl<C, X, T> Clone for Parser<C, X, T> {
    fn clone(&self) -> Self {
        Parser {
            parse: Rc::clone(&self.parse),
        }
    }
}

impl<C, X, T> Parser<C, X, T> {
    pub(crate) fn new(parse: impl Fn(State<C>) -> Step<C, X, T> + 'static) -> Self {
        Parser {
            parse: Rc::new(parse),
        }
    }

    /// Invoke the parser on a state.
    pub(crate) fn step(&self, state: State<C>) -> Step<C, X, T> {
        (self.parse)(state)
    }
}

/// A literal to match paired with the problem to report when it does not
/// match.
///
/// ```rust
/// use pinpoint::advanced::Token;
///
/// #[derive(Clone)]
/// enum Problem {
///     ExpectingComma,
/// }
///
/// let comma = Token::new(",", Problem::ExpectingComma);
/// ```
#[derive(Debug, Clone)]
pub struct Token<X> {
    /// The literal text to match
    pub string: String,
    /// The problem to report on mismatch
    pub expecting: X,
}

impl<X> Token<X> {
    /// Pair a literal with its mismatch problem. An empty literal is
    /// permitted and matches trivially without consuming input.
    pub fn new(string: impl Into<String>, expecting: X) -> Self {
        Token {
            string: string.into(),
            expecting,
        }
    }
}

// ============================================================================
// Running
// ============================================================================

/// Run a parser against a source string.
///
/// On success you get the parsed value. On failure you get one
/// [`DeadEnd`] per alternative explored at the furthest committed branch,
/// in the order they were recorded. The parser chomps as much as it can
/// and does not care what comes after; finish with [`end`] to insist the
/// whole source was consumed.
pub fn run<C, X, T>(parser: &Parser<C, X, T>, source: &str) -> Result<T, Vec<DeadEnd<C, X>>>
where
    C: Clone,
    X: Clone,
{
    match parser.step(State::new(source)) {
        Step::Good { value, .. } => {
            log_debug!("parse succeeded");
            Ok(value)
        }
        Step::Bad { bag, .. } => {
            let dead_ends = bag.to_dead_ends();
            log_debug!("parse failed with {} dead end(s)", dead_ends.len());
            Err(dead_ends)
        }
    }
}

// ============================================================================
// Trivial parsers
// ============================================================================

/// A parser that always succeeds with `value` without consuming input.
///
/// On its own this seems pointless, but it is the seed of most pipelines:
/// start from `succeed` and chain the pieces on with [`map2`],
/// [`and_then`], and [`skip`].
pub fn succeed<C, X, T>(value: T) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: Clone + 'static,
{
    Parser::new(move |state| Step::Good {
        progress: false,
        value: value.clone(),
        state,
    })
}

/// A parser that always fails with `problem` without consuming input.
///
/// Useful inside [`and_then`] for "everything parsed, but the value is no
/// good" situations.
pub fn problem<C, X, T>(problem: X) -> Parser<C, X, T>
where
    C: Clone + 'static,
    X: Clone + 'static,
    T: 'static,
{
    Parser::new(move |state: State<C>| Step::Bad {
        progress: false,
        bag: Bag::from_state(&state, problem.clone()),
    })
}

/// Succeed only at the end of the source, failing with `expecting`
/// otherwise.
pub fn end<C, X>(expecting: X) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| {
        if state.offset == state.source.len() {
            Step::Good {
                progress: false,
                value: (),
                state,
            }
        } else {
            Step::Bad {
                progress: false,
                bag: Bag::from_state(&state, expecting.clone()),
            }
        }
    })
}

// ============================================================================
// Literals
// ============================================================================

/// Parse exactly the given literal, with no regard to what comes next.
///
/// Consumes input iff the literal is non-empty; a mismatch is a
/// non-committing failure with the token's problem.
pub fn token<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| {
        let progress = !token.string.is_empty();
        match scan::sub_string(
            &token.string,
            state.offset,
            state.row,
            state.column,
            &state.source,
        ) {
            Some((offset, row, column)) => Step::Good {
                progress,
                value: (),
                state: state.advance(offset, row, column),
            },
            None => Step::Bad {
                progress: false,
                bag: Bag::from_state(&state, token.expecting.clone()),
            },
        }
    })
}

/// Parse symbols like `(` and `,`. An alias of [`token`].
pub fn symbol<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    self::token(token)
}

/// Parse keywords like `let`, `if`, and `match`.
///
/// Unlike [`token`], the code point after the match must not be a letter,
/// digit, or underscore: `keyword` on `let` matches `"let "` but rejects
/// `"letter"`.
pub fn keyword<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| {
        let progress = !token.string.is_empty();
        let matched = scan::sub_string(
            &token.string,
            state.offset,
            state.row,
            state.column,
            &state.source,
        );

        match matched {
            Some((offset, row, column))
                if sub_char_rejects_boundary(offset, &state.source) =>
            {
                Step::Good {
                    progress,
                    value: (),
                    state: state.advance(offset, row, column),
                }
            }
            _ => Step::Bad {
                progress: false,
                bag: Bag::from_state(&state, token.expecting.clone()),
            },
        }
    })
}

/// Whether the code point at `offset` is NOT an identifier continuation,
/// i.e. the keyword ends on a word boundary.
fn sub_char_rejects_boundary(offset: usize, source: &str) -> bool {
    matches!(
        scan::sub_char(|c| c.is_alphanumeric() || c == '_', offset, source),
        SubChar::Reject
    )
}

// ============================================================================
// Chompers
// ============================================================================

/// Chomp exactly one code point if it passes the test, failing with
/// `expecting` otherwise.
pub fn chomp_if<C, X>(is_good: impl Fn(char) -> bool + 'static, expecting: X) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| match scan::sub_char(
        &is_good,
        state.offset,
        &state.source,
    ) {
        SubChar::Reject => Step::Bad {
            progress: false,
            bag: Bag::from_state(&state, expecting.clone()),
        },
        SubChar::Newline => Step::Good {
            progress: true,
            value: (),
            state: state.advance(state.offset + 1, state.row + 1, 1),
        },
        SubChar::Advance(next) => Step::Good {
            progress: true,
            value: (),
            state: state.advance(next, state.row, state.column + 1),
        },
    })
}

/// Chomp zero or more code points while they pass the test. Never fails;
/// progress reflects whether anything was consumed.
pub fn chomp_while<C, X>(is_good: impl Fn(char) -> bool + 'static) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: 'static,
{
    Parser::new(move |state: State<C>| {
        let (offset, row, column) = scan::chomp_while_from(
            &is_good,
            state.offset,
            state.row,
            state.column,
            &state.source,
        );
        Step::Good {
            progress: state.offset < offset,
            value: (),
            state: state.advance(offset, row, column),
        }
    })
}

/// Chomp until the given literal is next in the input, leaving the literal
/// itself unconsumed. If it never appears, fail with the token's problem
/// positioned at the end of the source.
pub fn chomp_until<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| {
        let (found, row, column) = scan::find_sub_string(
            &token.string,
            state.offset,
            state.row,
            state.column,
            &state.source,
        );
        match found {
            None => Step::Bad {
                progress: false,
                bag: Bag::from_parts(row, column, token.expecting.clone(), state.context.clone()),
            },
            Some(offset) => Step::Good {
                progress: state.offset < offset,
                value: (),
                state: state.advance(offset, row, column),
            },
        }
    })
}

/// Chomp until the given literal is next in the input or the source runs
/// out. Never fails.
pub fn chomp_until_end_or<C, X>(needle: impl Into<String>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: 'static,
{
    let needle: String = needle.into();
    Parser::new(move |state: State<C>| {
        let (found, row, column) = scan::find_sub_string(
            &needle,
            state.offset,
            state.row,
            state.column,
            &state.source,
        );
        let offset = found.unwrap_or(state.source.len());
        Step::Good {
            progress: state.offset < offset,
            value: (),
            state: state.advance(offset, row, column),
        }
    })
}

/// Chomp zero or more `' '`, `'\n'`, or `'\r'` code points.
///
/// Tabs are not included; if you need them, compose your own with
/// [`chomp_while`].
pub fn spaces<C, X>() -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: 'static,
{
    chomp_while(|c| c == ' ' || c == '\n' || c == '\r')
}

/// Parse a single-line comment: the start token, then everything up to
/// (but not including) the next newline.
pub fn line_comment<C, X>(start: Token<X>) -> Parser<C, X, ()>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    skip(token(start), chomp_until_end_or("\n"))
}

// ============================================================================
// Capturing chomped source
// ============================================================================

/// Run a parser and hand the exact slice of source it consumed, together
/// with its value, to `f`.
///
/// This is the flexible sibling of [`get_chomped_string`]: chompers
/// produce `()`, and this is how their consumed text becomes a value.
pub fn map_chomped_string<C, X, T, R>(
    f: impl Fn(&str, T) -> R + 'static,
    parser: Parser<C, X, T>,
) -> Parser<C, X, R>
where
    C: 'static,
    X: 'static,
    T: 'static,
    R: 'static,
{
    Parser::new(move |state: State<C>| {
        let start = state.offset;
        let source = Rc::clone(&state.source);
        match parser.step(state) {
            Step::Good {
                progress,
                value,
                state,
            } => {
                let mapped = f(&source[start..state.offset], value);
                Step::Good {
                    progress,
                    value: mapped,
                    state,
                }
            }
            Step::Bad { progress, bag } => Step::Bad { progress, bag },
        }
    })
}

/// Run a parser and return the exact slice of source it consumed.
pub fn get_chomped_string<C, X, T>(parser: Parser<C, X, T>) -> Parser<C, X, String>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    map_chomped_string(|chomped, _| chomped.to_string(), parser)
}

// ============================================================================
// Combinators
// ============================================================================

/// Transform the value of a successful parse.
pub fn map<C, X, T, R>(f: impl Fn(T) -> R + 'static, parser: Parser<C, X, T>) -> Parser<C, X, R>
where
    C: 'static,
    X: 'static,
    T: 'static,
    R: 'static,
{
    Parser::new(move |state| match parser.step(state) {
        Step::Good {
            progress,
            value,
            state,
        } => Step::Good {
            progress,
            value: f(value),
            state,
        },
        Step::Bad { progress, bag } => Step::Bad { progress, bag },
    })
}

/// Run two parsers in sequence and combine their values with `f`.
///
/// The composite made progress if either half did, so a failure in the
/// second half after the first consumed input stays committed.
pub fn map2<C, X, A, B, R>(
    f: impl Fn(A, B) -> R + 'static,
    parser_a: Parser<C, X, A>,
    parser_b: Parser<C, X, B>,
) -> Parser<C, X, R>
where
    C: 'static,
    X: 'static,
    A: 'static,
    B: 'static,
    R: 'static,
{
    Parser::new(move |state| match parser_a.step(state) {
        Step::Bad { progress, bag } => Step::Bad { progress, bag },
        Step::Good {
            progress: progress_a,
            value: value_a,
            state,
        } => match parser_b.step(state) {
            Step::Bad {
                progress: progress_b,
                bag,
            } => Step::Bad {
                progress: progress_a || progress_b,
                bag,
            },
            Step::Good {
                progress: progress_b,
                value: value_b,
                state,
            } => Step::Good {
                progress: progress_a || progress_b,
                value: f(value_a, value_b),
                state,
            },
        },
    })
}

/// Run `keep` then `skipped`, keeping only `keep`'s value.
pub fn skip<C, X, T, U>(keep: Parser<C, X, T>, skipped: Parser<C, X, U>) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: 'static,
    U: 'static,
{
    map2(|kept, _| kept, keep, skipped)
}

/// Parse one thing, then use its value to decide what to parse next.
///
/// This is how checks on a just-parsed value are expressed: return
/// [`succeed`] to accept it or [`problem`] to reject it. Progress
/// propagates exactly as in [`map2`].
pub fn and_then<C, X, T, R>(
    callback: impl Fn(T) -> Parser<C, X, R> + 'static,
    parser: Parser<C, X, T>,
) -> Parser<C, X, R>
where
    C: 'static,
    X: 'static,
    T: 'static,
    R: 'static,
{
    Parser::new(move |state| match parser.step(state) {
        Step::Bad { progress, bag } => Step::Bad { progress, bag },
        Step::Good {
            progress: progress_a,
            value,
            state,
        } => match callback(value).step(state) {
            Step::Bad {
                progress: progress_b,
                bag,
            } => Step::Bad {
                progress: progress_a || progress_b,
                bag,
            },
            Step::Good {
                progress: progress_b,
                value,
                state,
            } => Step::Good {
                progress: progress_a || progress_b,
                value,
                state,
            },
        },
    })
}

/// Try the parsers in order until one succeeds, or until one commits.
///
/// An alternative that fails after consuming input ends the whole choice
/// with that failure; alternatives that fail without consuming anything
/// accumulate their dead ends and the next one is tried against the entry
/// state. If every alternative falls through, all of the accumulated dead
/// ends are reported.
pub fn one_of<C, X, T>(parsers: Vec<Parser<C, X, T>>) -> Parser<C, X, T>
where
    C: Clone + 'static,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state: State<C>| {
        let mut bag = Bag::Empty;
        for parser in &parsers {
            match parser.step(state.clone()) {
                step @ Step::Good { .. } => return step,
                step @ Step::Bad { progress: true, .. } => return step,
                Step::Bad { bag: failed, .. } => bag = Bag::append(bag, failed),
            }
        }
        Step::Bad {
            progress: false,
            bag,
        }
    })
}

/// Erase a parser's progress, so an enclosing [`one_of`] keeps trying
/// alternatives even when this one failed after consuming input.
///
/// This only launders the commit signal; a successful parse still leaves
/// the input consumed. Use sparingly; every `backtrackable` is re-parsing
/// you asked for.
pub fn backtrackable<C, X, T>(parser: Parser<C, X, T>) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state| match parser.step(state) {
        Step::Good { value, state, .. } => Step::Good {
            progress: false,
            value,
            state,
        },
        Step::Bad { bag, .. } => Step::Bad {
            progress: false,
            bag,
        },
    })
}

/// Defer building a parser until it is first used, enabling recursive
/// grammars. The thunk runs once; the built parser is memoized.
pub fn lazy<C, X, T>(thunk: impl Fn() -> Parser<C, X, T> + 'static) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    let cell: OnceCell<Parser<C, X, T>> = OnceCell::new();
    Parser::new(move |state| cell.get_or_init(&thunk).step(state))
}

/// Record that `parser` runs inside the given syntactic context.
///
/// A [`Located`] frame with the entry position is pushed for the duration
/// of the parse; failures inside carry the full stack on their dead ends
/// (innermost frame last), and success restores the surrounding stack.
pub fn in_context<C, X, T>(context: C, parser: Parser<C, X, T>) -> Parser<C, X, T>
where
    C: Clone + 'static,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state: State<C>| {
        let prior = state.context.clone();
        let mut stacked = prior.clone();
        stacked.push(Located {
            row: state.row,
            column: state.column,
            context: context.clone(),
        });

        match parser.step(state.with_context(stacked)) {
            Step::Good {
                progress,
                value,
                state,
            } => Step::Good {
                progress,
                value,
                state: state.with_context(prior),
            },
            bad => bad,
        }
    })
}

// ============================================================================
// Indentation
// ============================================================================

/// Run `parser` with the indentation baseline set to `indent`, restoring
/// the surrounding baseline afterwards. The engine never interprets the
/// baseline itself; read it back with [`get_indent`] to build your own
/// indentation rules.
pub fn with_indent<C, X, T>(indent: usize, parser: Parser<C, X, T>) -> Parser<C, X, T>
where
    C: Clone + 'static,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state: State<C>| {
        let prior = state.indent;
        match parser.step(state.with_indent(indent)) {
            Step::Good {
                progress,
                value,
                state,
            } => Step::Good {
                progress,
                value,
                state: state.with_indent(prior),
            },
            bad => bad,
        }
    })
}

// ============================================================================
// Position observers
// ============================================================================

/// The current row and column, without consuming input.
pub fn get_position<C, X>() -> Parser<C, X, Position>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.position(),
        state,
    })
}

/// The current row (1-based), without consuming input.
pub fn get_row<C, X>() -> Parser<C, X, usize>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.row,
        state,
    })
}

/// The current column (1-based), without consuming input.
pub fn get_column<C, X>() -> Parser<C, X, usize>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.column,
        state,
    })
}

/// The current byte offset, without consuming input.
pub fn get_offset<C, X>() -> Parser<C, X, usize>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.offset,
        state,
    })
}

/// The entire source being parsed, without consuming input.
pub fn get_source<C, X>() -> Parser<C, X, String>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.source.to_string(),
        state,
    })
}

/// The current indentation baseline, without consuming input.
pub fn get_indent<C, X>() -> Parser<C, X, usize>
where
    C: 'static,
    X: 'static,
{
    Parser::new(|state: State<C>| Step::Good {
        progress: false,
        value: state.indent,
        state,
    })
}

// ============================================================================
// Identifiers
// ============================================================================

/// Parse an identifier: one code point accepted by `start`, extended by
/// code points accepted by `inner`, as long as the result is not in
/// `reserved`.
///
/// A reserved match fails without committing, so an enclosing [`one_of`]
/// can still try a keyword alternative.
pub fn variable<C, X>(
    start: impl Fn(char) -> bool + 'static,
    inner: impl Fn(char) -> bool + 'static,
    reserved: HashSet<String>,
    expecting: X,
) -> Parser<C, X, String>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    Parser::new(move |state: State<C>| {
        let (offset, row, column) = match scan::sub_char(&start, state.offset, &state.source) {
            SubChar::Reject => {
                return Step::Bad {
                    progress: false,
                    bag: Bag::from_state(&state, expecting.clone()),
                }
            }
            SubChar::Newline => (state.offset + 1, state.row + 1, 1),
            SubChar::Advance(next) => (next, state.row, state.column + 1),
        };

        let (end, row, column) =
            scan::chomp_while_from(&inner, offset, row, column, &state.source);

        let name = &state.source[state.offset..end];
        if reserved.contains(name) {
            Step::Bad {
                progress: false,
                bag: Bag::from_state(&state, expecting.clone()),
            }
        } else {
            let name = name.to_string();
            Step::Good {
                progress: true,
                value: name,
                state: state.advance(end, row, column),
            }
        }
    })
}

// ============================================================================
// Numbers
// ============================================================================

/// Which numeric shapes [`number`] accepts and how each converts to the
/// output type.
///
/// Each base slot is either `Ok(convert)`, meaning the base is permitted
/// and its value goes through `convert`, or `Err(problem)`, meaning a
/// lexeme of that base reports the given problem. `invalid` covers
/// malformed numbers
/// (a base prefix with no digits, an exponent with no digits); `expecting`
/// is reported when there is no number here at all.
///
/// Integer slots receive the value accumulated in an `i64` with wrapping
/// arithmetic; the float slot receives the value of the full lexeme
/// (digits, fraction, exponent) as parsed by `str::parse::<f64>`.
pub struct NumberConfig<X, T> {
    /// Decimal integers like `1776`
    pub int: Result<Box<dyn Fn(i64) -> T>, X>,
    /// Hexadecimal integers like `0xFF`
    pub hexadecimal: Result<Box<dyn Fn(i64) -> T>, X>,
    /// Octal integers like `0o17`
    pub octal: Result<Box<dyn Fn(i64) -> T>, X>,
    /// Binary integers like `0b1010`
    pub binary: Result<Box<dyn Fn(i64) -> T>, X>,
    /// Floats like `3.25` and `6.022e23`
    pub float: Result<Box<dyn Fn(f64) -> T>, X>,
    /// Problem for malformed numbers
    pub invalid: X,
    /// Problem when no number is present at all
    pub expecting: X,
}

/// Parse a number in any of the configured shapes, without backtracking.
///
/// The recognizer commits as soon as it is sure it is looking at a number:
/// a forbidden base or a malformed tail is a committed failure, not an
/// invitation to try other alternatives.
pub fn number<C, X, T>(config: NumberConfig<X, T>) -> Parser<C, X, T>
where
    C: Clone + 'static,
    X: Clone + 'static,
    T: 'static,
{
    Parser::new(move |state: State<C>| {
        if scan::is_ascii(b'0', state.offset, &state.source) {
            let zero_offset = state.offset + 1;
            let base_offset = zero_offset + 1;

            if scan::is_ascii(b'x', zero_offset, &state.source) {
                let consumed = consume_base16(base_offset, &state.source);
                finalize_int(
                    &config.invalid,
                    &config.hexadecimal,
                    base_offset,
                    consumed,
                    state,
                )
            } else if scan::is_ascii(b'o', zero_offset, &state.source) {
                let consumed = consume_base(8, base_offset, &state.source);
                finalize_int(&config.invalid, &config.octal, base_offset, consumed, state)
            } else if scan::is_ascii(b'b', zero_offset, &state.source) {
                let consumed = consume_base(2, base_offset, &state.source);
                finalize_int(&config.invalid, &config.binary, base_offset, consumed, state)
            } else {
                // Leading zero: the integer part is 0, the rest may be a
                // fraction or exponent.
                finalize_float(&config, (zero_offset, 0), state)
            }
        } else {
            let consumed = consume_base(10, state.offset, &state.source);
            finalize_float(&config, consumed, state)
        }
    })
}

fn finalize_int<C, X, T>(
    invalid: &X,
    handler: &Result<Box<dyn Fn(i64) -> T>, X>,
    start_offset: usize,
    (end_offset, total): (usize, i64),
    state: State<C>,
) -> Step<C, X, T>
where
    C: Clone,
    X: Clone,
{
    match handler {
        Err(forbidden) => Step::Bad {
            progress: true,
            bag: Bag::from_state(&state, forbidden.clone()),
        },
        Ok(to_value) => {
            if start_offset == end_offset {
                // A base prefix with no digits commits; a missing number
                // does not.
                Step::Bad {
                    progress: state.offset < start_offset,
                    bag: Bag::from_state(&state, invalid.clone()),
                }
            } else {
                let value = to_value(total);
                let column = state.column + (end_offset - state.offset);
                let next = state.advance(end_offset, state.row, column);
                Step::Good {
                    progress: true,
                    value,
                    state: next,
                }
            }
        }
    }
}

fn finalize_float<C, X, T>(
    config: &NumberConfig<X, T>,
    (int_offset, total): (usize, i64),
    state: State<C>,
) -> Step<C, X, T>
where
    C: Clone,
    X: Clone,
{
    match consume_dot_and_exp(int_offset, &state.source) {
        Err(at) => {
            // Exponent marker with no digits: point at where the digits
            // were expected.
            let column = state.column + (at - state.offset);
            Step::Bad {
                progress: true,
                bag: Bag::from_parts(
                    state.row,
                    column,
                    config.invalid.clone(),
                    state.context.clone(),
                ),
            }
        }
        Ok(float_offset) => {
            if state.offset == float_offset {
                Step::Bad {
                    progress: false,
                    bag: Bag::from_state(&state, config.expecting.clone()),
                }
            } else if int_offset == float_offset {
                finalize_int(
                    &config.invalid,
                    &config.int,
                    state.offset,
                    (int_offset, total),
                    state,
                )
            } else {
                match &config.float {
                    Err(forbidden) => Step::Bad {
                        progress: true,
                        bag: Bag::from_state(&state, forbidden.clone()),
                    },
                    Ok(to_value) => {
                        match state.source[state.offset..float_offset].parse::<f64>() {
                            Ok(parsed) => {
                                let value = to_value(parsed);
                                let column = state.column + (float_offset - state.offset);
                                let next = state.advance(float_offset, state.row, column);
                                Step::Good {
                                    progress: true,
                                    value,
                                    state: next,
                                }
                            }
                            Err(_) => Step::Bad {
                                progress: true,
                                bag: Bag::from_state(&state, config.invalid.clone()),
                            },
                        }
                    }
                }
            }
        }
    }
}

/// Parse a decimal integer, reporting `expecting` when no number is
/// present and `invalid` for any other numeric shape (hex, octal, binary,
/// float).
///
/// Negation is up to the caller, as is everything after the digits.
pub fn integer<C, X>(expecting: X, invalid: X) -> Parser<C, X, i64>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    number(NumberConfig {
        int: Ok(Box::new(|n| n)),
        hexadecimal: Err(invalid.clone()),
        octal: Err(invalid.clone()),
        binary: Err(invalid.clone()),
        float: Err(invalid.clone()),
        invalid,
        expecting,
    })
}

/// Parse a decimal integer or float, reporting `expecting` when no number
/// is present and `invalid` for hex, octal, and binary shapes.
pub fn float<C, X>(expecting: X, invalid: X) -> Parser<C, X, f64>
where
    C: Clone + 'static,
    X: Clone + 'static,
{
    number(NumberConfig {
        int: Ok(Box::new(|n| n as f64)),
        hexadecimal: Err(invalid.clone()),
        octal: Err(invalid.clone()),
        binary: Err(invalid.clone()),
        float: Ok(Box::new(|f| f)),
        invalid,
        expecting,
    })
}
