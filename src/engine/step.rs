//! Parse Steps
//!
//! A parser is a function from a [`State`] to a [`Step`]: either success
//! with a value and the state to continue from, or failure with a bag of
//! dead ends. Both carry the `progress` flag (whether any input was
//! consumed), which is the single signal driving the commit discipline in
//! `one_of`, `map2`, `and_then`, and `backtrackable`.

use super::bag::Bag;
use super::state::State;

/// The result of invoking a parser on a state.
#[derive(Debug)]
pub enum Step<C, X, T> {
    /// The parser succeeded.
    Good {
        /// Whether the parser consumed any input
        progress: bool,
        /// The parsed value
        value: T,
        /// The state the next parser continues from
        state: State<C>,
    },
    /// The parser failed. No partial state survives a failure; only the
    /// positions recorded in the bag.
    Bad {
        /// Whether the parser consumed input before failing. A committed
        /// failure (`true`) stops an enclosing choice from trying other
        /// alternatives.
        progress: bool,
        /// The failures recorded so far
        bag: Bag<C, X>,
    },
}
