//! Dead Ends and the Error Bag
//!
//! Failures accumulate in a small persistent tree with O(1) append; the
//! driver flattens it once, after the run, into the list of dead ends in
//! the order they were recorded. Nodes are immutable and may be shared by
//! several failing branches, so the tree hangs together with `Rc`.

use std::fmt;
use std::rc::Rc;

use super::state::{Located, State};

/// One failure record: where parsing got stuck, the caller's problem tag,
/// and the stack of contexts that were open at the time (innermost last).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeadEnd<C, X> {
    /// Row of the failure (1-based)
    pub row: usize,
    /// Column of the failure (1-based)
    pub column: usize,
    /// The caller's description of what went wrong
    pub problem: X,
    /// Context frames open when the failure was recorded, innermost last
    pub context_stack: Vec<Located<C>>,
}

impl<C, X: fmt::Display> fmt::Display for DeadEnd<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at row {}, column {}",
            self.problem, self.row, self.column
        )
    }
}

/// Persistent tree of dead ends.
///
/// `append` and the `add_right` constructors are O(1); flattening is O(n)
/// and happens once per failed run.
#[derive(Debug, Clone)]
pub enum Bag<C, X> {
    /// No failures
    Empty,
    /// All the failures in the inner bag, then one more dead end
    AddRight(Rc<Bag<C, X>>, DeadEnd<C, X>),
    /// All the failures on the left, then all the failures on the right
    Append(Rc<Bag<C, X>>, Rc<Bag<C, X>>),
}

impl<C: Clone, X> Bag<C, X> {
    /// A single dead end recorded at the state's current position.
    pub fn from_state(state: &State<C>, problem: X) -> Self {
        Bag::AddRight(
            Rc::new(Bag::Empty),
            DeadEnd {
                row: state.row,
                column: state.column,
                problem,
                context_stack: state.context.clone(),
            },
        )
    }

    /// A single dead end at an explicit position, for failures reported
    /// somewhere other than the entry state (e.g. `chomp_until` at EOF).
    pub fn from_parts(row: usize, column: usize, problem: X, context: Vec<Located<C>>) -> Self {
        Bag::AddRight(
            Rc::new(Bag::Empty),
            DeadEnd {
                row,
                column,
                problem,
                context_stack: context,
            },
        )
    }
}

impl<C, X> Bag<C, X> {
    /// Join two bags; the left bag's failures come first when flattened.
    #[inline]
    pub fn append(left: Self, right: Self) -> Self {
        Bag::Append(Rc::new(left), Rc::new(right))
    }
}

impl<C: Clone, X: Clone> Bag<C, X> {
    /// Flatten the tree into the dead ends in recording order.
    pub fn to_dead_ends(&self) -> Vec<DeadEnd<C, X>> {
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }
}

fn collect<C: Clone, X: Clone>(bag: &Bag<C, X>, out: &mut Vec<DeadEnd<C, X>>) {
    match bag {
        Bag::Empty => {}
        Bag::AddRight(rest, dead_end) => {
            collect(rest, out);
            out.push(dead_end.clone());
        }
        Bag::Append(left, right) => {
            collect(left, out);
            collect(right, out);
        }
    }
}
