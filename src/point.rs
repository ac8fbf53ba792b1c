use serde::{Deserialize, Serialize};

use crate::window::SplitWindow;

/// Break decision produced by [`SplitEngine::find`](crate::SplitEngine::find).
///
/// Every outcome is a first-class variant: "nothing fits" and "everything
/// fits" are normal results, not errors. `At.index` is relative to the
/// window the specification was found on; applying a specification to a
/// different window is not meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SplitSpecification {
    /// The source window had no units at all.
    Empty,
    /// No unit fits, not even the first one.
    None,
    /// The entire remaining window fits as-is.
    All,
    /// Cut the window so that the tail starts at `index`.
    At {
        /// Window-relative index of the first tail unit.
        index: usize,
        /// The break was forced through a non-breakable unit.
        hard: bool,
        /// Strip trailing skippable units from the head when materializing.
        trim_trailing: bool,
    },
}

/// Materialized result of one split.
///
/// Every unit of the original window ends up in exactly one of `head`,
/// `discarded`, or `tail`, in its original relative order. Feeding `tail`
/// back into the next find/split round assembles the full sequence.
#[derive(Clone, Debug)]
pub struct SplitPoint<T> {
    /// Units selected for the head, with collapsible runs resolved.
    pub head: Vec<T>,
    /// Supplement units charged to the head, in first-reference order.
    pub supplements: Vec<T>,
    /// Window over the units remaining after the break.
    pub tail: SplitWindow<T>,
    /// Units dropped while materializing: collapse losers first, then any
    /// trimmed trailing skippable run.
    pub discarded: Vec<T>,
    /// The head ends with a forced break through a non-breakable unit.
    ///
    /// When set, the head's collapsed size may exceed the requested capacity
    /// for exactly that unit; callers decide whether to surface a warning.
    pub hard: bool,
}

impl<T> SplitPoint<T> {
    /// Whether nothing remains to split.
    pub fn is_exhausted(&self) -> bool {
        self.tail.is_empty()
    }
}
