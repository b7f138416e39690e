//! Error kinds for the solver core.
//!
//! Four kinds, matching the four failure conditions the core can reach:
//! malformed construction input, a technique that accounted for nothing,
//! an unsatisfiable puzzle, and cross-puzzle misuse.

use thiserror::Error;

use crate::fact::FactId;

/// Everything that can go wrong building or running the constraint graph.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The values list handed to [`crate::puzzle::Puzzle::new`] did not match
    /// `magnitude^4` entries, or contained a value outside `[0, magnitude^2]`.
    #[error("malformed input: expected {expected} values in [0, {max_value}], got {actual}")]
    MalformedInput {
        expected: usize,
        actual: usize,
        max_value: usize,
    },

    /// A [`crate::event::SolutionEvent`] node finished construction having
    /// accounted for zero new falsifications. A technique that reports
    /// progress but eliminates nothing new is a bug in that technique.
    #[error("event construction accounted for no new falsified claims")]
    NoUnaccountedClaims,

    /// A fact's claim set emptied out: the puzzle has no satisfying
    /// assignment given the claims eliminated so far.
    #[error("puzzle is unsatisfiable: fact {0:?} has no surviving claims")]
    Unsatisfiable(FactId),

    /// Two entities (claims, facts, or events) that belong to different
    /// puzzles were compared or merged.
    #[error("attempted to compare or merge entities from different puzzles")]
    MisuseCrossPuzzle,
}
