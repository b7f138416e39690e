//! Constraint-graph Sudoku solver.
//!
//! A puzzle is a bipartite graph of [`claim`]s ("cell `(x,y)` holds symbol
//! `z`") and [`fact`]s ("exactly one claim in this group is true"). A
//! [`technique::Driver`] runs a prioritized list of [`technique::Technique`]
//! implementations to a fixed point, recording every inference as a node in
//! an [`event`] causal time tree.

pub mod claim;
pub mod config;
pub mod error;
pub mod event;
pub mod fact;
pub mod graph;
pub mod index;
pub mod parser;
pub mod puzzle;
pub mod render;
pub mod technique;
pub mod techniques;

pub use claim::{Claim, ClaimId};
pub use config::{CancellationToken, SolverConfig};
pub use error::SolverError;
pub use event::{FalsifiedTime, SolutionEvent};
pub use fact::{Fact, FactId, RuleType};
pub use parser::{Parser, TextParser};
pub use puzzle::Puzzle;
pub use technique::{Driver, Technique};
