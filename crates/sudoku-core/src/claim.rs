//! Claims: the atomic proposition "cell `(x, y)` holds symbol `z`".

use std::collections::BTreeSet;

use crate::fact::FactId;
use crate::index::linear_id;

/// Opaque handle into [`crate::puzzle::Puzzle`]'s claim table.
///
/// Ordered so that claim sets (used as event falsified-sets and fact
/// membership) iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(pub usize);

/// A graph vertex identified by `(x, y, z)`.
///
/// Immutable identity, mutable neighbor set. A claim with an empty
/// neighbor set is false (eliminated); a claim with a neighbor fact of
/// size 1 is true.
#[derive(Debug, Clone)]
pub struct Claim {
    id: ClaimId,
    x: usize,
    y: usize,
    z: usize,
    facts: BTreeSet<FactId>,
}

impl Claim {
    pub(crate) fn new(id: ClaimId, x: usize, y: usize, z: usize) -> Self {
        Claim {
            id,
            x,
            y,
            z,
            facts: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn z(&self) -> usize {
        self.z
    }

    /// Dense linearization of this claim's coordinates, for hashing and
    /// deterministic tie-breaking.
    pub fn linear_id(&self, side: usize) -> usize {
        linear_id(self.x, self.y, self.z, side)
    }

    /// Read-only view of the facts this claim currently participates in.
    pub fn neighbors(&self) -> &BTreeSet<FactId> {
        &self.facts
    }

    /// A claim with no surviving fact membership is eliminated.
    pub fn is_false(&self) -> bool {
        self.facts.is_empty()
    }

    pub(crate) fn facts_mut(&mut self) -> &mut BTreeSet<FactId> {
        &mut self.facts
    }
}
