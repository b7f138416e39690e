//! Facts: sets of claims constrained to "exactly one is true".

use std::collections::BTreeSet;

use crate::claim::ClaimId;

/// Opaque handle into [`crate::puzzle::Puzzle`]'s fact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(pub usize);

/// The constraint a [`Fact`] enforces over its claim set.
///
/// `Cell`/`Row`/`Column`/`Box` come from puzzle structure; `Init` is a
/// singleton fact standing for one given value and is consumed exactly
/// once in its lifecycle (see [`crate::techniques::initializer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleType {
    Cell,
    Row,
    Column,
    Box,
    Init,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Cell => "cell",
            RuleType::Row => "row",
            RuleType::Column => "column",
            RuleType::Box => "box",
            RuleType::Init => "init",
        }
    }
}

/// A graph vertex that is a set of claims, exactly one of which is true.
#[derive(Debug, Clone)]
pub struct Fact {
    id: FactId,
    rule: RuleType,
    claims: BTreeSet<ClaimId>,
}

impl Fact {
    pub(crate) fn new(id: FactId, rule: RuleType, claims: BTreeSet<ClaimId>) -> Self {
        Fact { id, rule, claims }
    }

    pub fn id(&self) -> FactId {
        self.id
    }

    pub fn rule(&self) -> RuleType {
        self.rule
    }

    /// Read-only view of this fact's current claim membership.
    pub fn claims(&self) -> &BTreeSet<ClaimId> {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// `true` once exactly one claim survives: that claim is now true.
    pub fn is_solved(&self) -> bool {
        self.claims.len() == 1
    }

    /// Is of exactly size 2: eligible as an edge in the color-chain
    /// bipartite sub-graph.
    pub fn is_xor(&self) -> bool {
        self.claims.len() == 2
    }

    pub fn sole_survivor(&self) -> Option<ClaimId> {
        if self.claims.len() == 1 {
            self.claims.iter().next().copied()
        } else {
            None
        }
    }

    /// Two facts are equal iff they have identical membership and rule.
    /// Puzzle identity equality (same owner) is the caller's
    /// responsibility -- see [`crate::error::SolverError::MisuseCrossPuzzle`].
    pub fn same_shape(&self, other: &Fact) -> bool {
        self.rule == other.rule && self.claims == other.claims
    }

    pub(crate) fn claims_mut(&mut self) -> &mut BTreeSet<ClaimId> {
        &mut self.claims
    }

    /// `src` must be a subset of this fact's claims. Retains only `src`'s
    /// members, returning the claims ejected. Purely local to this fact --
    /// ejected claims keep their membership in every other fact they
    /// touch; see [`crate::puzzle::Puzzle::merge_fact`] for the puzzle-wide
    /// bookkeeping this requires.
    pub(crate) fn merge(&mut self, src: &BTreeSet<ClaimId>) -> BTreeSet<ClaimId> {
        debug_assert!(src.is_subset(&self.claims), "merge source must be a subset");
        let ejected: BTreeSet<ClaimId> = self.claims.difference(src).copied().collect();
        self.claims = src.clone();
        ejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact_of(ids: &[usize]) -> Fact {
        Fact::new(FactId(0), RuleType::Row, ids.iter().map(|&i| ClaimId(i)).collect())
    }

    #[test]
    fn solved_and_xor_predicates() {
        let solved = fact_of(&[3]);
        assert!(solved.is_solved());
        assert_eq!(solved.sole_survivor(), Some(ClaimId(3)));

        let xor = fact_of(&[1, 2]);
        assert!(xor.is_xor());
        assert!(!xor.is_solved());
    }

    #[test]
    fn merge_retains_only_source_and_reports_ejected() {
        let mut fact = fact_of(&[1, 2, 3, 4]);
        let src: BTreeSet<ClaimId> = [1, 2].into_iter().map(ClaimId).collect();
        let ejected = fact.merge(&src);
        assert_eq!(fact.claims(), &src);
        assert_eq!(ejected, [3, 4].into_iter().map(ClaimId).collect());
    }

    #[test]
    fn same_shape_ignores_id() {
        let a = Fact::new(FactId(0), RuleType::Row, [1, 2].into_iter().map(ClaimId).collect());
        let b = Fact::new(FactId(7), RuleType::Row, [1, 2].into_iter().map(ClaimId).collect());
        assert!(a.same_shape(&b));
    }
}
