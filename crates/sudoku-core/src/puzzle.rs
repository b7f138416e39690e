//! Puzzle: owns every claim and fact, and the invariant-preserving
//! mutations (falsification, cascade validation) that every technique
//! drives the graph through.

use std::collections::BTreeSet;

use crate::claim::{Claim, ClaimId};
use crate::error::SolverError;
use crate::event::SolutionEvent;
use crate::fact::{Fact, FactId, RuleType};
use crate::graph;
use crate::index::{box_cells, box_of, linear_id};

/// The bipartite claim/fact graph for one puzzle instance.
///
/// Claims and facts are owned in flat tables; cross-references are index
/// handles ([`ClaimId`], [`FactId`]), not back-pointers (see the cyclic
/// graph design note). A claim's cell, row, column and box fact ids never
/// change after construction -- only a fact's *membership* shrinks.
#[derive(Debug, Clone)]
pub struct Puzzle {
    magnitude: usize,
    side: usize,
    claims: Vec<Claim>,
    facts: Vec<Fact>,
    poisoned: Option<FactId>,
}

impl Puzzle {
    /// Construct from a magnitude and a row-major, 0-indexed value list of
    /// length `magnitude^4`. `0` is blank; `v` in `[1, magnitude^2]` is a
    /// given. Fails with [`SolverError::MalformedInput`] on a dimension or
    /// range mismatch.
    pub fn new(magnitude: usize, values: &[usize]) -> Result<Self, SolverError> {
        let side = magnitude * magnitude;
        let expected = side * side;
        if values.len() != expected || values.iter().any(|&v| v > side) {
            return Err(SolverError::MalformedInput {
                expected,
                actual: values.len(),
                max_value: side,
            });
        }

        let mut claims = Vec::with_capacity(side * side * side);
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    let id = ClaimId(linear_id(x, y, z, side));
                    claims.push(Claim::new(id, x, y, z));
                }
            }
        }

        let mut facts = Vec::with_capacity(side * side * 4 + side * side);
        let mut cell_fact = vec![FactId(0); side * side];
        let mut row_fact = vec![FactId(0); side * side];
        let mut col_fact = vec![FactId(0); side * side];
        let mut box_fact = vec![FactId(0); side * side];

        for x in 0..side {
            for y in 0..side {
                let members: BTreeSet<ClaimId> =
                    (0..side).map(|z| ClaimId(linear_id(x, y, z, side))).collect();
                let fid = FactId(facts.len());
                facts.push(Fact::new(fid, RuleType::Cell, members));
                cell_fact[x * side + y] = fid;
            }
        }
        for y in 0..side {
            for z in 0..side {
                let members: BTreeSet<ClaimId> =
                    (0..side).map(|x| ClaimId(linear_id(x, y, z, side))).collect();
                let fid = FactId(facts.len());
                facts.push(Fact::new(fid, RuleType::Row, members));
                row_fact[y * side + z] = fid;
            }
        }
        for x in 0..side {
            for z in 0..side {
                let members: BTreeSet<ClaimId> =
                    (0..side).map(|y| ClaimId(linear_id(x, y, z, side))).collect();
                let fid = FactId(facts.len());
                facts.push(Fact::new(fid, RuleType::Column, members));
                col_fact[x * side + z] = fid;
            }
        }
        for b in 0..side {
            for z in 0..side {
                let members: BTreeSet<ClaimId> = box_cells(b, magnitude)
                    .into_iter()
                    .map(|(x, y)| ClaimId(linear_id(x, y, z, side)))
                    .collect();
                let fid = FactId(facts.len());
                facts.push(Fact::new(fid, RuleType::Box, members));
                box_fact[b * side + z] = fid;
            }
        }

        for x in 0..side {
            for y in 0..side {
                let b = box_of(x, y, magnitude);
                for z in 0..side {
                    let cid = ClaimId(linear_id(x, y, z, side));
                    let claim = &mut claims[cid.0];
                    claim.facts_mut().insert(cell_fact[x * side + y]);
                    claim.facts_mut().insert(row_fact[y * side + z]);
                    claim.facts_mut().insert(col_fact[x * side + z]);
                    claim.facts_mut().insert(box_fact[b * side + z]);
                }
            }
        }

        // Row-major, 0-indexed, top-left first: index = y*side + x.
        for (i, &v) in values.iter().enumerate() {
            if v == 0 {
                continue;
            }
            let x = i % side;
            let y = i / side;
            let z = v - 1;
            let cid = ClaimId(linear_id(x, y, z, side));
            let fid = FactId(facts.len());
            let mut members = BTreeSet::new();
            members.insert(cid);
            facts.push(Fact::new(fid, RuleType::Init, members));
            claims[cid.0].facts_mut().insert(fid);
        }

        Ok(Puzzle {
            magnitude,
            side,
            claims,
            facts,
            poisoned: None,
        })
    }

    /// Build directly from a [`crate::parser::Parser`] collaborator.
    pub fn from_parser(parser: &impl crate::parser::Parser) -> Result<Self, SolverError> {
        Puzzle::new(parser.mag(), parser.values())
    }

    pub fn magnitude(&self) -> usize {
        self.magnitude
    }

    pub fn side_length(&self) -> usize {
        self.side
    }

    /// O(1) lookup of the claim id for `(x, y, z)`.
    pub fn claim(&self, x: usize, y: usize, z: usize) -> ClaimId {
        ClaimId(linear_id(x, y, z, self.side))
    }

    pub fn claim_ref(&self, id: ClaimId) -> &Claim {
        &self.claims[id.0]
    }

    pub fn fact_ref(&self, id: FactId) -> &Fact {
        &self.facts[id.0]
    }

    pub(crate) fn claim_mut(&mut self, id: ClaimId) -> &mut Claim {
        &mut self.claims[id.0]
    }

    pub(crate) fn fact_mut(&mut self, id: FactId) -> &mut Fact {
        &mut self.facts[id.0]
    }

    /// Snapshot-safe iterator over every fact (facts are never removed,
    /// only their membership shrinks, so this never aliases a mutation).
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// `true` once every fact's membership has shrunk to exactly one claim.
    pub fn is_solved(&self) -> bool {
        self.facts.iter().all(|f| f.len() == 1)
    }

    /// A claim is true once any fact that still contains it has shrunk to
    /// size 1 (itself, necessarily).
    pub fn claim_is_true(&self, id: ClaimId) -> bool {
        let claim = self.claim_ref(id);
        !claim.is_false() && claim.neighbors().iter().any(|&f| self.fact_ref(f).len() == 1)
    }

    /// Every other claim sharing at least one fact with `id` ("visible
    /// claims" in the glossary).
    pub fn visible_claims(&self, id: ClaimId) -> BTreeSet<ClaimId> {
        let mut out = BTreeSet::new();
        for &fid in self.claim_ref(id).neighbors() {
            for &other in self.fact_ref(fid).claims() {
                if other != id {
                    out.insert(other);
                }
            }
        }
        out
    }

    /// The first fact found with no surviving claims, if the puzzle is
    /// poisoned.
    pub fn poisoned(&self) -> Option<FactId> {
        self.poisoned
    }

    /// Claim::setFalse (§4.B): symmetrically unlink `claim` from every
    /// fact it currently belongs to. A no-op if already false. Every fact
    /// that shrinks to size 1 as a result triggers
    /// [`Self::validate_final_state`], which may recursively falsify
    /// further claims -- all recorded under the same `event`.
    pub fn falsify(&mut self, claim: ClaimId, event: &mut SolutionEvent) -> Result<(), SolverError> {
        if self.claim_ref(claim).is_false() {
            return Ok(());
        }
        let facts: Vec<FactId> = graph::neighbors_of_claim(&self.claims, claim).into_iter().collect();
        event.record(claim);
        for fact_id in facts {
            graph::remove_edge(&mut self.claims, &mut self.facts, fact_id, claim);
            let size = self.fact_ref(fact_id).len();
            if size == 0 {
                self.poisoned = Some(fact_id);
                return Err(SolverError::Unsatisfiable(fact_id));
            }
            if size == 1 {
                self.validate_final_state(fact_id, event)?;
            }
        }
        Ok(())
    }

    /// §4.C: once `fact_id` has shrunk to its sole survivor, every other
    /// claim in every *other* fact that survivor still touches must be
    /// false. Idempotent: a fact not currently of size 1 is a no-op, so
    /// re-invoking on an already-cascaded fact (the `OrganFailure` /
    /// `ValueClaim` safety nets) never does anything new.
    fn validate_final_state(&mut self, fact_id: FactId, event: &mut SolutionEvent) -> Result<(), SolverError> {
        let survivor = match self.fact_ref(fact_id).sole_survivor() {
            Some(c) => c,
            None => return Ok(()),
        };
        let other_facts: Vec<FactId> = graph::neighbors_of_claim(&self.claims, survivor)
            .into_iter()
            .filter(|&f| f != fact_id)
            .collect();
        for other in other_facts {
            let losers: Vec<ClaimId> = graph::neighbors_of_fact(&self.facts, other)
                .into_iter()
                .filter(|&c| c != survivor)
                .collect();
            for c in losers {
                self.falsify(c, event)?;
            }
        }
        Ok(())
    }

    /// Public hook for techniques that re-invoke cascade resolution as a
    /// defensive pass rather than discovering new eliminations themselves
    /// (`OrganFailure`, `CellDeath`, `ValueClaim`).
    pub fn revalidate(&mut self, fact_id: FactId, event: &mut SolutionEvent) -> Result<(), SolverError> {
        self.validate_final_state(fact_id, event)
    }

    /// §4.C `Fact::merge`: retains only `src`'s members in `fact_id`'s
    /// claim set, returning the claims ejected. This only touches
    /// `fact_id`'s own membership -- ejected claims are *not* falsified
    /// puzzle-wide by this call; the caller decides whether that's
    /// warranted.
    pub fn merge_fact(&mut self, fact_id: FactId, src: &BTreeSet<ClaimId>) -> BTreeSet<ClaimId> {
        let ejected = self.facts[fact_id.0].merge(src);
        for &claim_id in &ejected {
            self.claims[claim_id.0].facts_mut().remove(&fact_id);
        }
        ejected
    }
}
