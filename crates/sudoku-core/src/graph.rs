//! The bipartite graph substrate (§4.D): `neighborsOf`, symmetric
//! `removeNode`, and connected-components traversal, operating directly on
//! [`crate::puzzle::Puzzle`]'s owner tables. [`crate::puzzle::Puzzle`]
//! still owns the tables themselves and the higher-level cascade
//! (`validateFinalState`) that falsification drives, but the primitive
//! edge operations live here, not duplicated as private methods on the
//! owner.

use std::collections::{BTreeSet, VecDeque};

use crate::claim::{Claim, ClaimId};
use crate::fact::{Fact, FactId};

/// §4.D `neighborsOf`: the live fact-neighbor set of a claim node, read
/// directly from the owner table.
pub fn neighbors_of_claim(claims: &[Claim], id: ClaimId) -> BTreeSet<FactId> {
    claims[id.0].neighbors().clone()
}

/// §4.D `neighborsOf`: the live claim-neighbor set of a fact node, read
/// directly from the owner table.
pub fn neighbors_of_fact(facts: &[Fact], id: FactId) -> BTreeSet<ClaimId> {
    facts[id.0].claims().clone()
}

/// §4.D `removeNode`, specialized to one claim/fact edge (the unit
/// falsification and cascade resolution unlink one edge at a time):
/// symmetric removal, unlinking `claim_id` from `fact_id` on both sides of
/// the owner tables.
pub fn remove_edge(claims: &mut [Claim], facts: &mut [Fact], fact_id: FactId, claim_id: ClaimId) {
    facts[fact_id.0].claims_mut().remove(&claim_id);
    claims[claim_id.0].facts_mut().remove(&fact_id);
}

/// Connected components of `seed` under the symmetric relation implied by
/// `neighbors`. Plain BFS over an injected adjacency function -- the
/// substrate never inspects what a node *is*.
pub fn connected_components<N, F>(seed: impl IntoIterator<Item = N>, neighbors: F) -> Vec<Vec<N>>
where
    N: Ord + Copy,
    F: Fn(N) -> Vec<N>,
{
    let mut visited: BTreeSet<N> = BTreeSet::new();
    let mut components = Vec::new();
    for start in seed {
        if visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited.insert(start);
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for next in neighbors(node) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components
}
