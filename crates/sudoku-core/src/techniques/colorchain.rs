//! §4.J: bi-coloring of size-2 ("XOR") facts to find contradictions
//! within a chain, across a chain to an outside claim, or between two
//! chains (bridge collapse).

use std::collections::{BTreeMap, BTreeSet};

use crate::claim::ClaimId;
use crate::error::SolverError;
use crate::event::{FalsifiedTime, SolutionEvent};
use crate::graph::connected_components;
use crate::puzzle::Puzzle;
use crate::technique::Technique;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    A,
    B,
}

impl Color {
    fn flip(self) -> Color {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }
}

#[derive(Debug, Default)]
pub struct ColorChain;

impl Technique for ColorChain {
    fn name(&self) -> &'static str {
        "ColorChain"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        let adjacency = xor_adjacency(puzzle);
        if adjacency.is_empty() {
            return Ok(None);
        }
        let seeds: Vec<ClaimId> = adjacency.keys().copied().collect();
        let components = connected_components(seeds, |c| {
            adjacency.get(&c).map(|s| s.iter().copied().collect()).unwrap_or_default()
        });
        let coloring = two_color(&components, &adjacency);

        for component in &components {
            if let Some(claims) = find_internal_contradiction(puzzle, component, &coloring) {
                return emit(puzzle, "ColorChainInternalContradiction", claims);
            }
        }
        for component in &components {
            if let Some(claims) = find_external_elimination(puzzle, component, &coloring) {
                return emit(puzzle, "ColorChainExternalContradiction", claims);
            }
        }
        for i in 0..components.len() {
            for j in (i + 1)..components.len() {
                if let Some(claims) =
                    find_bridge_collapse(puzzle, &components[i], &components[j], &coloring)
                {
                    return emit(puzzle, "ColorChainCollapseBridges", claims);
                }
            }
        }
        Ok(None)
    }
}

fn xor_adjacency(puzzle: &Puzzle) -> BTreeMap<ClaimId, BTreeSet<ClaimId>> {
    let mut adjacency: BTreeMap<ClaimId, BTreeSet<ClaimId>> = BTreeMap::new();
    for fact in puzzle.facts().filter(|f| f.is_xor()) {
        let claims: Vec<ClaimId> = fact.claims().iter().copied().collect();
        let (a, b) = (claims[0], claims[1]);
        adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
    }
    adjacency
}

fn two_color(
    components: &[Vec<ClaimId>],
    adjacency: &BTreeMap<ClaimId, BTreeSet<ClaimId>>,
) -> BTreeMap<ClaimId, Color> {
    let mut coloring = BTreeMap::new();
    for component in components {
        let Some(&root) = component.first() else { continue };
        coloring.insert(root, Color::A);
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(root);
        while let Some(node) = queue.pop_front() {
            let node_color = coloring[&node];
            if let Some(neighbors) = adjacency.get(&node) {
                for &next in neighbors {
                    if !coloring.contains_key(&next) {
                        coloring.insert(next, node_color.flip());
                        queue.push_back(next);
                    }
                }
            }
        }
    }
    coloring
}

fn split_by_color(
    component: &[ClaimId],
    coloring: &BTreeMap<ClaimId, Color>,
) -> (Vec<ClaimId>, Vec<ClaimId>) {
    let mut a = Vec::new();
    let mut b = Vec::new();
    for &c in component {
        match coloring.get(&c) {
            Some(Color::A) => a.push(c),
            Some(Color::B) => b.push(c),
            None => {}
        }
    }
    (a, b)
}

fn shares_a_fact(puzzle: &Puzzle, x: ClaimId, y: ClaimId) -> bool {
    puzzle
        .claim_ref(x)
        .neighbors()
        .intersection(puzzle.claim_ref(y).neighbors())
        .next()
        .is_some()
}

/// Two same-colored claims sharing a non-XOR fact force their whole color
/// globally false within this chain: both can't be true at once (the
/// shared fact allows only one), yet chain propagation ties every
/// same-colored claim to the same truth value.
fn find_internal_contradiction(
    puzzle: &Puzzle,
    component: &[ClaimId],
    coloring: &BTreeMap<ClaimId, Color>,
) -> Option<Vec<ClaimId>> {
    let (a, b) = split_by_color(component, coloring);
    for group in [&a, &b] {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let shares_non_xor = puzzle
                    .claim_ref(group[i])
                    .neighbors()
                    .intersection(puzzle.claim_ref(group[j]).neighbors())
                    .any(|&fid| puzzle.fact_ref(fid).len() != 2);
                if shares_non_xor {
                    return Some(group.clone());
                }
            }
        }
    }
    None
}

/// A claim outside the chain sharing a fact with *both* colors must be
/// false: whichever color turns out true, it conflicts.
fn find_external_elimination(
    puzzle: &Puzzle,
    component: &[ClaimId],
    coloring: &BTreeMap<ClaimId, Color>,
) -> Option<Vec<ClaimId>> {
    let in_component: BTreeSet<ClaimId> = component.iter().copied().collect();
    let (a, b) = split_by_color(component, coloring);

    let outsiders_touching = |group: &[ClaimId]| -> BTreeSet<ClaimId> {
        let mut out = BTreeSet::new();
        for &c in group {
            for other in puzzle.visible_claims(c) {
                if !in_component.contains(&other) {
                    out.insert(other);
                }
            }
        }
        out
    };

    let touching_a = outsiders_touching(&a);
    let touching_b = outsiders_touching(&b);
    let eliminate: Vec<ClaimId> = touching_a.intersection(&touching_b).copied().collect();
    if eliminate.is_empty() {
        None
    } else {
        Some(eliminate)
    }
}

/// If chain `C1`'s color-A claims conflict with *both* of `C2`'s colors,
/// C1's color A can never be true regardless of which way C2 resolves --
/// it is globally false. Checks all four cross-color combinations and
/// falsifies whichever side is doubly blocked.
fn find_bridge_collapse(
    puzzle: &Puzzle,
    c1: &[ClaimId],
    c2: &[ClaimId],
    coloring: &BTreeMap<ClaimId, Color>,
) -> Option<Vec<ClaimId>> {
    let (a1, b1) = split_by_color(c1, coloring);
    let (a2, b2) = split_by_color(c2, coloring);

    let conflicts = |xs: &[ClaimId], ys: &[ClaimId]| -> bool {
        xs.iter().any(|&x| ys.iter().any(|&y| shares_a_fact(puzzle, x, y)))
    };

    let a1_a2 = conflicts(&a1, &a2);
    let a1_b2 = conflicts(&a1, &b2);
    let b1_a2 = conflicts(&b1, &a2);
    let b1_b2 = conflicts(&b1, &b2);

    if a1_a2 && a1_b2 && !a1.is_empty() {
        return Some(a1);
    }
    if b1_a2 && b1_b2 && !b1.is_empty() {
        return Some(b1);
    }
    if a1_a2 && b1_a2 && !a2.is_empty() {
        return Some(a2);
    }
    if a1_b2 && b1_b2 && !b2.is_empty() {
        return Some(b2);
    }
    None
}

fn emit(
    puzzle: &mut Puzzle,
    label: &str,
    claims: Vec<ClaimId>,
) -> Result<Option<FalsifiedTime>, SolverError> {
    let mut event = SolutionEvent::new("ColorChain");
    event.push(label);
    for claim in claims {
        puzzle.falsify(claim, &mut event)?;
    }
    event.pop()?;
    Ok(Some(event.finish()?))
}
