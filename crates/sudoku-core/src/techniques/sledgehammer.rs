//! §4.I: generalized subset elimination. `k=1` degenerates to `merge`;
//! `k=2` covers naked/hidden pairs and X-wing; higher `k` covers
//! triples/swordfish/jellyfish and beyond.

use std::collections::BTreeSet;

use crate::claim::ClaimId;
use crate::error::SolverError;
use crate::event::{FalsifiedTime, SolutionEvent};
use crate::fact::{FactId, RuleType};
use crate::puzzle::Puzzle;
use crate::technique::Technique;

/// Enumerates source/recipient fact combinations up to `max_k`, emitting
/// the first elimination found. Source facts eligible for `S` are any
/// non-`Init` fact with at least two surviving claims (a size-1 fact is
/// already solved and has nothing to contribute as a source).
pub struct Sledgehammer {
    max_k: usize,
}

impl Sledgehammer {
    pub fn new(max_k: usize) -> Self {
        Sledgehammer { max_k: max_k.max(1) }
    }
}

impl Default for Sledgehammer {
    fn default() -> Self {
        Sledgehammer::new(4)
    }
}

impl Technique for Sledgehammer {
    fn name(&self) -> &'static str {
        "Sledgehammer"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        for k in 1..=self.max_k {
            if let Some(tree) = search_k(puzzle, k)? {
                return Ok(Some(tree));
            }
        }
        Ok(None)
    }
}

fn search_k(puzzle: &mut Puzzle, k: usize) -> Result<Option<FalsifiedTime>, SolverError> {
    let sources: Vec<FactId> = puzzle
        .facts()
        .filter(|f| f.rule() != RuleType::Init && f.len() >= 2)
        .map(|f| f.id())
        .collect();

    for source_combo in combinations(&sources, k) {
        // Edge case (§4.I): two source facts sharing more than half their
        // claims will be caught at a smaller k; skip to bound the search.
        if k >= 2 && shares_too_much(puzzle, &source_combo) {
            continue;
        }

        let union: BTreeSet<ClaimId> = source_combo
            .iter()
            .flat_map(|&fid| puzzle.fact_ref(fid).claims().iter().copied())
            .collect();
        if union.len() < k {
            continue;
        }
        if union
            .iter()
            .any(|&c| puzzle.claim_ref(c).neighbors().len() <= 1)
        {
            // Already forced: no other fact to eliminate it from.
            continue;
        }

        let source_set: BTreeSet<FactId> = source_combo.iter().copied().collect();
        let mut candidate_recipients: BTreeSet<FactId> = BTreeSet::new();
        for &c in &union {
            for &fid in puzzle.claim_ref(c).neighbors() {
                if !source_set.contains(&fid) {
                    candidate_recipients.insert(fid);
                }
            }
        }
        let candidates: Vec<FactId> = candidate_recipients.into_iter().collect();
        if candidates.len() < k {
            continue;
        }

        for recipient_combo in combinations(&candidates, k) {
            let recipient_union: BTreeSet<ClaimId> = recipient_combo
                .iter()
                .flat_map(|&fid| puzzle.fact_ref(fid).claims().iter().copied())
                .collect();
            if !union.is_subset(&recipient_union) {
                continue;
            }
            let eliminate: Vec<ClaimId> = recipient_union.difference(&union).copied().collect();
            if eliminate.is_empty() {
                continue;
            }

            let label = format!(
                "Sledgehammer(k={k}, sources={source_combo:?}, recipients={recipient_combo:?})"
            );
            let mut event = SolutionEvent::new(label);
            for c in eliminate {
                puzzle.falsify(c, &mut event)?;
            }
            return Ok(Some(event.finish()?));
        }
    }
    Ok(None)
}

fn shares_too_much(puzzle: &Puzzle, combo: &[FactId]) -> bool {
    for i in 0..combo.len() {
        for j in (i + 1)..combo.len() {
            let a = puzzle.fact_ref(combo[i]).claims();
            let b = puzzle.fact_ref(combo[j]).claims();
            let shared = a.intersection(b).count();
            let smaller = a.len().min(b.len());
            if smaller > 0 && shared * 2 > smaller {
                return true;
            }
        }
    }
    false
}

/// Deterministic, lexicographic-by-input-order `k`-combinations. `items`
/// is already in ascending fact-id order (`Puzzle::facts` iterates the
/// owner table in id order), so this enumerates combinations in
/// lexicographic fact-id order, satisfying §5's reproducibility guarantee.
fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut result = Vec::new();
    if k == 0 || k > items.len() {
        return result;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.iter().map(|&i| items[i]).collect());
        let mut i = k;
        loop {
            if i == 0 {
                return result;
            }
            i -= 1;
            indices[i] += 1;
            if indices[i] <= items.len() - k + i {
                break;
            }
        }
        for j in (i + 1)..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_of_three_choose_two() {
        let combos = combinations(&[1, 2, 3], 2);
        assert_eq!(combos, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn combinations_k_larger_than_input_is_empty() {
        assert!(combinations(&[1, 2], 5).is_empty());
    }

    /// Naked pair: two unsolved cells in a row whose candidates are both
    /// exactly `{3, 7}` (0-indexed `{2, 6}`), every other cell in the row
    /// left at full candidates. Sledgehammer at `k=2` must discover the
    /// elimination itself: source = the two cells' `CELL` facts,
    /// recipient = the row's two `ROW` facts for symbols 3 and 7.
    #[test]
    fn naked_pair_eliminates_across_the_row() {
        let mut puzzle = Puzzle::new(3, &[0; 81]).unwrap();
        let row = 0usize;
        for x in [0usize, 1] {
            let mut event = SolutionEvent::new("setup");
            for z in 0..9usize {
                if z == 2 || z == 6 {
                    continue;
                }
                let claim = puzzle.claim(x, row, z);
                puzzle.falsify(claim, &mut event).unwrap();
            }
            event.finish().unwrap();
        }

        let mut sledgehammer = Sledgehammer::new(2);
        let found = sledgehammer.process(&mut puzzle).unwrap();
        assert!(found.is_some(), "expected sledgehammer to find the naked pair");

        for x in 2..9usize {
            assert!(puzzle.claim_ref(puzzle.claim(x, row, 2)).is_false());
            assert!(puzzle.claim_ref(puzzle.claim(x, row, 6)).is_false());
        }
    }

    /// X-wing: symbol `z` is only a candidate in two rows (0 and 3), and in
    /// both rows only at the same two columns (2 and 5). Sledgehammer at
    /// `k=2` with source = the two row-for-`z` facts, recipient = the two
    /// column-for-`z` facts, must eliminate `z` from every other row in
    /// those columns. The four corner cells are spread across four
    /// distinct boxes so no `BOX` fact can masquerade as a valid recipient.
    #[test]
    fn x_wing_eliminates_down_the_columns() {
        let mut puzzle = Puzzle::new(3, &[0; 81]).unwrap();
        let z = 0usize;
        let rows = [0usize, 3];
        let cols = [2usize, 5];

        for &row in &rows {
            let mut event = SolutionEvent::new("setup");
            for x in 0..9usize {
                if cols.contains(&x) {
                    continue;
                }
                let claim = puzzle.claim(x, row, z);
                puzzle.falsify(claim, &mut event).unwrap();
            }
            event.finish().unwrap();
        }

        let mut sledgehammer = Sledgehammer::new(2);
        let found = sledgehammer.process(&mut puzzle).unwrap();
        assert!(found.is_some(), "expected sledgehammer to find the x-wing");

        for row in 0..9usize {
            if rows.contains(&row) {
                continue;
            }
            for &col in &cols {
                assert!(
                    puzzle.claim_ref(puzzle.claim(col, row, z)).is_false(),
                    "expected ({col},{row},{z}) eliminated by the x-wing"
                );
            }
        }
        // The corners themselves must survive.
        for &row in &rows {
            for &col in &cols {
                assert!(!puzzle.claim_ref(puzzle.claim(col, row, z)).is_false());
            }
        }
    }
}
