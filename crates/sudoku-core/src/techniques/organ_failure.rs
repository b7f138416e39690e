//! `OrganFailure`: a cell's remaining-candidate organ has failed down to
//! one option (the classic "naked single"). Re-validates `CELL` facts of
//! size 1 as a standalone, dispatchable step over the same
//! `validateFinalState` cascade `Puzzle::falsify` already runs eagerly.

use crate::error::SolverError;
use crate::event::FalsifiedTime;
use crate::fact::RuleType;
use crate::puzzle::Puzzle;
use crate::technique::Technique;
use crate::techniques::scan_revalidate;

#[derive(Debug, Default)]
pub struct OrganFailure;

impl Technique for OrganFailure {
    fn name(&self) -> &'static str {
        "OrganFailure"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        scan_revalidate(puzzle, "OrganFailure", |f| f.rule() == RuleType::Cell && f.len() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_once_cascades_already_settled() {
        let mut values = vec![0; 16];
        values[0] = 1;
        let mut puzzle = Puzzle::new(2, &values).unwrap();
        let claim = puzzle.claim(0, 0, 0);
        let mut event = crate::event::SolutionEvent::new("init");
        for c in puzzle.visible_claims(claim) {
            puzzle.falsify(c, &mut event).unwrap();
        }
        event.finish().unwrap();

        let mut organ_failure = OrganFailure::default();
        let result = organ_failure.process(&mut puzzle).unwrap();
        assert!(result.is_none(), "eager cascade already resolved every size-1 fact");
    }
}
