//! `ValueClaim`: a value claims its one remaining legal cell in a unit
//! (the classic "hidden single"). Re-validates `ROW`/`COLUMN`/`BOX` facts
//! of size 1.

use crate::error::SolverError;
use crate::event::FalsifiedTime;
use crate::fact::RuleType;
use crate::puzzle::Puzzle;
use crate::technique::Technique;
use crate::techniques::scan_revalidate;

#[derive(Debug, Default)]
pub struct ValueClaim;

impl Technique for ValueClaim {
    fn name(&self) -> &'static str {
        "ValueClaim"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        scan_revalidate(puzzle, "ValueClaim", |f| {
            matches!(f.rule(), RuleType::Row | RuleType::Column | RuleType::Box) && f.len() == 1
        })
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

        let mut value_claim = ValueClaim::default();
        let result = value_claim.process(&mut puzzle).unwrap();
        assert!(result.is_none());
    }
}
