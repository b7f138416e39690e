//! §4.H: converts `Init` givens into claim-true events.

use std::collections::BTreeSet;

use crate::error::SolverError;
use crate::event::{FalsifiedTime, SolutionEvent};
use crate::fact::{FactId, RuleType};
use crate::puzzle::Puzzle;
use crate::technique::Technique;

/// Consumes one not-yet-processed `Init` fact per call, in fact-id order,
/// falsifying the sole claim's visible claims. The driver re-enters to
/// consume the next.
#[derive(Debug, Default)]
pub struct Initializer {
    processed: BTreeSet<FactId>,
}

impl Technique for Initializer {
    fn name(&self) -> &'static str {
        "Initializer"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        loop {
            let next = puzzle
                .facts()
                .filter(|f| f.rule() == RuleType::Init && !self.processed.contains(&f.id()))
                .map(|f| f.id())
                .next();
            let fact_id = match next {
                Some(id) => id,
                None => return Ok(None),
            };
            self.processed.insert(fact_id);

            let claim_id = puzzle
                .fact_ref(fact_id)
                .sole_survivor()
                .expect("an Init fact always has exactly one claim at construction");
            let visible = puzzle.visible_claims(claim_id);
            if visible.iter().all(|&c| puzzle.claim_ref(c).is_false()) {
                // Every visible claim was already eliminated by an earlier
                // Init's cascade; this Init has nothing left to account
                // for. Move on to the next unprocessed one.
                continue;
            }

            let (x, y, z) = (
                puzzle.claim_ref(claim_id).x(),
                puzzle.claim_ref(claim_id).y(),
                puzzle.claim_ref(claim_id).z(),
            );
            let mut event = SolutionEvent::new(format!("Initialization({x},{y},{z})"));
            for c in visible {
                puzzle.falsify(c, &mut event)?;
            }
            return Ok(Some(event.finish()?));
        }
    }
}
