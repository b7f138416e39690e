//! `CellDeath`: a cell with no surviving candidate. The narrowest,
//! cheapest `Unsatisfiable` trip wire, scanned before the broader check
//! implicit in every `Puzzle::falsify` call.

use crate::error::SolverError;
use crate::event::FalsifiedTime;
use crate::fact::RuleType;
use crate::puzzle::Puzzle;
use crate::technique::Technique;

#[derive(Debug, Default)]
pub struct CellDeath;

impl Technique for CellDeath {
    fn name(&self) -> &'static str {
        "CellDeath"
    }

    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
        if let Some(fact_id) = puzzle
            .facts()
            .find(|f| f.rule() == RuleType::Cell && f.is_empty())
            .map(|f| f.id())
        {
            return Err(SolverError::Unsatisfiable(fact_id));
        }
        Ok(None)
    }
}
