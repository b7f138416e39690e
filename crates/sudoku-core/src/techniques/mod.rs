//! Concrete [`crate::technique::Technique`] implementations, in the
//! default pipeline order (§4.G).

mod cell_death;
mod colorchain;
mod initializer;
mod organ_failure;
mod sledgehammer;
mod value_claim;

pub use cell_death::CellDeath;
pub use colorchain::ColorChain;
pub use initializer::Initializer;
pub use organ_failure::OrganFailure;
pub use sledgehammer::Sledgehammer;
pub use value_claim::ValueClaim;

use crate::error::SolverError;
use crate::event::{FalsifiedTime, SolutionEvent};
use crate::fact::{Fact, FactId};
use crate::puzzle::Puzzle;

/// Shared scan-and-revalidate shape for `OrganFailure` and `ValueClaim`:
/// walk facts matching `matches` in id order, re-run
/// [`Puzzle::revalidate`] on each, and return the first call that
/// actually accounted for something new. `Puzzle::revalidate` is
/// idempotent, so this is a pure safety net against cascades that somehow
/// didn't fully resolve eagerly -- in practice it almost always finds
/// nothing, since `Puzzle::falsify` already cascades every size-1 fact
/// the instant it appears.
pub(crate) fn scan_revalidate(
    puzzle: &mut Puzzle,
    label: &str,
    matches: impl Fn(&Fact) -> bool,
) -> Result<Option<FalsifiedTime>, SolverError> {
    let candidates: Vec<FactId> = puzzle.facts().filter(|f| matches(f)).map(|f| f.id()).collect();
    for fact_id in candidates {
        let mut event = SolutionEvent::new(label.to_string());
        puzzle.revalidate(fact_id, &mut event)?;
        match event.finish() {
            Ok(tree) => return Ok(Some(tree)),
            Err(SolverError::NoUnaccountedClaims) => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}
