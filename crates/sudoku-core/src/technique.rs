//! §4.G: the `Technique` trait and the fixed-point driver loop.

use crate::config::CancellationToken;
use crate::error::SolverError;
use crate::event::FalsifiedTime;
use crate::puzzle::Puzzle;

/// A deductive step the driver can invoke. Stateless modulo the puzzle
/// itself -- implementations may keep small cursors (e.g. `Initializer`'s
/// already-processed set) but must never memoize anything about the
/// puzzle's claim/fact contents between calls.
pub trait Technique {
    /// Name used in tracing spans and driver bookkeeping.
    fn name(&self) -> &'static str;

    /// Produce exactly one root event if the technique finds progress, or
    /// `None` if it found nothing this call.
    fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError>;

    /// Convenience wrapper: `true` iff `process` produced an event.
    fn digest(&mut self, puzzle: &mut Puzzle) -> Result<bool, SolverError> {
        Ok(self.process(puzzle)?.is_some())
    }
}

/// Runs a prioritized list of techniques to a fixed point: whenever a
/// technique reports progress, restart from index 0 so cheap techniques
/// always get first refusal at newly opened opportunities.
pub struct Driver {
    techniques: Vec<Box<dyn Technique>>,
    cancellation: CancellationToken,
    steps: Vec<usize>,
}

impl Driver {
    pub fn new(techniques: Vec<Box<dyn Technique>>) -> Self {
        Driver::with_cancellation(techniques, CancellationToken::new())
    }

    pub fn with_cancellation(techniques: Vec<Box<dyn Technique>>, cancellation: CancellationToken) -> Self {
        let steps = vec![0; techniques.len()];
        Driver {
            techniques,
            cancellation,
            steps,
        }
    }

    /// Run every technique to a fixed point, returning the causal event
    /// roots produced, in the order they were emitted.
    ///
    /// Halts early with [`SolverError::Unsatisfiable`] the moment any fact
    /// empties out; the puzzle is left poisoned (see
    /// [`Puzzle::poisoned`]) and the caller can inspect `puzzle` and the
    /// last returned root for diagnosis.
    pub fn solve(&mut self, puzzle: &mut Puzzle) -> Result<Vec<FalsifiedTime>, SolverError> {
        let mut roots = Vec::new();
        self.steps = vec![0; self.techniques.len()];
        let mut i = 0;
        while i < self.techniques.len() {
            if self.cancellation.is_cancelled() {
                tracing::info!("driver cancelled");
                break;
            }
            self.steps[i] += 1;
            let name = self.techniques[i].name();
            let span = tracing::debug_span!("technique", name, index = i);
            let _enter = span.enter();
            match self.techniques[i].process(puzzle) {
                Ok(Some(event)) => {
                    tracing::debug!(falsified = event.deep_false(), "progress");
                    roots.push(event);
                    i = 0;
                }
                Ok(None) => {
                    i += 1;
                }
                Err(err @ SolverError::Unsatisfiable(fact_id)) => {
                    tracing::warn!(?fact_id, "puzzle unsatisfiable");
                    return Err(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(roots)
    }

    /// Step count spent in technique `index` during the last [`Self::solve`] call.
    pub fn steps_for(&self, index: usize) -> usize {
        self.steps.get(index).copied().unwrap_or(0)
    }

    pub fn technique_count(&self) -> usize {
        self.techniques.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SolutionEvent;

    struct OnceThenDone {
        fired: bool,
    }

    impl Technique for OnceThenDone {
        fn name(&self) -> &'static str {
            "OnceThenDone"
        }

        fn process(&mut self, puzzle: &mut Puzzle) -> Result<Option<FalsifiedTime>, SolverError> {
            if self.fired {
                return Ok(None);
            }
            self.fired = true;
            let claim = puzzle.claim(0, 0, 0);
            let mut event = SolutionEvent::new("test");
            puzzle.falsify(claim, &mut event)?;
            Ok(Some(event.finish()?))
        }
    }

    #[test]
    fn driver_terminates_and_restarts_on_progress() {
        let mut puzzle = Puzzle::new(2, &[0; 16]).unwrap();
        let mut driver = Driver::new(vec![Box::new(OnceThenDone { fired: false })]);
        let roots = driver.solve(&mut puzzle).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(driver.steps_for(0), 2); // fires once, then one more None to terminate
    }

    #[test]
    fn cancellation_stops_before_any_technique_runs() {
        let mut puzzle = Puzzle::new(2, &[0; 16]).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let mut driver = Driver::with_cancellation(vec![Box::new(OnceThenDone { fired: false })], token);
        let roots = driver.solve(&mut puzzle).unwrap();
        assert!(roots.is_empty());
    }
}
