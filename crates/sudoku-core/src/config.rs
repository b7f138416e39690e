//! Ambient configuration: the default technique pipeline, a per-technique
//! step budget (via [`Driver::steps_for`](crate::technique::Driver::steps_for)),
//! and a cooperative cancellation token the embedder can trip between
//! technique invocations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::technique::{Driver, Technique};
use crate::techniques::{CellDeath, ColorChain, Initializer, OrganFailure, Sledgehammer, ValueClaim};

/// Cooperative cancellation flag, cloneable so an embedder can hold one
/// end while the solver runs with the other. Checked by the driver
/// between technique invocations only, never mid-technique (§5).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Knobs for building a [`Driver`] with the default technique order.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Upper bound on Sledgehammer's subset size `k` (default 4).
    pub max_sledgehammer_k: usize,
    pub cancellation: CancellationToken,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_sledgehammer_k: 4,
            cancellation: CancellationToken::new(),
        }
    }
}

impl SolverConfig {
    /// Default technique order (§4.G): `Initializer -> OrganFailure ->
    /// CellDeath -> ValueClaim -> Sledgehammer(low-rank) -> ColorChain ->
    /// Sledgehammer(higher-rank)`. Low-rank Sledgehammer is capped at
    /// `k=2` (naked/hidden pairs) so the cheap pair-level eliminations run
    /// before ColorChain; the second Sledgehammer slot covers up to
    /// `max_sledgehammer_k`.
    pub fn build_driver(&self) -> Driver {
        let low_k = self.max_sledgehammer_k.min(2);
        let techniques: Vec<Box<dyn Technique>> = vec![
            Box::new(Initializer::default()),
            Box::new(OrganFailure::default()),
            Box::new(CellDeath::default()),
            Box::new(ValueClaim::default()),
            Box::new(Sledgehammer::new(low_k)),
            Box::new(ColorChain::default()),
            Box::new(Sledgehammer::new(self.max_sledgehammer_k)),
        ];
        Driver::with_cancellation(techniques, self.cancellation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use crate::puzzle::Puzzle;

    #[test]
    fn cancellation_token_reflects_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn default_config_builds_seven_stage_pipeline() {
        let driver = SolverConfig::default().build_driver();
        assert_eq!(driver.technique_count(), 7);
    }

    /// A band-shifted Latin square: `value(x,y) = (m*(y%m) + y/m + x) % side`.
    /// Distinct along every row, column, and box by construction for any
    /// magnitude -- a fully-given puzzle the driver should solve using only
    /// `Initializer`'s cascades (§8 boundary: magnitude 2 and 4).
    fn full_givens(m: usize) -> Vec<usize> {
        let side = m * m;
        let mut values = vec![0usize; side * side];
        for y in 0..side {
            for x in 0..side {
                let z = (m * (y % m) + y / m + x) % side;
                values[y * side + x] = z + 1;
            }
        }
        values
    }

    #[test]
    fn full_givens_solve_at_magnitude_2_3_and_4() {
        for m in [2usize, 3, 4] {
            let values = full_givens(m);
            let mut puzzle = Puzzle::new(m, &values).unwrap();
            let mut driver = SolverConfig::default().build_driver();
            driver.solve(&mut puzzle).unwrap();
            assert!(puzzle.is_solved(), "magnitude {m} should fully solve from an all-givens grid");
        }
    }

    /// Re-running the driver on an already-solved puzzle is a true no-op:
    /// every technique reports no progress and no event root is produced.
    #[test]
    fn idempotent_on_an_already_solved_puzzle() {
        let values = full_givens(3);
        let mut puzzle = Puzzle::new(3, &values).unwrap();
        let mut driver = SolverConfig::default().build_driver();
        let first = driver.solve(&mut puzzle).unwrap();
        assert!(!first.is_empty());
        assert!(puzzle.is_solved());

        let second = driver.solve(&mut puzzle).unwrap();
        assert!(second.is_empty(), "solving an already-solved puzzle again should produce no events");
    }

    /// Boundary: a row with the same given twice is unsatisfiable at both
    /// magnitude 2 and magnitude 4, detected the moment `Initializer`
    /// cascades the first given.
    #[test]
    fn duplicate_given_in_a_row_is_unsatisfiable_at_magnitude_2_and_4() {
        for m in [2usize, 4] {
            let side = m * m;
            let mut values = vec![0usize; side * side];
            values[0] = 1; // (x=0,y=0) = symbol 1
            values[1] = 1; // (x=1,y=0) = symbol 1, same row
            let mut puzzle = Puzzle::new(m, &values).unwrap();
            let mut driver = SolverConfig::default().build_driver();
            let result = driver.solve(&mut puzzle);
            assert!(
                matches!(result, Err(SolverError::Unsatisfiable(_))),
                "magnitude {m} duplicate given should be unsatisfiable"
            );
            assert!(puzzle.poisoned().is_some());
        }
    }
}
