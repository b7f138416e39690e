//! The causal time tree: [`SolutionEvent`] nodes recording which claims a
//! deduction eliminated, with a builder that lets techniques nest
//! sub-events to explain cascades.

use std::collections::BTreeSet;
use std::fmt;

use crate::claim::ClaimId;
use crate::error::SolverError;

/// One node in the causal event forest.
///
/// `falsified` holds only the claims *this* node accounts for: claims
/// already falsified by an ancestor are deduplicated out at construction
/// time (see [`EventBuilder::finalize_node`]).
#[derive(Debug, Clone)]
pub struct FalsifiedTime {
    label: String,
    falsified: BTreeSet<ClaimId>,
    children: Vec<FalsifiedTime>,
}

impl FalsifiedTime {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn falsified(&self) -> &BTreeSet<ClaimId> {
        &self.falsified
    }

    pub fn children(&self) -> &[FalsifiedTime] {
        &self.children
    }

    /// Sum of every descendant's `falsified` size, breadth-first (this
    /// node's own count is included).
    pub fn deep_false(&self) -> usize {
        let mut total = self.falsified.len();
        let mut queue: std::collections::VecDeque<&FalsifiedTime> =
            self.children.iter().collect();
        while let Some(node) = queue.pop_front() {
            total += node.falsified.len();
            queue.extend(node.children.iter());
        }
        total
    }
}

impl fmt::Display for FalsifiedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queue: std::collections::VecDeque<(&FalsifiedTime, usize)> =
            std::collections::VecDeque::new();
        queue.push_back((self, 0));
        while let Some((node, depth)) = queue.pop_front() {
            writeln!(
                f,
                "{}{} ({} falsified)",
                "  ".repeat(depth),
                node.label,
                node.falsified.len()
            )?;
            for child in &node.children {
                queue.push_back((child, depth + 1));
            }
        }
        Ok(())
    }
}

/// A concrete, root-capable `FalsifiedTime` under construction.
///
/// Maintains a `top`-of-stack pointer into an arena of in-progress nodes
/// so techniques can `push` a sub-event, record falsifications into it,
/// and `pop` back to the parent -- without the tree needing interior
/// mutability or reference counting.
pub struct SolutionEvent {
    nodes: Vec<BuildingNode>,
    top: usize,
}

struct BuildingNode {
    parent: Option<usize>,
    label: String,
    pending: BTreeSet<ClaimId>,
    children: Vec<FalsifiedTime>,
    finalized_falsified: Option<BTreeSet<ClaimId>>,
}

impl SolutionEvent {
    /// Start a new root event. Call [`Self::record`] / [`Self::push`] /
    /// [`Self::pop`] as the technique discovers eliminations, then
    /// [`Self::finish`] once to obtain the finished tree.
    pub fn new(label: impl Into<String>) -> Self {
        SolutionEvent {
            nodes: vec![BuildingNode {
                parent: None,
                label: label.into(),
                pending: BTreeSet::new(),
                children: Vec::new(),
                finalized_falsified: None,
            }],
            top: 0,
        }
    }

    /// Attach a new child node to the current top and make it the new top.
    pub fn push(&mut self, label: impl Into<String>) {
        let idx = self.nodes.len();
        self.nodes.push(BuildingNode {
            parent: Some(self.top),
            label: label.into(),
            pending: BTreeSet::new(),
            children: Vec::new(),
            finalized_falsified: None,
        });
        self.top = idx;
    }

    /// Finalize the current top node and move back to its parent.
    ///
    /// Finalization computes `upFalsified` (the union of every ancestor's
    /// already-finalized `falsified` set) and sets this node's own
    /// `falsified` to `pending \ upFalsified`. An empty result with no
    /// children is [`SolverError::NoUnaccountedClaims`] in debug builds;
    /// release builds log and accept an empty node instead of panicking.
    pub fn pop(&mut self) -> Result<(), SolverError> {
        self.finalize_node(self.top)?;
        let parent = self.nodes[self.top].parent;
        let finished = self.take_finished(self.top);
        let parent_idx = parent.expect("pop() called on the root event; call finish() instead");
        self.nodes[parent_idx].children.push(finished);
        self.top = parent_idx;
        Ok(())
    }

    /// Record that `claim` was newly eliminated by the technique's current
    /// step. Called once per claim transitioning from live to false (see
    /// [`crate::puzzle::Puzzle::falsify_claim`]).
    pub fn record(&mut self, claim: ClaimId) {
        self.nodes[self.top].pending.insert(claim);
    }

    /// Finalize the root and every still-open ancestor, returning the
    /// finished tree.
    pub fn finish(mut self) -> Result<FalsifiedTime, SolverError> {
        while self.top != 0 {
            self.pop()?;
        }
        self.finalize_node(0)?;
        Ok(self.take_finished(0))
    }

    /// Union of every ancestor's *recorded* claims, not their already-
    /// finalized `falsified` sets: an ancestor in this push/pop builder only
    /// finalizes after all of its descendants do (at its own `pop()`, or at
    /// the root's `finish()`), so `finalized_falsified` is still `None` for
    /// every true ancestor at the moment a descendant finalizes. `pending`
    /// is populated as soon as a claim is recorded, regardless of
    /// finalization order, and by induction the union of every ancestor's
    /// `pending` set equals the union of their eventual `falsified` sets --
    /// each claim is "claimed" by the first (topmost) ancestor that
    /// recorded it, so reading the raw `pending` sets up the ancestor chain
    /// dedups identically to reading their finalized `falsified` sets would.
    fn ancestor_falsified(&self, idx: usize) -> BTreeSet<ClaimId> {
        let mut out = BTreeSet::new();
        let mut cursor = self.nodes[idx].parent;
        while let Some(i) = cursor {
            out.extend(self.nodes[i].pending.iter().copied());
            cursor = self.nodes[i].parent;
        }
        out
    }

    fn finalize_node(&mut self, idx: usize) -> Result<(), SolverError> {
        if self.nodes[idx].finalized_falsified.is_some() {
            return Ok(());
        }
        let up = self.ancestor_falsified(idx);
        let node = &self.nodes[idx];
        let new_falsified: BTreeSet<ClaimId> =
            node.pending.difference(&up).copied().collect();
        if new_falsified.is_empty() && node.children.is_empty() {
            #[cfg(debug_assertions)]
            {
                return Err(SolverError::NoUnaccountedClaims);
            }
            #[cfg(not(debug_assertions))]
            {
                tracing::error!(label = %node.label, "event accounted for no new falsified claims");
            }
        }
        self.nodes[idx].finalized_falsified = Some(new_falsified);
        Ok(())
    }

    fn take_finished(&mut self, idx: usize) -> FalsifiedTime {
        let node = &mut self.nodes[idx];
        FalsifiedTime {
            label: std::mem::take(&mut node.label),
            falsified: node.finalized_falsified.clone().unwrap_or_default(),
            children: std::mem::take(&mut node.children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only_records_its_own_claims() {
        let mut ev = SolutionEvent::new("test");
        ev.record(ClaimId(1));
        ev.record(ClaimId(2));
        let tree = ev.finish().unwrap();
        assert_eq!(tree.falsified().len(), 2);
        assert!(tree.children().is_empty());
    }

    #[test]
    fn child_excludes_ancestor_claims() {
        let mut ev = SolutionEvent::new("root");
        ev.record(ClaimId(1));
        ev.push("child");
        ev.record(ClaimId(1)); // already accounted for by root
        ev.record(ClaimId(2));
        ev.pop().unwrap();
        let tree = ev.finish().unwrap();
        assert_eq!(tree.falsified().len(), 1);
        assert_eq!(tree.children()[0].falsified().len(), 1);
        assert!(tree.children()[0].falsified().contains(&ClaimId(2)));
    }

    #[test]
    fn empty_leaf_is_no_unaccounted_claims() {
        let ev = SolutionEvent::new("root");
        let err = ev.finish().unwrap_err();
        assert!(matches!(err, SolverError::NoUnaccountedClaims));
    }

    #[test]
    fn deep_false_sums_descendants() {
        let mut ev = SolutionEvent::new("root");
        ev.record(ClaimId(1));
        ev.push("child");
        ev.record(ClaimId(2));
        ev.record(ClaimId(3));
        ev.pop().unwrap();
        let tree = ev.finish().unwrap();
        assert_eq!(tree.deep_false(), 3);
    }
}
