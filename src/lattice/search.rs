//! Bounded shortest-path search over the coercion graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::{Coercion, DataKind, KindLattice};

/// Outcome of a chain search. `steps` lists only coercion edges; subtype
/// hops along the way are free and leave no trace in the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoercionChain {
    pub found: bool,
    pub steps: Vec<Coercion>,
    pub total_cost: u32,
    /// False if any step is lossy; such a chain is still offered.
    pub safe: bool,
}

impl CoercionChain {
    pub fn not_found() -> Self {
        CoercionChain {
            found: false,
            steps: Vec::new(),
            total_cost: 0,
            safe: true,
        }
    }
}

/// Frontier entry. The ordering is inverted so `BinaryHeap` pops the
/// cheapest state first; ties break on fewer coercion edges, then the
/// lexicographically smallest adapter-id sequence, then kind index, so
/// results are reproducible across runs.
struct State {
    cost: u32,
    steps: Vec<Coercion>,
    kind: DataKind,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.steps.len().cmp(&self.steps.len()))
            .then_with(|| {
                let ours = self.steps.iter().map(|s| s.adapter.as_str());
                let theirs = other.steps.iter().map(|s| s.adapter.as_str());
                theirs.cmp(ours)
            })
            .then_with(|| (other.kind as usize).cmp(&(self.kind as usize)))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Dijkstra over kinds: subtype edges at cost 0 plus coercion edges at
/// their declared cost. The frontier is pruned at `max_cost`, so the
/// search terminates even on a pathological lattice; the first time the
/// target is popped its chain is optimal under the tie-break above.
/// Raising the bound never removes a chain and never raises its cost.
pub fn find_chain(
    lattice: &KindLattice,
    source: DataKind,
    target: DataKind,
    max_cost: u32,
) -> CoercionChain {
    if lattice.is_subtype(source, target) {
        return CoercionChain {
            found: true,
            steps: Vec::new(),
            total_cost: 0,
            safe: true,
        };
    }

    let mut settled = vec![false; DataKind::ALL.len()];
    let mut frontier = BinaryHeap::new();
    frontier.push(State {
        cost: 0,
        steps: Vec::new(),
        kind: source,
    });

    while let Some(state) = frontier.pop() {
        if state.kind == target {
            let safe = state.steps.iter().all(|s| s.safe);
            return CoercionChain {
                found: true,
                total_cost: state.cost,
                steps: state.steps,
                safe,
            };
        }
        if settled[state.kind as usize] {
            continue;
        }
        settled[state.kind as usize] = true;

        for parent in lattice.direct_supertypes(state.kind) {
            if !settled[parent as usize] {
                frontier.push(State {
                    cost: state.cost,
                    steps: state.steps.clone(),
                    kind: parent,
                });
            }
        }
        for coercion in lattice.coercions_from(state.kind) {
            let cost = state.cost + coercion.cost;
            if cost > max_cost || settled[coercion.to as usize] {
                continue;
            }
            let mut steps = state.steps.clone();
            steps.push(coercion.clone());
            frontier.push(State {
                cost,
                steps,
                kind: coercion.to,
            });
        }
    }

    CoercionChain::not_found()
}
