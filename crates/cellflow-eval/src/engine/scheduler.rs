use std::collections::BTreeSet;

use cellflow_common::{CellId, ComputeCellId, InputCellId};
use rustc_hash::{FxHashMap, FxHashSet};

use super::PropagationStrategy;
use super::graph::CellGraph;

/// Outcome of bringing the graph back to a fixed point.
#[derive(Debug, Default)]
pub(crate) struct Pass {
    /// Compute cells whose settled value differs from their value before the
    /// pass, ascending.
    pub changed: Vec<ComputeCellId>,
    /// Number of compute function evaluations.
    pub recomputed: usize,
}

pub(crate) struct Scheduler {
    strategy: PropagationStrategy,
}

impl Scheduler {
    pub fn new(strategy: PropagationStrategy) -> Self {
        Self { strategy }
    }

    /// Propagate a change of `source` through its transitive dependents.
    /// The input's new value must already be stored.
    pub fn propagate<T: Copy + PartialEq>(
        &self,
        graph: &mut CellGraph<'_, T>,
        source: InputCellId,
    ) -> Pass {
        match self.strategy {
            PropagationStrategy::Ordered => Self::ordered(graph, source),
            PropagationStrategy::Relaxation => Self::relaxation(graph, source),
        }
    }

    /// Single pass in arena order.
    ///
    /// Dependents always sit at a higher index than the cells they read, so
    /// popping the lowest pending index guarantees every upstream has already
    /// settled. Nothing is ever inserted at or below the cell being processed,
    /// which bounds each cell to one evaluation.
    fn ordered<T: Copy + PartialEq>(graph: &mut CellGraph<'_, T>, source: InputCellId) -> Pass {
        let mut pass = Pass::default();
        let mut pending: BTreeSet<ComputeCellId> = graph
            .dependents(source.into())
            .map(|deps| deps.iter().copied().collect())
            .unwrap_or_default();

        while let Some(id) = pending.pop_first() {
            let (old, new) = graph.recompute(id);
            pass.recomputed += 1;

            #[cfg(feature = "tracing")]
            tracing::trace!(cell = %id, changed = (old != new), "recomputed");

            if old != new {
                pass.changed.push(id);
                if let Some(deps) = graph.dependents(id.into()) {
                    pending.extend(deps.iter().copied());
                }
            }
        }

        pass
    }

    /// Sweep the affected region repeatedly until a sweep changes nothing.
    ///
    /// Cells are visited in discovery order, which need not respect
    /// dependency order; intermediate values may be stale, but the final
    /// sweep only stops once every cell matches its upstreams.
    fn relaxation<T: Copy + PartialEq>(
        graph: &mut CellGraph<'_, T>,
        source: InputCellId,
    ) -> Pass {
        let region = Self::affected_region(graph, source.into());
        let before: FxHashMap<ComputeCellId, T> = region
            .iter()
            .filter_map(|&id| graph.value(id.into()).map(|v| (id, v)))
            .collect();

        let mut pass = Pass::default();
        // An acyclic region settles in at most `depth + 1` sweeps.
        let max_sweeps = region.len() + 1;
        for sweep in 0..max_sweeps {
            let mut dirty = false;
            for &id in &region {
                let (old, new) = graph.recompute(id);
                pass.recomputed += 1;
                dirty |= old != new;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(sweep, dirty, "relaxation sweep");

            if !dirty {
                break;
            }
            debug_assert!(sweep + 1 < max_sweeps, "relaxation did not settle");
        }

        pass.changed = region
            .into_iter()
            .filter(|id| graph.value((*id).into()) != before.get(id).copied())
            .collect();
        pass.changed.sort_unstable();
        pass
    }

    /// Every compute cell transitively reachable from `start`, in
    /// breadth-first discovery order.
    fn affected_region<T: Copy + PartialEq>(
        graph: &CellGraph<'_, T>,
        start: CellId,
    ) -> Vec<ComputeCellId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for cell in frontier {
                for &dep in graph.dependents(cell).unwrap_or_default() {
                    if seen.insert(dep) {
                        order.push(dep);
                        next.push(dep.into());
                    }
                }
            }
            frontier = next;
        }

        order
    }
}
