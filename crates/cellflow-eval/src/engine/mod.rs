//! Cellflow reactive engine
//!
//! Input cells, compute cells derived from them, and change callbacks, kept
//! consistent by incremental propagation.

pub mod callbacks;
pub mod eval;
mod graph;
mod scheduler;
mod vertex;

#[cfg(test)]
mod tests;

pub use callbacks::Canceler;
pub use cellflow_common::{
    CallbackId, CellId, ComputeCellId, InputCellId, ReactorError, ReactorId,
};
pub use eval::{PropagationSummary, Reactor};

/// How a changed input is pushed through its dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationStrategy {
    /// One pass in creation order; each affected cell is evaluated once.
    #[default]
    Ordered,
    /// Sweep the affected cells until nothing changes. Evaluates more, but
    /// does not rely on creation order.
    ///
    /// Intermediate sweeps can hand a compute function a mix of updated and
    /// not-yet-updated arguments, a combination `Ordered` never produces. Under
    /// this strategy compute functions must be total over any combination of
    /// argument values, not only over consistent ones (e.g. use
    /// `checked_div` rather than `/` when a divisor is derived upstream).
    Relaxation,
}

/// Configuration for a [`Reactor`]
#[derive(Debug, Clone)]
pub struct ReactorConfig {
    pub strategy: PropagationStrategy,
    /// Cells to reserve room for up front, per cell kind.
    pub cell_capacity: usize,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            strategy: PropagationStrategy::Ordered,
            cell_capacity: 0,
        }
    }
}

impl ReactorConfig {
    pub fn with_strategy(mut self, strategy: PropagationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cell_capacity(mut self, capacity: usize) -> Self {
        self.cell_capacity = capacity;
        self
    }
}

/// Construct a new reactor with the given configuration
pub fn new_reactor<'a, T>(config: ReactorConfig) -> Reactor<'a, T>
where
    T: Copy + PartialEq,
{
    Reactor::with_config(config)
}
