use cellflow_common::{CallbackId, CellId, ComputeCellId, InputCellId, ReactorError, ReactorId};

use super::callbacks::Canceler;
use super::graph::CellGraph;
use super::scheduler::Scheduler;
use super::ReactorConfig;

/// Owner of one reactive cell graph.
///
/// Cells are addressed by the handles returned from the `create_*` methods.
/// Compute functions and callbacks may borrow from the caller's scope for
/// `'a`. All mutation goes through `&mut self`, so a callback can never
/// re-enter [`set_value`](Reactor::set_value) while a propagation is running.
///
/// ```
/// use cellflow_eval::engine::Reactor;
///
/// let mut reactor = Reactor::new();
/// let a = reactor.create_input(1);
/// let b = reactor.create_compute1(a, |v| v + 1).unwrap();
/// assert_eq!(reactor.value(b), Some(2));
///
/// reactor.set_value(a, 3).unwrap();
/// assert_eq!(reactor.value(b), Some(4));
/// ```
///
/// Handles of the two cell kinds do not mix:
///
/// ```compile_fail
/// let mut reactor = cellflow_eval::engine::Reactor::new();
/// let input: cellflow_eval::engine::ComputeCellId = reactor.create_input(111);
/// ```
///
/// ```compile_fail
/// let mut reactor = cellflow_eval::engine::Reactor::new();
/// let input = reactor.create_input(111);
/// let compute: cellflow_eval::engine::InputCellId =
///     reactor.create_compute1(input, |v| v).unwrap();
/// ```
pub struct Reactor<'a, T = i64> {
    graph: CellGraph<'a, T>,
    config: ReactorConfig,
    next_callback_id: u64,
}

/// What a single [`Reactor::set_value`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationSummary {
    pub input: InputCellId,
    /// Number of compute function evaluations.
    pub recomputed: usize,
    /// Compute cells whose value changed, ascending.
    pub changed: Vec<ComputeCellId>,
    pub callbacks_fired: usize,
    /// The input already held the value it was set to.
    pub unchanged_input: bool,
}

impl PropagationSummary {
    fn noop(input: InputCellId) -> Self {
        Self {
            input,
            recomputed: 0,
            changed: Vec::new(),
            callbacks_fired: 0,
            unchanged_input: true,
        }
    }

    /// True when the input was set to the value it already held.
    ///
    /// A real change to an input with no dependents also recomputes nothing,
    /// but is not a no-op.
    pub fn is_noop(&self) -> bool {
        self.unchanged_input
    }
}

impl<'a, T: Copy + PartialEq> Default for Reactor<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Copy + PartialEq> Reactor<'a, T> {
    pub fn new() -> Self {
        Self::with_config(ReactorConfig::default())
    }

    pub fn with_config(config: ReactorConfig) -> Self {
        Self {
            graph: CellGraph::with_capacity(ReactorId::next(), config.cell_capacity),
            config,
            next_callback_id: 0,
        }
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// Identity stamped into every handle this reactor issues.
    pub fn id(&self) -> ReactorId {
        self.graph.owner()
    }

    /// Create an input cell holding `initial`.
    pub fn create_input(&mut self, initial: T) -> InputCellId {
        let id = self.graph.add_input(initial);
        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %id, "created input cell");
        id
    }

    /// Create a compute cell over any number of upstream cells.
    ///
    /// `compute` receives the upstream values in the order of
    /// `dependencies` and runs once immediately to seed the cell's value.
    /// Every dependency must already exist in this reactor.
    pub fn create_compute<F>(
        &mut self,
        dependencies: &[CellId],
        compute: F,
    ) -> Result<ComputeCellId, ReactorError>
    where
        F: Fn(&[T]) -> T + 'a,
    {
        let id = self.graph.add_compute(dependencies, Box::new(compute))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %id, dependencies = dependencies.len(), "created compute cell");
        Ok(id)
    }

    /// Create a compute cell reading a single upstream cell.
    pub fn create_compute1<F>(
        &mut self,
        dependency: impl Into<CellId>,
        compute: F,
    ) -> Result<ComputeCellId, ReactorError>
    where
        F: Fn(T) -> T + 'a,
    {
        self.create_compute(&[dependency.into()], move |values: &[T]| {
            compute(values[0])
        })
    }

    /// Create a compute cell combining two upstream cells.
    pub fn create_compute2<F>(
        &mut self,
        first: impl Into<CellId>,
        second: impl Into<CellId>,
        compute: F,
    ) -> Result<ComputeCellId, ReactorError>
    where
        F: Fn(T, T) -> T + 'a,
    {
        self.create_compute(&[first.into(), second.into()], move |values: &[T]| {
            compute(values[0], values[1])
        })
    }

    /// Current value of a cell, or `None` if this reactor never issued the
    /// handle. Never recomputes.
    pub fn value(&self, id: impl Into<CellId>) -> Option<T> {
        self.graph.value(id.into())
    }

    /// Set an input cell and bring every dependent back to a fixed point.
    ///
    /// Setting the current value again is a no-op. Otherwise all affected
    /// compute cells are recomputed, and once the graph has settled each
    /// cell whose value changed fires its callbacks exactly once with the
    /// final value.
    ///
    /// A compute function that panics aborts the call and leaves the graph
    /// partially propagated.
    pub fn set_value(
        &mut self,
        id: InputCellId,
        value: T,
    ) -> Result<PropagationSummary, ReactorError> {
        let previous = self.graph.replace_input(id, value)?;
        if previous == value {
            return Ok(PropagationSummary::noop(id));
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("propagate", input = %id, strategy = ?self.config.strategy)
            .entered();

        let pass = Scheduler::new(self.config.strategy).propagate(&mut self.graph, id);

        let mut callbacks_fired = 0;
        for &cell in &pass.changed {
            if let Some(compute) = self.graph.compute_mut(cell) {
                callbacks_fired += compute.callbacks.fire(compute.value);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            recomputed = pass.recomputed,
            changed = pass.changed.len(),
            callbacks_fired,
            "propagation settled"
        );

        Ok(PropagationSummary {
            input: id,
            recomputed: pass.recomputed,
            changed: pass.changed,
            callbacks_fired,
            unchanged_input: false,
        })
    }

    /// Register `callback` to run with the new value whenever `cell`'s value
    /// changes. It is not invoked on registration.
    pub fn add_callback<F>(
        &mut self,
        cell: ComputeCellId,
        callback: F,
    ) -> Result<Canceler, ReactorError>
    where
        F: FnMut(T) + 'a,
    {
        let compute = self
            .graph
            .compute_mut(cell)
            .ok_or(ReactorError::NonexistentCell(cell.into()))?;

        let token = CallbackId::from_raw(self.next_callback_id);
        self.next_callback_id += 1;
        compute.callbacks.insert(token, Box::new(callback));

        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %cell, callback = %token, "registered callback");
        Ok(Canceler::new(cell, token))
    }

    /// Remove a callback registration.
    ///
    /// Unlike [`Canceler::cancel`], this reports a missing cell or callback
    /// as an error.
    pub fn remove_callback(
        &mut self,
        cell: ComputeCellId,
        callback: CallbackId,
    ) -> Result<(), ReactorError> {
        let compute = self
            .graph
            .compute_mut(cell)
            .ok_or(ReactorError::NonexistentCell(cell.into()))?;

        if !compute.callbacks.remove(callback) {
            return Err(ReactorError::NonexistentCallback { cell, callback });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(cell = %cell, callback = %callback, "cancelled callback");
        Ok(())
    }

    /// Upstream cells of a compute cell, in argument order.
    pub fn dependencies(&self, cell: ComputeCellId) -> Option<&[CellId]> {
        self.graph.dependencies(cell)
    }

    /// Compute cells that read `cell` directly.
    pub fn dependents(&self, cell: impl Into<CellId>) -> Option<&[ComputeCellId]> {
        self.graph.dependents(cell.into())
    }

    pub fn callback_count(&self, cell: ComputeCellId) -> Option<usize> {
        self.graph.compute(cell).map(|c| c.callbacks.len())
    }

    pub fn input_count(&self) -> usize {
        self.graph.input_count()
    }

    pub fn compute_count(&self) -> usize {
        self.graph.compute_count()
    }
}

impl<T> std::fmt::Debug for Reactor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("id", &self.graph.owner())
            .field("config", &self.config)
            .field("next_callback_id", &self.next_callback_id)
            .finish_non_exhaustive()
    }
}
