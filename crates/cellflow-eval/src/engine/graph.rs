use cellflow_common::{CellId, ComputeCellId, InputCellId, ReactorError, ReactorId};
use smallvec::SmallVec;

use super::vertex::{ComputeCell, ComputeFn, InputCell, add_dependent};

/// Arena holding every cell of one reactor.
///
/// Compute cells are appended in creation order and may only reference cells
/// that already exist, so for any compute cell at index `i` every upstream
/// compute cell has an index below `i`. The scheduler depends on this.
///
/// Handles stamped with a different [`ReactorId`] than `owner` never resolve.
pub(crate) struct CellGraph<'a, T> {
    owner: ReactorId,
    inputs: Vec<InputCell<T>>,
    computes: Vec<ComputeCell<'a, T>>,
}

impl<T> CellGraph<'_, T> {
    pub fn owner(&self) -> ReactorId {
        self.owner
    }
}

impl<'a, T: Copy + PartialEq> CellGraph<'a, T> {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::with_capacity(ReactorId::next(), 0)
    }

    pub fn with_capacity(owner: ReactorId, capacity: usize) -> Self {
        Self {
            owner,
            inputs: Vec::with_capacity(capacity),
            computes: Vec::with_capacity(capacity),
        }
    }

    pub fn add_input(&mut self, value: T) -> InputCellId {
        let id = InputCellId::new(self.owner, self.inputs.len());
        self.inputs.push(InputCell::new(value));
        id
    }

    /// Create a compute cell, computing its first value from the current
    /// values of `dependencies`.
    pub fn add_compute(
        &mut self,
        dependencies: &[CellId],
        compute: ComputeFn<'a, T>,
    ) -> Result<ComputeCellId, ReactorError> {
        if dependencies.is_empty() {
            return Err(ReactorError::NoDependencies);
        }
        if let Some(&missing) = dependencies.iter().find(|&&dep| !self.contains(dep)) {
            return Err(ReactorError::NonexistentCell(missing));
        }

        let args = self.gather(dependencies);
        let value = compute(&args[..]);

        let id = ComputeCellId::new(self.owner, self.computes.len());
        self.computes
            .push(ComputeCell::new(value, dependencies, compute));
        self.add_dependent_edges(id, dependencies);
        Ok(id)
    }

    pub fn contains(&self, id: CellId) -> bool {
        match id {
            CellId::Input(input) => self.input(input).is_some(),
            CellId::Compute(compute) => self.compute(compute).is_some(),
        }
    }

    pub fn value(&self, id: CellId) -> Option<T> {
        match id {
            CellId::Input(input) => self.input(input).map(|c| c.value),
            CellId::Compute(compute) => self.compute(compute).map(|c| c.value),
        }
    }

    /// Overwrite an input's value. Returns the previous value.
    pub fn replace_input(&mut self, id: InputCellId, value: T) -> Result<T, ReactorError> {
        if id.reactor() != self.owner {
            return Err(ReactorError::NonexistentCell(id.into()));
        }
        let cell = self
            .inputs
            .get_mut(id.index())
            .ok_or(ReactorError::NonexistentCell(id.into()))?;
        Ok(std::mem::replace(&mut cell.value, value))
    }

    /// Re-run a compute cell's function against the current upstream values
    /// and store the result. Returns `(old, new)`.
    pub fn recompute(&mut self, id: ComputeCellId) -> (T, T) {
        let cell = &self.computes[id.index()];
        let args = self.gather(&cell.dependencies);
        let new = (cell.compute)(&args[..]);

        let cell = &mut self.computes[id.index()];
        let old = std::mem::replace(&mut cell.value, new);
        (old, new)
    }

    pub fn dependents(&self, id: CellId) -> Option<&[ComputeCellId]> {
        match id {
            CellId::Input(input) => self.input(input).map(|c| &c.dependents[..]),
            CellId::Compute(compute) => self.compute(compute).map(|c| &c.dependents[..]),
        }
    }

    pub fn dependencies(&self, id: ComputeCellId) -> Option<&[CellId]> {
        self.compute(id).map(|c| &c.dependencies[..])
    }

    pub fn compute(&self, id: ComputeCellId) -> Option<&ComputeCell<'a, T>> {
        if id.reactor() != self.owner {
            return None;
        }
        self.computes.get(id.index())
    }

    pub fn compute_mut(&mut self, id: ComputeCellId) -> Option<&mut ComputeCell<'a, T>> {
        if id.reactor() != self.owner {
            return None;
        }
        self.computes.get_mut(id.index())
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn compute_count(&self) -> usize {
        self.computes.len()
    }

    // Helper methods

    fn input(&self, id: InputCellId) -> Option<&InputCell<T>> {
        if id.reactor() != self.owner {
            return None;
        }
        self.inputs.get(id.index())
    }

    /// Current values of `cells`, in order. All cells must exist.
    fn gather(&self, cells: &[CellId]) -> SmallVec<[T; 4]> {
        cells
            .iter()
            .map(|&dep| match dep {
                CellId::Input(input) => self.inputs[input.index()].value,
                CellId::Compute(compute) => self.computes[compute.index()].value,
            })
            .collect()
    }

    fn add_dependent_edges(&mut self, dependent: ComputeCellId, dependencies: &[CellId]) {
        for &dep in dependencies {
            match dep {
                CellId::Input(input) => {
                    add_dependent(&mut self.inputs[input.index()].dependents, dependent)
                }
                CellId::Compute(compute) => {
                    add_dependent(&mut self.computes[compute.index()].dependents, dependent)
                }
            }
        }
    }
}
