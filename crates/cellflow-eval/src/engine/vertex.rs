use cellflow_common::{CellId, ComputeCellId};
use smallvec::SmallVec;

use super::callbacks::CallbackTable;

/// Boxed combining function of a compute cell. Receives upstream values in
/// dependency order.
pub(crate) type ComputeFn<'a, T> = Box<dyn Fn(&[T]) -> T + 'a>;

/// Reverse edges: the compute cells that read a given cell.
pub(crate) type Dependents = SmallVec<[ComputeCellId; 4]>;

/// Externally settable leaf.
pub(crate) struct InputCell<T> {
    pub value: T,
    pub dependents: Dependents,
}

impl<T> InputCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            dependents: Dependents::new(),
        }
    }
}

/// Cell derived from one or more upstream cells.
///
/// `dependencies` is fixed at construction; `dependents` only ever grows as
/// later cells subscribe.
pub(crate) struct ComputeCell<'a, T> {
    pub value: T,
    pub dependencies: SmallVec<[CellId; 2]>,
    pub dependents: Dependents,
    pub compute: ComputeFn<'a, T>,
    pub callbacks: CallbackTable<'a, T>,
}

impl<'a, T> ComputeCell<'a, T> {
    pub fn new(value: T, dependencies: &[CellId], compute: ComputeFn<'a, T>) -> Self {
        Self {
            value,
            dependencies: SmallVec::from_slice(dependencies),
            dependents: Dependents::new(),
            compute,
            callbacks: CallbackTable::new(),
        }
    }
}

/// Record `dependent` on `dependents` unless it is already there.
///
/// A compute cell may list the same upstream twice; it still subscribes once.
pub(crate) fn add_dependent(dependents: &mut Dependents, dependent: ComputeCellId) {
    if !dependents.contains(&dependent) {
        dependents.push(dependent);
    }
}
