//! Change callbacks and their cancellation handles.
//!
//! Each compute cell owns a [`CallbackTable`] keyed by [`CallbackId`]. Tokens
//! come from the owning reactor's counter and are never reissued, so a
//! cancelled token cannot later match a different registration.

use std::collections::BTreeMap;

use cellflow_common::{CallbackId, ComputeCellId, ReactorId};

use super::eval::Reactor;

type Callback<'a, T> = Box<dyn FnMut(T) + 'a>;

/// Registered callbacks of one compute cell, ordered by token (and so by
/// registration).
pub(crate) struct CallbackTable<'a, T> {
    entries: BTreeMap<CallbackId, Callback<'a, T>>,
}

impl<'a, T> CallbackTable<'a, T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: CallbackId, callback: Callback<'a, T>) {
        self.entries.insert(id, callback);
    }

    pub fn remove(&mut self, id: CallbackId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: Copy> CallbackTable<'_, T> {
    /// Invoke every callback with `value`. Returns how many ran.
    pub fn fire(&mut self, value: T) -> usize {
        for callback in self.entries.values_mut() {
            callback(value);
        }
        self.entries.len()
    }
}

/// Revokes one callback registration.
///
/// A canceler is bound to the reactor that issued it through the
/// [`ReactorId`] stamped into its cell handle; any other reactor treats it as
/// unknown. Cancelling is idempotent: once the registration is gone, further
/// calls do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Canceler {
    cell: ComputeCellId,
    callback: CallbackId,
}

impl Canceler {
    pub(crate) fn new(cell: ComputeCellId, callback: CallbackId) -> Self {
        Self { cell, callback }
    }

    pub fn cell(&self) -> ComputeCellId {
        self.cell
    }

    pub fn reactor(&self) -> ReactorId {
        self.cell.reactor()
    }

    pub fn callback_id(&self) -> CallbackId {
        self.callback
    }

    /// Remove the registration. Returns `true` if this call removed it, and
    /// `false` when `reactor` is not the one that issued this canceler.
    pub fn cancel<T: Copy + PartialEq>(&self, reactor: &mut Reactor<'_, T>) -> bool {
        reactor.remove_callback(self.cell, self.callback).is_ok()
    }
}
