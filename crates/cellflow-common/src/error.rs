//! Errors surfaced by the reactor's handle-based API.
//!
//! Every operation on well-formed handles is total. These variants only
//! appear when a caller passes a handle the reactor never issued, asks to
//! remove a callback that is not registered, or builds a compute cell with no
//! inputs.

use thiserror::Error;

use crate::{CallbackId, CellId, ComputeCellId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ReactorError {
    /// The handle does not name a cell in this reactor, either because it is
    /// out of range or because another reactor issued it.
    #[error("cell {0} does not exist")]
    NonexistentCell(CellId),

    /// No callback with this token is registered on the cell.
    #[error("{callback} is not registered on {cell}")]
    NonexistentCallback {
        cell: ComputeCellId,
        callback: CallbackId,
    },

    /// A compute cell needs at least one upstream cell.
    #[error("compute cell requires at least one dependency")]
    NoDependencies,
}

impl ReactorError {
    /// The offending cell, if the error is about one.
    pub fn cell(&self) -> Option<CellId> {
        match self {
            ReactorError::NonexistentCell(cell) => Some(*cell),
            ReactorError::NonexistentCallback { cell, .. } => Some(CellId::Compute(*cell)),
            ReactorError::NoDependencies => None,
        }
    }
}
