//! Opaque handles into a reactor's cell arena.
//!
//! Every handle records the [`ReactorId`] of the reactor that issued it next
//! to its arena index. A reactor rejects handles stamped with another id, so
//! passing a foreign handle surfaces as
//! [`ReactorError::NonexistentCell`](crate::ReactorError::NonexistentCell)
//! instead of aliasing one of its own cells at the same index.
//!
//! Input and compute handles are distinct types and are not mutually
//! assignable:
//!
//! ```compile_fail
//! use cellflow_common::{ComputeCellId, InputCellId, ReactorId};
//! let compute: ComputeCellId = InputCellId::new(ReactorId::from_raw(1), 0);
//! ```
//!
//! ```compile_fail
//! use cellflow_common::{ComputeCellId, InputCellId, ReactorId};
//! let input: InputCellId = ComputeCellId::new(ReactorId::from_raw(1), 0);
//! ```

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_REACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one reactor.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReactorId(u64);

/// Handle of an input cell (an externally settable leaf).
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputCellId {
    reactor: ReactorId,
    index: usize,
}

/// Handle of a compute cell.
///
/// Compute handles are issued in creation order, so comparing two handles
/// from the same reactor also compares their position in dependency order.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputeCellId {
    reactor: ReactorId,
    index: usize,
}

/// Registration token of a change callback, unique per reactor.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallbackId(u64);

/// Any cell that has a current value.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellId {
    Input(InputCellId),
    Compute(ComputeCellId),
}

impl ReactorId {
    /// A fresh id, distinct from every id handed out before in this process.
    pub fn next() -> Self {
        Self(NEXT_REACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl InputCellId {
    #[inline]
    pub const fn new(reactor: ReactorId, index: usize) -> Self {
        Self { reactor, index }
    }

    #[inline]
    pub const fn reactor(self) -> ReactorId {
        self.reactor
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl ComputeCellId {
    #[inline]
    pub const fn new(reactor: ReactorId, index: usize) -> Self {
        Self { reactor, index }
    }

    #[inline]
    pub const fn reactor(self) -> ReactorId {
        self.reactor
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl CallbackId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl CellId {
    pub fn as_input(self) -> Option<InputCellId> {
        match self {
            CellId::Input(id) => Some(id),
            CellId::Compute(_) => None,
        }
    }

    pub fn as_compute(self) -> Option<ComputeCellId> {
        match self {
            CellId::Compute(id) => Some(id),
            CellId::Input(_) => None,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, CellId::Input(_))
    }

    pub fn reactor(self) -> ReactorId {
        match self {
            CellId::Input(id) => id.reactor(),
            CellId::Compute(id) => id.reactor(),
        }
    }
}

impl From<InputCellId> for CellId {
    fn from(id: InputCellId) -> Self {
        CellId::Input(id)
    }
}

impl From<ComputeCellId> for CellId {
    fn from(id: ComputeCellId) -> Self {
        CellId::Compute(id)
    }
}

impl fmt::Display for ReactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reactor#{}", self.0)
    }
}

impl fmt::Display for InputCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input#{}", self.index)
    }
}

impl fmt::Display for ComputeCellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compute#{}", self.index)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "callback#{}", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellId::Input(id) => fmt::Display::fmt(id, f),
            CellId::Compute(id) => fmt::Display::fmt(id, f),
        }
    }
}
