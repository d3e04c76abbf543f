//! Meta crate that re-exports the Cellflow building blocks with sensible
//! defaults. Downstream users can depend on this crate and opt into specific
//! layers via feature flags while keeping access to the underlying crates.
//!
//! ```
//! use cellflow::Reactor;
//! use std::cell::Cell;
//!
//! let last = Cell::new(None);
//! let mut reactor = Reactor::new();
//! let a = reactor.create_input(1);
//! let b = reactor.create_input(2);
//! let c = reactor.create_compute2(a, b, |x, y| x + y).unwrap();
//! let d = reactor.create_compute1(c, |v| v * 2).unwrap();
//! let canceler = reactor.add_callback(d, |v| last.set(Some(v))).unwrap();
//!
//! reactor.set_value(a, 3).unwrap();
//! assert_eq!(reactor.value(d), Some(10));
//! assert_eq!(last.get(), Some(10));
//!
//! canceler.cancel(&mut reactor);
//! reactor.set_value(a, 4).unwrap();
//! assert_eq!(last.get(), Some(10));
//! ```

#[cfg(feature = "common")]
pub use cellflow_common as common;

#[cfg(feature = "eval")]
pub use cellflow_eval as eval;

#[cfg(feature = "common")]
pub use cellflow_common::{
    CallbackId, CellId, ComputeCellId, InputCellId, ReactorError, ReactorId,
};

#[cfg(feature = "eval")]
pub use cellflow_eval::{
    Canceler, PropagationStrategy, PropagationSummary, Reactor, ReactorConfig, new_reactor,
};
