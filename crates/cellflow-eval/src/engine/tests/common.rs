//! Common test helpers
use std::cell::RefCell;

/// Records every value a callback is invoked with.
#[derive(Default)]
pub struct CallbackRecorder {
    values: RefCell<Vec<i64>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends to this recorder.
    pub fn callback(&self) -> impl FnMut(i64) + '_ {
        move |v| self.values.borrow_mut().push(v)
    }

    /// Assert exactly one invocation since the last check, with `expected`.
    pub fn expect_one(&self, expected: i64) {
        let values = self.values.take();
        assert_eq!(values, vec![expected], "expected a single callback");
    }

    /// Assert no invocation since the last check.
    pub fn expect_none(&self) {
        let values = self.values.take();
        assert!(values.is_empty(), "unexpected callbacks: {values:?}");
    }
}
