//! Per-operation loading and error flags.

use std::fmt;

use super::stream::{StateCell, StateStream};

/// Logical store operations that carry their own status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetching the full product list.
    List,
    /// Fetching one product for the detail view.
    Detail,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Detail => "detail",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub(crate) struct OperationStatus {
    loading: StateCell<bool>,
    error: StateCell<Option<String>>,
}

impl OperationStatus {
    pub(crate) fn new() -> Self {
        Self {
            loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    /// Clear the error, raise the loading flag, and return a guard that
    /// lowers it again when dropped (including on early return or unwind).
    pub(crate) fn begin(&self) -> LoadingGuard<'_> {
        self.error.set(None);
        self.loading.set(true);
        LoadingGuard {
            loading: &self.loading,
        }
    }

    pub(crate) fn fail(&self, message: String) {
        self.error.set(Some(message));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub(crate) fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub(crate) fn watch_loading(&self) -> StateStream<bool> {
        self.loading.subscribe()
    }

    pub(crate) fn watch_error(&self) -> StateStream<Option<String>> {
        self.error.subscribe()
    }
}

pub(crate) struct LoadingGuard<'a> {
    loading: &'a StateCell<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.set(false);
    }
}
