//! Replay-latest state cells.
//!
//! A [`StateCell`] holds one value owned by the store. Observers get a
//! read-only [`StateStream`] that yields the value current at subscription
//! time and then each later value. Intermediate values an observer was too
//! slow to see are conflated into the latest; there is no backlog.

use tokio::sync::watch;

/// Single-writer state slot backed by a `watch` channel.
#[derive(Debug)]
pub(crate) struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T> StateCell<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the value. Succeeds with zero subscribers.
    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub(crate) fn subscribe(&self) -> StateStream<T> {
        StateStream {
            rx: self.tx.subscribe(),
            primed: false,
        }
    }
}

impl<T: Clone> StateCell<T> {
    pub(crate) fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// Read-only view of a store state slot.
#[derive(Debug, Clone)]
pub struct StateStream<T> {
    rx: watch::Receiver<T>,
    primed: bool,
}

impl<T: Clone> StateStream<T> {
    /// The value right now, without consuming a change notification.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Next value to render.
    ///
    /// The first call returns the current value immediately; later calls wait
    /// for a change. Returns `None` once the owning store is gone.
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the value satisfies `predicate` and return it.
    ///
    /// Returns `None` if the store is dropped first.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.primed = true;
        let value = self.rx.wait_for(predicate).await.ok()?;
        Some((*value).clone())
    }
}
