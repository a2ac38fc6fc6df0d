//! Source collection and its head window, mutated as one unit.
//!
//! # Responsibility
//! - Route every mutation through the source, then feed the resulting event
//!   to the window before returning.
//! - Expose both sides read-only with the same subscription surface.
//!
//! # Invariants
//! - Between two calls, `window == full[..min(capacity, len)]`.
//! - A window that fails to follow an event is rebuilt from the source
//!   before the error is returned. `remove` still hands back the value the
//!   source gave up.

use super::change::{CollectionChange, CollectionError, CollectionResult};
use super::observable::{ObservableCollection, SubscriptionId};
use super::window::WindowView;
use log::{error, warn};

/// Full collection plus a bounded window over its head.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedCollection<T> {
    full: ObservableCollection<T>,
    window: WindowView<T>,
}

impl<T: Clone> WindowedCollection<T> {
    pub fn new(capacity: usize) -> Self {
        Self::from_items(Vec::new(), capacity)
    }

    pub fn from_items(items: Vec<T>, capacity: usize) -> Self {
        let full = ObservableCollection::from(items);
        let window = WindowView::bound_to(&full, capacity);
        Self { full, window }
    }

    pub fn full(&self) -> &ObservableCollection<T> {
        &self.full
    }

    pub fn window(&self) -> &WindowView<T> {
        &self.window
    }

    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    pub fn len(&self) -> usize {
        self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    pub fn subscribe_full(
        &mut self,
        listener: impl FnMut(&CollectionChange<T>) + 'static,
    ) -> SubscriptionId {
        self.full.subscribe(listener)
    }

    pub fn unsubscribe_full(&mut self, id: SubscriptionId) -> bool {
        self.full.unsubscribe(id)
    }

    pub fn subscribe_window(
        &mut self,
        listener: impl FnMut(&CollectionChange<T>) + 'static,
    ) -> SubscriptionId {
        self.window.subscribe(listener)
    }

    pub fn unsubscribe_window(&mut self, id: SubscriptionId) -> bool {
        self.window.unsubscribe(id)
    }

    pub fn push(&mut self, value: T) -> CollectionResult<()> {
        let change = self.full.push(value);
        self.propagate(&change)
    }

    pub fn insert(&mut self, index: usize, value: T) -> CollectionResult<()> {
        let change = self.full.insert(index, value)?;
        self.propagate(&change)
    }

    /// Removes and returns the element at `index`.
    ///
    /// Once the source has dropped the element it is handed back even if the
    /// window had to be rebuilt; the desync is logged by `propagate`.
    pub fn remove(&mut self, index: usize) -> CollectionResult<T> {
        let value = self
            .full
            .get(index)
            .cloned()
            .ok_or(CollectionError::OutOfRange {
                index,
                len: self.full.len(),
            })?;
        let change = self.full.remove(index)?;
        if self.propagate(&change).is_err() {
            warn!(
                "event=collection_remove module=collection status=degraded index={index} window=rebuilt"
            );
        }
        Ok(value)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> CollectionResult<()> {
        let change = self.full.move_item(from, to)?;
        self.propagate(&change)
    }

    pub fn replace(&mut self, index: usize, value: T) -> CollectionResult<()> {
        let change = self.full.replace(index, value)?;
        self.propagate(&change)
    }

    pub fn update(&mut self, index: usize, edit: impl FnOnce(&mut T)) -> CollectionResult<()> {
        let change = self.full.update(index, edit)?;
        self.propagate(&change)
    }

    pub fn reset(&mut self, values: Vec<T>) {
        self.full.reset(values);
        self.window.resync(&self.full);
    }

    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    fn propagate(&mut self, change: &CollectionChange<T>) -> CollectionResult<()> {
        if let Err(err) = self.window.apply(&self.full, change) {
            error!(
                "event=window_desync module=collection status=error kind={} error={}",
                change.kind(),
                err
            );
            self.window.resync(&self.full);
            return Err(CollectionError::WindowDesync {
                kind: change.kind(),
            });
        }
        Ok(())
    }
}
