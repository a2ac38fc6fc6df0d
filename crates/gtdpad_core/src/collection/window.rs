//! Bounded window over the head of an ordered source.
//!
//! # Responsibility
//! - Keep a derived collection equal to the first `capacity` elements of a
//!   source, following the source's change events one at a time.
//! - Publish the window's own edits to downstream subscribers.
//!
//! # Invariants
//! - After each applied event: `window == source[..min(capacity, len)]`.
//! - An event is validated against the source and the window before any
//!   mutation; a rejected event leaves the window untouched.
//! - Reads from the source never go past `capacity - 1`, except for the
//!   whole-head rescan on `Reset`.
//! - `capacity` is fixed for the lifetime of the view.

use super::change::{check_index, check_insert_index, CollectionChange, CollectionResult};
use super::observable::{ObservableCollection, SubscriptionId};
use log::debug;

/// Read access the window needs from its source.
pub trait WindowSource<T> {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&T>;
}

impl<T> WindowSource<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T> WindowSource<T> for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> WindowSource<T> for ObservableCollection<T> {
    fn len(&self) -> usize {
        ObservableCollection::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        ObservableCollection::get(self, index)
    }
}

/// Read-only view of the first `capacity` elements of a source.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowView<T> {
    capacity: usize,
    items: ObservableCollection<T>,
}

impl<T> WindowView<T> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Registers a listener for the window's own edits.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&CollectionChange<T>) + 'static,
    ) -> SubscriptionId {
        self.items.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe(id)
    }
}

impl<T: Clone> WindowView<T> {
    /// Creates an empty window. Feed it a `Reset` (or `resync`) to bind it.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: ObservableCollection::new(),
        }
    }

    /// Creates a window already populated from `source`.
    pub fn bound_to<S: WindowSource<T> + ?Sized>(source: &S, capacity: usize) -> Self {
        let mut view = Self::new(capacity);
        view.resync(source);
        view
    }

    /// Rebuilds the window from the head of `source`. Never fails.
    pub fn resync<S: WindowSource<T> + ?Sized>(&mut self, source: &S) {
        let head = source.len().min(self.capacity);
        let values = (0..head)
            .filter_map(|index| source.get(index).cloned())
            .collect::<Vec<_>>();
        self.items.reset(values);
        debug!(
            "event=window_resync module=collection status=ok capacity={} len={}",
            self.capacity,
            self.items.len()
        );
    }

    /// Applies one source event. `source` must already reflect the edit.
    ///
    /// # Errors
    /// - `OutOfRange` when the event does not fit the source or the window;
    ///   nothing is mutated in that case.
    pub fn apply<S: WindowSource<T> + ?Sized>(
        &mut self,
        source: &S,
        change: &CollectionChange<T>,
    ) -> CollectionResult<()> {
        match change {
            CollectionChange::Insert { index, value } => self.on_insert(source, *index, value),
            CollectionChange::Move { from, to, value } => self.on_move(source, *from, *to, value),
            CollectionChange::Remove { index, .. } => self.on_remove(source, *index),
            CollectionChange::Replace { index, new, .. } => self.on_replace(source, *index, new),
            CollectionChange::Reset => {
                self.resync(source);
                Ok(())
            }
        }
    }

    fn on_insert<S: WindowSource<T> + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
        value: &T,
    ) -> CollectionResult<()> {
        check_index(index, source.len())?;
        if index >= self.capacity {
            return Ok(());
        }
        check_insert_index(index, self.items.len())?;

        self.items.insert(index, value.clone())?;
        self.evict_overflow()
    }

    fn on_move<S: WindowSource<T> + ?Sized>(
        &mut self,
        source: &S,
        from: usize,
        to: usize,
        value: &T,
    ) -> CollectionResult<()> {
        if from == to {
            return Ok(());
        }
        check_index(from, source.len())?;
        check_index(to, source.len())?;

        match (from < self.capacity, to < self.capacity) {
            (true, true) => {
                check_index(from, self.items.len())?;
                check_index(to, self.items.len())?;
                self.items.move_item(from, to)?;
            }
            (true, false) => {
                check_index(from, self.items.len())?;
                let refill = self.refill_candidate(source);
                self.items.remove(from)?;
                if let Some(value) = refill {
                    self.items.push(value);
                }
            }
            (false, true) => {
                check_insert_index(to, self.items.len())?;
                self.items.insert(to, value.clone())?;
                self.evict_overflow()?;
            }
            (false, false) => {}
        }
        Ok(())
    }

    fn on_remove<S: WindowSource<T> + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
    ) -> CollectionResult<()> {
        // The source already lost the element, so `len` is one past the old tail.
        check_insert_index(index, source.len())?;
        if index >= self.capacity {
            return Ok(());
        }
        check_index(index, self.items.len())?;

        let refill = self.refill_candidate(source);
        self.items.remove(index)?;
        if let Some(value) = refill {
            self.items.push(value);
        }
        Ok(())
    }

    fn on_replace<S: WindowSource<T> + ?Sized>(
        &mut self,
        source: &S,
        index: usize,
        value: &T,
    ) -> CollectionResult<()> {
        check_index(index, source.len())?;
        if index >= self.capacity {
            return Ok(());
        }
        check_index(index, self.items.len())?;

        self.items.replace(index, value.clone())?;
        Ok(())
    }

    /// The element that slides into the last window slot, if the source is
    /// long enough to have one.
    fn refill_candidate<S: WindowSource<T> + ?Sized>(&self, source: &S) -> Option<T> {
        if self.capacity == 0 || source.len() < self.capacity {
            return None;
        }
        source.get(self.capacity - 1).cloned()
    }

    fn evict_overflow(&mut self) -> CollectionResult<()> {
        if self.items.len() > self.capacity {
            self.items.remove(self.capacity)?;
        }
        Ok(())
    }
}
