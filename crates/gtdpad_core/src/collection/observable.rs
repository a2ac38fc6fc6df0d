//! Vec-backed ordered collection with synchronous change notification.
//!
//! # Responsibility
//! - Own a sequence of values and expose index-based mutations.
//! - Emit exactly one `CollectionChange` per structural mutation.
//!
//! # Invariants
//! - Indices are validated before any mutation; a rejected call leaves the
//!   collection and its subscribers untouched.
//! - Subscribers run synchronously, before the mutating call returns.
//! - Clones carry items only; subscribers stay with the original.

use super::change::{check_index, check_insert_index, CollectionChange, CollectionResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Formatter};

type Listener<T> = Box<dyn FnMut(&CollectionChange<T>)>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Ordered collection that publishes its structural edits.
pub struct ObservableCollection<T> {
    items: Vec<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T> ObservableCollection<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
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
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the index of the first element matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Registers a listener for every subsequent change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&CollectionChange<T>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, change: &CollectionChange<T>) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }
}

impl<T: Clone> ObservableCollection<T> {
    /// Appends `value` at the end.
    pub fn push(&mut self, value: T) -> CollectionChange<T> {
        let index = self.items.len();
        self.items.push(value.clone());
        let change = CollectionChange::Insert { index, value };
        self.emit(&change);
        change
    }

    /// Inserts `value` at `index` (`index == len` appends).
    ///
    /// Returns the emitted event.
    pub fn insert(&mut self, index: usize, value: T) -> CollectionResult<CollectionChange<T>> {
        check_insert_index(index, self.items.len())?;
        self.items.insert(index, value.clone());
        let change = CollectionChange::Insert { index, value };
        self.emit(&change);
        Ok(change)
    }

    /// Removes the element at `index`.
    ///
    /// The removed value travels inside the returned `Remove` event.
    pub fn remove(&mut self, index: usize) -> CollectionResult<CollectionChange<T>> {
        check_index(index, self.items.len())?;
        let value = self.items.remove(index);
        let change = CollectionChange::Remove { index, value };
        self.emit(&change);
        Ok(change)
    }

    /// Moves the element at `from` so that it ends up at `to`.
    ///
    /// `from == to` still emits a `Move`; consumers treat it as a no-op.
    pub fn move_item(&mut self, from: usize, to: usize) -> CollectionResult<CollectionChange<T>> {
        let len = self.items.len();
        check_index(from, len)?;
        check_index(to, len)?;
        let value = self.items.remove(from);
        self.items.insert(to, value.clone());
        let change = CollectionChange::Move { from, to, value };
        self.emit(&change);
        Ok(change)
    }

    /// Overwrites the element at `index`.
    pub fn replace(&mut self, index: usize, value: T) -> CollectionResult<CollectionChange<T>> {
        check_index(index, self.items.len())?;
        let old = std::mem::replace(&mut self.items[index], value.clone());
        let change = CollectionChange::Replace {
            index,
            old,
            new: value,
        };
        self.emit(&change);
        Ok(change)
    }

    /// Edits the element at `index` in place and publishes a `Replace`.
    ///
    /// The stored value keeps its identity, so state it owns (such as its
    /// own subscribers) survives the edit.
    pub fn update(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut T),
    ) -> CollectionResult<CollectionChange<T>> {
        check_index(index, self.items.len())?;
        let old = self.items[index].clone();
        edit(&mut self.items[index]);
        let change = CollectionChange::Replace {
            index,
            old,
            new: self.items[index].clone(),
        };
        self.emit(&change);
        Ok(change)
    }

    /// Mutable access for in-place edits that publish through the element's
    /// own collections rather than through this one.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Swaps in a whole new sequence and emits a single `Reset`.
    pub fn reset(&mut self, values: Vec<T>) -> CollectionChange<T> {
        self.items = values;
        let change = CollectionChange::Reset;
        self.emit(&change);
        change
    }

    pub fn clear(&mut self) -> CollectionChange<T> {
        self.reset(Vec::new())
    }
}

impl<T> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ObservableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }
}

impl<T: Clone> Clone for ObservableCollection<T> {
    fn clone(&self) -> Self {
        Self::from(self.items.clone())
    }
}

impl<T: Debug> Debug for ObservableCollection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &self.items)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for ObservableCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a, T> IntoIterator for &'a ObservableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for ObservableCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ObservableCollection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
