//! Group entity owning its items and their top-N preview.
//!
//! # Responsibility
//! - Own the full item collection and bind one `WindowView` to it.
//! - Keep each item's back-reference pointing at this group.
//!
//! # Invariants
//! - `top_items() == items()[..min(TOP_ITEMS_CAPACITY, len)]` after every
//!   completed call.
//! - Every item held by the group reports this group's id as `group_id`.
//! - Persisted form carries the full item list only; the preview is rebuilt
//!   on load.

use super::entity::EntityInfo;
use super::item::ItemEntity;
use crate::collection::{
    CollectionChange, CollectionResult, ObservableCollection, SubscriptionId, WindowView,
    WindowedCollection,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Number of items shown in a group preview.
pub const TOP_ITEMS_CAPACITY: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GroupRecord", into = "GroupRecord")]
pub struct GroupEntity {
    info: EntityInfo,
    items: WindowedCollection<ItemEntity>,
}

#[derive(Serialize, Deserialize)]
struct GroupRecord {
    info: EntityInfo,
    items: Vec<ItemEntity>,
}

impl From<GroupRecord> for GroupEntity {
    fn from(record: GroupRecord) -> Self {
        Self::with_items(record.info, record.items)
    }
}

impl From<GroupEntity> for GroupRecord {
    fn from(group: GroupEntity) -> Self {
        Self {
            items: group.items.full().as_slice().to_vec(),
            info: group.info,
        }
    }
}

impl GroupEntity {
    pub fn new(info: EntityInfo) -> Self {
        Self::with_items(info, Vec::new())
    }

    /// Creates a group already holding `items`, claiming each of them.
    pub fn with_items(info: EntityInfo, mut items: Vec<ItemEntity>) -> Self {
        for item in &mut items {
            item.set_group_id(info.id());
        }
        Self {
            items: WindowedCollection::from_items(items, TOP_ITEMS_CAPACITY),
            info,
        }
    }

    pub fn id(&self) -> &str {
        self.info.id()
    }

    pub fn info(&self) -> &EntityInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut EntityInfo {
        &mut self.info
    }

    /// Every item, in order.
    pub fn items(&self) -> &ObservableCollection<ItemEntity> {
        self.items.full()
    }

    /// The first `TOP_ITEMS_CAPACITY` items, in order.
    pub fn top_items(&self) -> &WindowView<ItemEntity> {
        self.items.window()
    }

    pub fn item_position(&self, item_id: &str) -> Option<usize> {
        self.items.full().position(|item| item.id() == item_id)
    }

    pub fn subscribe_items(
        &mut self,
        listener: impl FnMut(&CollectionChange<ItemEntity>) + 'static,
    ) -> SubscriptionId {
        self.items.subscribe_full(listener)
    }

    pub fn unsubscribe_items(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe_full(id)
    }

    pub fn subscribe_top_items(
        &mut self,
        listener: impl FnMut(&CollectionChange<ItemEntity>) + 'static,
    ) -> SubscriptionId {
        self.items.subscribe_window(listener)
    }

    pub fn unsubscribe_top_items(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe_window(id)
    }

    /// Adding items is crate-private: item ids must stay unique across all
    /// groups, which only `GroupRepository` can check.
    pub(crate) fn add_item(&mut self, item: ItemEntity) -> CollectionResult<()> {
        let item = self.claim(item);
        self.items.push(item)
    }

    pub(crate) fn insert_item(&mut self, index: usize, item: ItemEntity) -> CollectionResult<()> {
        let item = self.claim(item);
        self.items.insert(index, item)
    }

    pub fn remove_item(&mut self, index: usize) -> CollectionResult<ItemEntity> {
        self.items.remove(index)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> CollectionResult<()> {
        self.items.move_item(from, to)
    }

    /// Edits one item in place and publishes the edit as a `Replace`.
    pub fn update_item(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut ItemEntity),
    ) -> CollectionResult<()> {
        self.items.update(index, edit)
    }

    fn claim(&self, mut item: ItemEntity) -> ItemEntity {
        item.set_group_id(self.info.id());
        item
    }
}

impl Display for GroupEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.info, f)
    }
}
