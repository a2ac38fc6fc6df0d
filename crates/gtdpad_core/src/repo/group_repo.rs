//! Group repository: the owned set of groups and its snapshot persistence.
//!
//! # Responsibility
//! - Own every group, serve exact-id lookups for groups and items.
//! - Save and restore the whole group set as one snapshot entry.
//! - Apply cross-group edits (item relocation) without breaking the
//!   one-group-per-item rule.
//!
//! # Invariants
//! - Lookups return `Some` only on a unique match; zero or several matches
//!   are an ordinary `None`.
//! - Lookups scan linearly; datasets are expected to stay small.
//! - Mutations validate ids and indices before touching any group.
//!
//! # See also
//! - `GroupEntity` for the per-group preview window.

use super::kv_store::{KeyValueStore, StoreError};
use crate::collection::{CollectionChange, CollectionError, ObservableCollection, SubscriptionId};
use crate::model::entity::{EntityError, EntityInfo};
use crate::model::group::GroupEntity;
use crate::model::item::ItemEntity;
use crate::model::seed::seed_groups;
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// The only group collection name callers may ask for.
pub const ALL_GROUPS: &str = "AllGroups";
/// Store key holding the serialized group set.
pub const SNAPSHOT_KEY: &str = "Things";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// A collection name other than `ALL_GROUPS` was requested.
    UnsupportedQuery(String),
    DuplicateGroupId(String),
    DuplicateItemId(String),
    GroupNotFound(String),
    ItemNotFound(String),
    Collection(CollectionError),
    Entity(EntityError),
    Snapshot(serde_json::Error),
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedQuery(name) => write!(
                f,
                "unsupported group collection `{name}`; only `{ALL_GROUPS}` is supported"
            ),
            Self::DuplicateGroupId(id) => write!(f, "group id already in use: {id}"),
            Self::DuplicateItemId(id) => write!(f, "item id already in use: {id}"),
            Self::GroupNotFound(id) => write!(f, "no unique group with id: {id}"),
            Self::ItemNotFound(id) => write!(f, "no unique item with id: {id}"),
            Self::Collection(err) => write!(f, "{err}"),
            Self::Entity(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "invalid group snapshot: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::Entity(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CollectionError> for RepoError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<EntityError> for RepoError {
    fn from(value: EntityError) -> Self {
        Self::Entity(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owner of all groups, backed by a key-value snapshot.
pub struct GroupRepository<S: KeyValueStore> {
    store: S,
    groups: ObservableCollection<GroupEntity>,
}

impl<S: KeyValueStore> GroupRepository<S> {
    /// Loads the stored snapshot, or seeds and saves starter content when
    /// the store has none.
    ///
    /// # Errors
    /// - `Store` when the store cannot be read or written.
    /// - `Snapshot` when a stored snapshot cannot be decoded.
    pub fn open_or_seed(store: S) -> RepoResult<Self> {
        let started_at = Instant::now();

        if let Some(bytes) = store.get(SNAPSHOT_KEY)? {
            let groups: Vec<GroupEntity> = serde_json::from_slice(&bytes).map_err(|err| {
                error!(
                    "event=repo_open module=repo status=error source=snapshot bytes={} error={}",
                    bytes.len(),
                    err
                );
                RepoError::from(err)
            })?;
            let repo = Self {
                store,
                groups: ObservableCollection::from(groups),
            };
            repo.warn_on_duplicate_ids();
            info!(
                "event=repo_open module=repo status=ok source=snapshot groups={} items={} duration_ms={}",
                repo.groups.len(),
                repo.item_count(),
                started_at.elapsed().as_millis()
            );
            return Ok(repo);
        }

        let repo = Self {
            store,
            groups: ObservableCollection::from(seed_groups()?),
        };
        repo.save()?;
        info!(
            "event=repo_open module=repo status=ok source=seed groups={} items={} duration_ms={}",
            repo.groups.len(),
            repo.item_count(),
            started_at.elapsed().as_millis()
        );
        Ok(repo)
    }

    /// Writes the whole group set under `SNAPSHOT_KEY`.
    pub fn save(&self) -> RepoResult<()> {
        let bytes = serde_json::to_vec(self.groups.as_slice())?;
        match self.store.set(SNAPSHOT_KEY, &bytes) {
            Ok(()) => {
                info!(
                    "event=repo_save module=repo status=ok groups={} bytes={}",
                    self.groups.len(),
                    bytes.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=repo_save module=repo status=error error={err}");
                Err(err.into())
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the named group collection.
    ///
    /// # Errors
    /// - `UnsupportedQuery` for any name other than `ALL_GROUPS`.
    pub fn groups(&self, collection: &str) -> RepoResult<&ObservableCollection<GroupEntity>> {
        if collection != ALL_GROUPS {
            return Err(RepoError::UnsupportedQuery(collection.to_string()));
        }
        Ok(&self.groups)
    }

    pub fn all_groups(&self) -> &ObservableCollection<GroupEntity> {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&GroupEntity> {
        self.group_index(id).and_then(|index| self.groups.get(index))
    }

    pub fn item(&self, id: &str) -> Option<&ItemEntity> {
        let (group_index, item_index) = self.locate_item(id)?;
        self.groups.get(group_index)?.items().get(item_index)
    }

    pub fn subscribe_groups(
        &mut self,
        listener: impl FnMut(&CollectionChange<GroupEntity>) + 'static,
    ) -> SubscriptionId {
        self.groups.subscribe(listener)
    }

    pub fn unsubscribe_groups(&mut self, id: SubscriptionId) -> bool {
        self.groups.unsubscribe(id)
    }

    /// Per-group access for subscriptions and in-group edits (reorder,
    /// remove, update). New items enter only through `add_item`/`move_item`,
    /// which check item ids across every group.
    ///
    /// ```compile_fail
    /// use gtdpad_core::{EntityInfo, GroupRepository, ItemEntity, MemoryStore};
    ///
    /// let mut repo = GroupRepository::open_or_seed(MemoryStore::new()).unwrap();
    /// let info = EntityInfo::new("Work out", "Work out", "", "", "").unwrap();
    /// let copy = ItemEntity::new(info, "", "Waiting");
    /// repo.group_mut("Waiting").unwrap().add_item(copy).unwrap();
    /// ```
    pub fn group_mut(&mut self, id: &str) -> Option<&mut GroupEntity> {
        let index = self.group_index(id)?;
        self.groups.get_mut(index)
    }

    /// Appends a group.
    ///
    /// # Errors
    /// - `DuplicateGroupId` / `DuplicateItemId` when the group or any of its
    ///   items reuses an existing id.
    pub fn add_group(&mut self, group: GroupEntity) -> RepoResult<()> {
        if self.groups.iter().any(|existing| existing.id() == group.id()) {
            return Err(RepoError::DuplicateGroupId(group.id().to_string()));
        }
        let mut incoming = HashSet::new();
        for item in group.items() {
            if !incoming.insert(item.id()) || self.count_items(item.id()) > 0 {
                return Err(RepoError::DuplicateItemId(item.id().to_string()));
            }
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn remove_group(&mut self, id: &str) -> RepoResult<GroupEntity> {
        let index = self
            .group_index(id)
            .ok_or_else(|| RepoError::GroupNotFound(id.to_string()))?;
        let group = self
            .groups
            .get(index)
            .cloned()
            .ok_or_else(|| RepoError::GroupNotFound(id.to_string()))?;
        self.groups.remove(index)?;
        Ok(group)
    }

    /// Edits a group's labelled fields and publishes a `Replace`.
    pub fn update_group(&mut self, id: &str, edit: impl FnOnce(&mut EntityInfo)) -> RepoResult<()> {
        let index = self
            .group_index(id)
            .ok_or_else(|| RepoError::GroupNotFound(id.to_string()))?;
        self.groups.update(index, |group| edit(group.info_mut()))?;
        Ok(())
    }

    /// Appends `item` to the group `group_id`; the item is re-pointed at it.
    pub fn add_item(&mut self, group_id: &str, item: ItemEntity) -> RepoResult<()> {
        if self.count_items(item.id()) > 0 {
            return Err(RepoError::DuplicateItemId(item.id().to_string()));
        }
        let group = self
            .group_mut(group_id)
            .ok_or_else(|| RepoError::GroupNotFound(group_id.to_string()))?;
        group.add_item(item)?;
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: &str) -> RepoResult<ItemEntity> {
        let (group_index, item_index) = self
            .locate_item(item_id)
            .ok_or_else(|| RepoError::ItemNotFound(item_id.to_string()))?;
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or_else(|| RepoError::ItemNotFound(item_id.to_string()))?;
        Ok(group.remove_item(item_index)?)
    }

    /// Edits one item and publishes a `Replace` through its group.
    pub fn update_item(
        &mut self,
        item_id: &str,
        edit: impl FnOnce(&mut ItemEntity),
    ) -> RepoResult<()> {
        let (group_index, item_index) = self
            .locate_item(item_id)
            .ok_or_else(|| RepoError::ItemNotFound(item_id.to_string()))?;
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or_else(|| RepoError::ItemNotFound(item_id.to_string()))?;
        group.update_item(item_index, edit)?;
        Ok(())
    }

    /// Relocates an item to position `index` of group `target_group_id`.
    ///
    /// Within one group this is a `Move`; across groups it is a `Remove`
    /// from the old group followed by an `Insert` into the new one.
    ///
    /// # Errors
    /// - `ItemNotFound` / `GroupNotFound` on unknown ids.
    /// - `Collection(OutOfRange)` when `index` does not fit the target.
    pub fn move_item(
        &mut self,
        item_id: &str,
        target_group_id: &str,
        index: usize,
    ) -> RepoResult<()> {
        let (from_group, from_index) = self
            .locate_item(item_id)
            .ok_or_else(|| RepoError::ItemNotFound(item_id.to_string()))?;
        let to_group = self
            .group_index(target_group_id)
            .ok_or_else(|| RepoError::GroupNotFound(target_group_id.to_string()))?;
        let target_len = self
            .groups
            .get(to_group)
            .map_or(0, |group| group.items().len());

        if from_group == to_group {
            if index >= target_len {
                return Err(CollectionError::OutOfRange {
                    index,
                    len: target_len,
                }
                .into());
            }
            if let Some(group) = self.groups.get_mut(to_group) {
                group.move_item(from_index, index)?;
            }
            return Ok(());
        }

        if index > target_len {
            return Err(CollectionError::OutOfRange {
                index,
                len: target_len,
            }
            .into());
        }
        let item = match self.groups.get_mut(from_group) {
            Some(group) => group.remove_item(from_index)?,
            None => return Err(RepoError::ItemNotFound(item_id.to_string())),
        };
        match self.groups.get_mut(to_group) {
            Some(group) => group.insert_item(index, item)?,
            None => return Err(RepoError::GroupNotFound(target_group_id.to_string())),
        }
        Ok(())
    }

    fn group_index(&self, id: &str) -> Option<usize> {
        unique(
            self.groups
                .iter()
                .enumerate()
                .filter(|(_, group)| group.id() == id)
                .map(|(index, _)| index),
        )
    }

    fn locate_item(&self, id: &str) -> Option<(usize, usize)> {
        unique(self.groups.iter().enumerate().flat_map(|(group_index, group)| {
            group
                .items()
                .iter()
                .enumerate()
                .filter(move |(_, item)| item.id() == id)
                .map(move |(item_index, _)| (group_index, item_index))
        }))
    }

    fn count_items(&self, id: &str) -> usize {
        self.groups
            .iter()
            .flat_map(|group| group.items().iter())
            .filter(|item| item.id() == id)
            .count()
    }

    fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items().len()).sum()
    }

    fn warn_on_duplicate_ids(&self) {
        let mut seen = HashSet::new();
        let duplicate_groups = self
            .groups
            .iter()
            .filter(|group| !seen.insert(group.id()))
            .count();
        let mut seen = HashSet::new();
        let duplicate_items = self
            .groups
            .iter()
            .flat_map(|group| group.items().iter())
            .filter(|item| !seen.insert(item.id()))
            .count();
        if duplicate_groups > 0 || duplicate_items > 0 {
            warn!(
                "event=repo_open module=repo status=degraded duplicate_groups={duplicate_groups} duplicate_items={duplicate_items}"
            );
        }
    }
}

/// Yields the only element of `matches`, or `None` for zero or several.
fn unique<T>(mut matches: impl Iterator<Item = T>) -> Option<T> {
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::unique;

    #[test]
    fn unique_rejects_zero_and_many() {
        assert_eq!(unique(Vec::<u8>::new().into_iter()), None);
        assert_eq!(unique(vec![4].into_iter()), Some(4));
        assert_eq!(unique(vec![4, 5].into_iter()), None);
    }
}
