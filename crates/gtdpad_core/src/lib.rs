//! Core data layer for GtdPad.
//! Groups of to-do items, each with an incrementally maintained top-N
//! preview, persisted as one key-value snapshot.

pub mod collection;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use collection::{
    CollectionChange, CollectionError, CollectionResult, ObservableCollection, SubscriptionId,
    WindowSource, WindowView, WindowedCollection,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{
    BaseUriResolver, EntityError, EntityInfo, ImageHandle, ImageResolver, ImageSource,
    DEFAULT_IMAGE_BASE,
};
pub use model::group::{GroupEntity, TOP_ITEMS_CAPACITY};
pub use model::item::ItemEntity;
pub use model::seed::seed_groups;
pub use repo::group_repo::{GroupRepository, RepoError, RepoResult, ALL_GROUPS, SNAPSHOT_KEY};
pub use repo::kv_store::{
    KeyValueStore, MemoryStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
