//! Repository layer: group ownership and snapshot persistence.
//!
//! # Responsibility
//! - Own the group set and answer id lookups.
//! - Isolate storage backends behind the `KeyValueStore` contract.
//!
//! # Invariants
//! - The whole group set is persisted as one opaque entry.
//! - Missing lookups are `None`; misuse (bad collection name, duplicate
//!   ids, bad indices) is a `RepoError`.

pub mod group_repo;
pub mod kv_store;
