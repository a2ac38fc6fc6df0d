//! To-do domain model: groups of items with a bounded preview.
//!
//! # Responsibility
//! - Define the entity records shown by list/grid views.
//! - Wire each group's preview window to its item collection.
//!
//! # Invariants
//! - Group ids are unique among groups and item ids among items; the two
//!   namespaces are independent.
//! - Items reference their group by id only; groups own their items.

pub mod entity;
pub mod group;
pub mod item;
pub mod seed;
