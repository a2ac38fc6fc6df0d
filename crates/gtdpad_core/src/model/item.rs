//! To-do item entity.

use super::entity::{set_if_changed, EntityInfo};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One to-do entry living in exactly one group.
///
/// `group_id` is a lookup key for the owning group, not an ownership edge;
/// it is rewritten whenever a group takes the item in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntity {
    info: EntityInfo,
    content: String,
    group_id: String,
}

impl ItemEntity {
    pub fn new(info: EntityInfo, content: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            info,
            content: content.into(),
            group_id: group_id.into(),
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

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        set_if_changed(&mut self.content, content.into())
    }

    /// Identifier of the owning group.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub(crate) fn set_group_id(&mut self, group_id: &str) {
        if self.group_id != group_id {
            self.group_id = group_id.to_string();
        }
    }
}

impl Display for ItemEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.info, f)
    }
}
