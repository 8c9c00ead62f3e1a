// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Tag lifecycle: legal state transitions, the item-deletion cascade, and
//! uid-based find-or-create.

use super::repository::{ItemRepository, TagRepository};
use super::{Tag, TagKind};
use crate::store::StoreError;
use serde::Deserialize;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub enum LifecycleError {
    NotFound(String),
    Validation(String),
    Store(StoreError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::NotFound(msg) => write!(f, "{}", msg),
            LifecycleError::Validation(msg) => write!(f, "{}", msg),
            LifecycleError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl Error for LifecycleError {}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => LifecycleError::NotFound(msg),
            StoreError::Validation(msg) | StoreError::Duplicate(msg) => {
                LifecycleError::Validation(msg)
            }
            other => LifecycleError::Store(other),
        }
    }
}

/// Requested tag state change, as received from PUT /tags/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct TagTransition {
    #[serde(rename = "type")]
    pub kind: TagKind,
    #[serde(default)]
    pub item: Option<String>,
}

/// Governs tag state and the tag/item relationship. The item-deletion
/// cascade lives here so both mutations sit behind one interface and could
/// later be swapped for a transactional primitive.
#[derive(Clone)]
pub struct TagLifecycle {
    tags: TagRepository,
    items: ItemRepository,
}

impl TagLifecycle {
    pub fn new(tags: TagRepository, items: ItemRepository) -> Self {
        Self { tags, items }
    }

    /// Resolves a physical identifier to its tag, creating an unknown tag on
    /// first sight. The bool reports whether this call created it.
    pub fn resolve_uid(&self, uid: &str) -> Result<(Tag, bool), LifecycleError> {
        let uid = uid.trim();
        if uid.is_empty() {
            return Err(LifecycleError::Validation(
                "tag uid must not be empty".to_string(),
            ));
        }
        let (tag, created) = self.tags.find_or_create(uid)?;
        if created {
            log::info!("created tag '{}' for uid '{}'", tag.id, tag.uid);
        }
        Ok((tag, created))
    }

    /// Applies a state transition. Binding to an item requires the item to
    /// exist; any transition to a non-item state drops the reference, so a
    /// stale reference can never be left behind.
    pub fn transition(
        &self,
        tag_id: &str,
        transition: TagTransition,
    ) -> Result<Tag, LifecycleError> {
        let item = match transition.kind {
            TagKind::Item => {
                let item_id = transition.item.ok_or_else(|| {
                    LifecycleError::Validation(
                        "a transition to type 'item' requires an item id".to_string(),
                    )
                })?;
                if self.items.get(&item_id).is_none() {
                    return Err(LifecycleError::Validation(format!(
                        "item '{}' does not exist",
                        item_id
                    )));
                }
                Some(item_id)
            }
            TagKind::Unknown | TagKind::Mode => None,
        };

        let updated = self.tags.rebind(tag_id, transition.kind, item)?;
        log::info!(
            "tag '{}' (uid '{}') transitioned to {:?}{}",
            updated.id,
            updated.uid,
            updated.kind,
            updated
                .item
                .as_deref()
                .map(|item| format!(" bound to item '{}'", item))
                .unwrap_or_default()
        );
        Ok(updated)
    }

    /// Deletes an item and releases the tag bound to it. The release is a
    /// best-effort compensating action: the delete has already succeeded, so
    /// a failing tag update is logged and not surfaced to the caller.
    pub fn delete_item(&self, item_id: &str) -> Result<(), LifecycleError> {
        let removed = self.items.delete(item_id)?;
        log::info!("deleted item '{}' ({})", removed.name, removed.id);
        self.release_for_item(item_id);
        Ok(())
    }

    fn release_for_item(&self, item_id: &str) {
        for tag in self.tags.find_by_item(item_id) {
            match self.tags.rebind(&tag.id, TagKind::Unknown, None) {
                Ok(released) => log::info!(
                    "released tag '{}' (uid '{}') from deleted item '{}'",
                    released.id,
                    released.uid,
                    item_id
                ),
                Err(err) => log::error!(
                    "failed to release tag '{}' after deleting item '{}': {}",
                    tag.id,
                    item_id,
                    err
                ),
            }
        }
    }
}
