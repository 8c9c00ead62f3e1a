// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod lifecycle;
pub mod repository;

pub use lifecycle::{LifecycleError, TagLifecycle, TagTransition};
pub use repository::{DeviceRepository, ItemRepository, TagRepository};

use crate::store::{Document, StoreError};
use serde::{Deserialize, Serialize};

/// An inventoried thing. Referenced by at most one tag; carries no pointer
/// back to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl Document for Item {
    const COLLECTION: &'static str = "items";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "item name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Tag state. The serde default is `Unknown`, so a tag created with no
/// explicit type is literally in the unknown state rather than a separate
/// unset case.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    #[default]
    Unknown,
    Item,
    Mode,
}

/// A physical-identifier-backed record. Invariant: `kind == Item` iff
/// `item` is set; enforced by the store-level validate hook so no write
/// path can leave a stale reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    #[serde(default)]
    pub id: String,
    pub uid: String,
    #[serde(default, rename = "type")]
    pub kind: TagKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl Tag {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            uid: uid.into(),
            kind: TagKind::default(),
            item: None,
        }
    }
}

impl Document for Tag {
    const COLLECTION: &'static str = "tags";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.uid.trim().is_empty() {
            return Err(StoreError::Validation(
                "tag uid must not be empty".to_string(),
            ));
        }
        match self.kind {
            TagKind::Item if self.item.is_none() => Err(StoreError::Validation(
                "a tag of type 'item' requires an item reference".to_string(),
            )),
            TagKind::Unknown | TagKind::Mode if self.item.is_some() => {
                Err(StoreError::Validation(
                    "only tags of type 'item' may carry an item reference".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.uid.to_lowercase().contains(needle)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.uid)
    }
}

/// A scanner/terminal that reads tags. `device_id` is the stable identifier
/// the device presents about itself; `allowed` is the administrative gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    #[serde(default)]
    pub id: String,
    pub device_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub allowed: bool,
}

impl Document for Device {
    const COLLECTION: &'static str = "devices";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.device_id.trim().is_empty() {
            return Err(StoreError::Validation(
                "device_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn matches_search(&self, needle: &str) -> bool {
        let fields = [
            Some(self.device_id.as_str()),
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.serial_number.as_deref(),
            self.ip_address.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.device_id)
    }
}
