// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Typed accessors over the document store, one per resource collection.

use super::{Device, Item, Tag, TagKind};
use crate::runtime_paths::RuntimePaths;
use crate::store::{Collection, Document, StoreError};
use std::sync::Arc;

#[derive(Clone)]
pub struct DeviceRepository {
    collection: Arc<Collection<Device>>,
}

/// Registration payload a device presents about itself.
#[derive(Debug, Clone)]
pub struct DeviceRegistration {
    pub device_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip_address: Option<String>,
}

impl DeviceRepository {
    pub fn open(paths: &RuntimePaths) -> Result<Self, StoreError> {
        Ok(Self {
            collection: Arc::new(Collection::open(
                paths.collection_file(Device::COLLECTION),
            )?),
        })
    }

    pub fn list(&self, search: Option<&str>, skip: usize) -> Vec<Device> {
        self.collection.find(search, skip)
    }

    pub fn get(&self, id: &str) -> Option<Device> {
        self.collection.find_by_id(id)
    }

    pub fn set_allowed(&self, id: &str, allowed: bool) -> Result<Device, StoreError> {
        self.collection.update(id, |device| device.allowed = allowed)
    }

    /// Self-report path: the device overwrites its own identity fields.
    pub fn record_report(
        &self,
        id: &str,
        serial_number: Option<String>,
        version: Option<String>,
    ) -> Result<Device, StoreError> {
        self.collection.update(id, |device| {
            device.serial_number = serial_number;
            device.version = version;
        })
    }

    /// Find-or-create keyed on `device_id`. Returns the device and whether
    /// it was created by this call. New devices start with `allowed: false`.
    pub fn register(&self, registration: DeviceRegistration) -> Result<(Device, bool), StoreError> {
        let device_id = registration.device_id.clone();
        if let Some(existing) = self
            .collection
            .find_first(|device| device.device_id == device_id)
        {
            return Ok((existing, false));
        }

        let device = Device {
            id: String::new(),
            device_id: registration.device_id,
            name: registration.name.unwrap_or_default(),
            description: registration.description,
            serial_number: None,
            ip_address: registration.ip_address,
            version: None,
            allowed: false,
        };
        match self.collection.create(device) {
            Ok(created) => Ok((created, true)),
            // Lost a concurrent registration race; the winner is visible now.
            Err(StoreError::Duplicate(_)) => self
                .collection
                .find_first(|device| device.device_id == device_id)
                .map(|device| (device, false))
                .ok_or_else(|| {
                    StoreError::NotFound(format!("device '{}' not found after race", device_id))
                }),
            Err(err) => Err(err),
        }
    }

    pub fn delete(&self, id: &str) -> Result<Device, StoreError> {
        self.collection.delete(id)
    }
}

#[derive(Clone)]
pub struct ItemRepository {
    collection: Arc<Collection<Item>>,
}

/// Partial replacement for PUT /items: absent fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
}

impl ItemRepository {
    pub fn open(paths: &RuntimePaths) -> Result<Self, StoreError> {
        Ok(Self {
            collection: Arc::new(Collection::open(paths.collection_file(Item::COLLECTION))?),
        })
    }

    pub fn list(&self, search: Option<&str>, skip: usize) -> Vec<Item> {
        self.collection.find(search, skip)
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.collection.find_by_id(id)
    }

    pub fn create(&self, name: String, description: Option<String>) -> Result<Item, StoreError> {
        self.collection.create(Item {
            id: String::new(),
            name,
            description,
            amount: None,
        })
    }

    pub fn update(&self, id: &str, changes: ItemUpdate) -> Result<Item, StoreError> {
        self.collection.update(id, |item| {
            if let Some(name) = changes.name {
                item.name = name;
            }
            if let Some(description) = changes.description {
                item.description = Some(description);
            }
            if let Some(amount) = changes.amount {
                item.amount = Some(amount);
            }
        })
    }

    pub fn delete(&self, id: &str) -> Result<Item, StoreError> {
        self.collection.delete(id)
    }
}

#[derive(Clone)]
pub struct TagRepository {
    collection: Arc<Collection<Tag>>,
}

impl TagRepository {
    pub fn open(paths: &RuntimePaths) -> Result<Self, StoreError> {
        Ok(Self {
            collection: Arc::new(Collection::open(paths.collection_file(Tag::COLLECTION))?),
        })
    }

    pub fn list(&self, search: Option<&str>, skip: usize) -> Vec<Tag> {
        self.collection.find(search, skip)
    }

    pub fn get(&self, id: &str) -> Option<Tag> {
        self.collection.find_by_id(id)
    }

    pub fn find_by_item(&self, item_id: &str) -> Vec<Tag> {
        self.collection
            .find_where(|tag| tag.item.as_deref() == Some(item_id))
    }

    /// Find-or-create keyed on the physical identifier. The uid is declared
    /// as the collection's unique key, so a concurrent first-time lookup
    /// loses with a duplicate error and picks up the winner's record here.
    pub fn find_or_create(&self, uid: &str) -> Result<(Tag, bool), StoreError> {
        if let Some(existing) = self.collection.find_first(|tag| tag.uid == uid) {
            return Ok((existing, false));
        }
        match self.collection.create(Tag::new(uid)) {
            Ok(created) => Ok((created, true)),
            Err(StoreError::Duplicate(_)) => self
                .collection
                .find_first(|tag| tag.uid == uid)
                .map(|tag| (tag, false))
                .ok_or_else(|| {
                    StoreError::NotFound(format!("tag with uid '{}' not found after race", uid))
                }),
            Err(err) => Err(err),
        }
    }

    /// Rebinds a tag's state and item reference in one store update; the
    /// tag's validate hook rejects any combination that would break the
    /// type/item invariant.
    pub fn rebind(
        &self,
        id: &str,
        kind: TagKind,
        item: Option<String>,
    ) -> Result<Tag, StoreError> {
        self.collection.update(id, |tag| {
            tag.kind = kind;
            tag.item = item;
        })
    }

    pub fn delete(&self, id: &str) -> Result<Tag, StoreError> {
        self.collection.delete(id)
    }
}
