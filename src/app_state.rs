// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::inventory::{DeviceRepository, ItemRepository, TagLifecycle, TagRepository};
use crate::runtime_paths::RuntimePaths;
use crate::store::StoreError;

/// Shared state built once at startup and passed into handlers explicitly
/// via `web::Data` instead of ambient globals.
pub struct AppState {
    pub devices: DeviceRepository,
    pub items: ItemRepository,
    pub tags: TagRepository,
    pub lifecycle: TagLifecycle,
}

impl AppState {
    pub fn open(runtime_paths: &RuntimePaths) -> Result<Self, StoreError> {
        let devices = DeviceRepository::open(runtime_paths)?;
        let items = ItemRepository::open(runtime_paths)?;
        let tags = TagRepository::open(runtime_paths)?;
        let lifecycle = TagLifecycle::new(tags.clone(), items.clone());
        Ok(Self {
            devices,
            items,
            tags,
            lifecycle,
        })
    }
}
