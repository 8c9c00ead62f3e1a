// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{StoreError, file};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// A record stored in a [`Collection`].
///
/// `validate` is the server-side validation hook run before every create and
/// update. `unique_key` declares a secondary key the collection enforces
/// unique under its write lock, which makes it the uniqueness guarantee at
/// the storage boundary (not application logic layered above it).
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);

    fn validate(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Free-text filter hook; `needle` arrives lowercased.
    fn matches_search(&self, _needle: &str) -> bool {
        false
    }

    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// A document collection persisted as one YAML file. Records are held in
/// insertion order; every mutation rewrites the file atomically and rolls
/// the in-memory state back if persisting fails.
pub struct Collection<T: Document> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T: Document> Collection<T> {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let records = file::read_yaml_file::<Vec<T>>(&path, T::COLLECTION)?.unwrap_or_default();
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn find(&self, search: Option<&str>, skip: usize) -> Vec<T> {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let records = self.read_guard();
        records
            .iter()
            .filter(|record| match &needle {
                Some(needle) => record.matches_search(needle),
                None => true,
            })
            .skip(skip)
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<T> {
        self.read_guard()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    pub fn find_first<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.read_guard()
            .iter()
            .find(|record| predicate(record))
            .cloned()
    }

    pub fn find_where<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.read_guard()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Validates, enforces the unique key, assigns a fresh id, and persists.
    pub fn create(&self, mut record: T) -> Result<T, StoreError> {
        record.validate()?;
        let mut records = self.write_guard();
        if let Some(key) = record.unique_key() {
            if records.iter().any(|existing| existing.unique_key() == Some(key)) {
                return Err(StoreError::Duplicate(format!(
                    "{} record with key '{}' already exists",
                    T::COLLECTION,
                    key
                )));
            }
        }
        record.assign_id(Uuid::new_v4().to_string());
        records.push(record.clone());
        if let Err(err) = self.persist(&records) {
            records.pop();
            return Err(err);
        }
        Ok(record)
    }

    /// Applies `apply` to a copy of the record, re-validates, and persists.
    /// The record id cannot be changed through this path.
    pub fn update<F>(&self, id: &str, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.write_guard();
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let mut updated = records[position].clone();
        apply(&mut updated);
        updated.assign_id(id.to_string());
        updated.validate()?;
        if let Some(key) = updated.unique_key() {
            let clash = records
                .iter()
                .enumerate()
                .any(|(index, existing)| index != position && existing.unique_key() == Some(key));
            if clash {
                return Err(StoreError::Duplicate(format!(
                    "{} record with key '{}' already exists",
                    T::COLLECTION,
                    key
                )));
            }
        }

        let previous = std::mem::replace(&mut records[position], updated.clone());
        if let Err(err) = self.persist(&records) {
            records[position] = previous;
            return Err(err);
        }
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<T, StoreError> {
        let mut records = self.write_guard();
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        let removed = records.remove(position);
        if let Err(err) = self.persist(&records) {
            records.insert(position, removed);
            return Err(err);
        }
        Ok(removed)
    }

    fn not_found(id: &str) -> StoreError {
        StoreError::NotFound(format!("{} record '{}' not found", T::COLLECTION, id))
    }

    fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        file::write_yaml_file(&self.path, T::COLLECTION, &records)
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<T>> {
        match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!("{} collection lock poisoned on read; recovering", T::COLLECTION);
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::error!(
                    "{} collection lock poisoned on write; recovering",
                    T::COLLECTION
                );
                poisoned.into_inner()
            }
        }
    }
}
