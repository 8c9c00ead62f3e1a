// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod collection;
pub mod file;

pub use collection::{Collection, Document};

#[derive(Debug, Clone)]
pub enum StoreError {
    NotFound(String),
    Validation(String),
    Duplicate(String),
    File(String),
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "{}", msg),
            StoreError::Validation(msg) => write!(f, "{}", msg),
            StoreError::Duplicate(msg) => write!(f, "{}", msg),
            StoreError::File(msg) => write!(f, "Store file error: {}", msg),
            StoreError::Parse(msg) => write!(f, "Store parse error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
