// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::path::{Path, PathBuf};

/// Canonical runtime locations derived from the runtime root.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
}

impl RuntimePaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            config_file: root.join("config.yaml"),
            data_dir: root.join("data"),
        }
    }

    /// Backing file for a named document collection.
    pub fn collection_file(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.yaml", collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_derive_from_root() {
        let paths = RuntimePaths::new(Path::new("/srv/stockroom"));
        assert_eq!(paths.config_file, Path::new("/srv/stockroom/config.yaml"));
        assert_eq!(paths.data_dir, Path::new("/srv/stockroom/data"));
        assert_eq!(
            paths.collection_file("tags"),
            Path::new("/srv/stockroom/data/tags.yaml")
        );
    }
}
