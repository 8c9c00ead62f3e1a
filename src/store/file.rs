// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Atomic YAML file persistence: content is written to a temp file in the
//! same directory, synced, then renamed over the target so readers never
//! observe a partially written collection.

use super::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_TEMP_ATTEMPTS: u32 = 100;

/// Returns `Ok(None)` when the file does not exist yet or is empty.
pub fn read_yaml_file<T: DeserializeOwned>(
    path: &Path,
    label: &str,
) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|err| StoreError::File(format!("Failed to read {} file: {}", label, err)))?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let decoded = serde_yaml::from_str(&content)
        .map_err(|err| StoreError::Parse(format!("Failed to parse {} file: {}", label, err)))?;
    Ok(Some(decoded))
}

pub fn write_yaml_file<T: Serialize>(path: &Path, label: &str, value: &T) -> Result<(), StoreError> {
    let content = serde_yaml::to_string(value)
        .map_err(|err| StoreError::Parse(format!("Failed to serialize {}: {}", label, err)))?;
    let parent = path.parent().ok_or_else(|| {
        StoreError::File(format!("{} file path has no parent directory", label))
    })?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::File(format!("{} file path has no file name", label)))?;
    let (mut file, temp_path) = create_temp_file(parent, file_name, label)?;

    if let Ok(metadata) = fs::metadata(path) {
        #[cfg(unix)]
        {
            if let Err(err) = fs::set_permissions(&temp_path, metadata.permissions()) {
                let _ = fs::remove_file(&temp_path);
                return Err(StoreError::File(format!(
                    "Failed to set temp {} file permissions: {}",
                    label, err
                )));
            }
        }
    }

    if let Err(err) = file.write_all(content.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::File(format!(
            "Failed to write {} temp file: {}",
            label, err
        )));
    }
    if let Err(err) = file.sync_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::File(format!(
            "Failed to sync {} temp file: {}",
            label, err
        )));
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::File(format!(
            "Failed to replace {} file: {}",
            label, err
        )));
    }

    #[cfg(unix)]
    {
        if let Err(err) = sync_parent_dir(parent) {
            log::warn!("{} directory sync failed: {}", label, err);
        }
    }

    Ok(())
}

fn create_temp_file(
    parent: &Path,
    file_name: &std::ffi::OsStr,
    label: &str,
) -> Result<(fs::File, PathBuf), StoreError> {
    let file_name = file_name
        .to_str()
        .ok_or_else(|| StoreError::File(format!("{} file name is not valid UTF-8", label)))?;
    for attempt in 0..MAX_TEMP_ATTEMPTS {
        let temp_name = format!(".{}.tmp.{}.{}", file_name, std::process::id(), attempt);
        let temp_path = parent.join(temp_name);
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path);
        match file {
            Ok(file) => return Ok((file, temp_path)),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(StoreError::File(format!(
                    "Failed to create temp {} file: {}",
                    label, err
                )));
            }
        }
    }
    Err(StoreError::File(format!(
        "Failed to create temp {} file after multiple attempts",
        label
    )))
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> Result<(), std::io::Error> {
    let dir = fs::File::open(parent)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.yaml");
        let read: Option<Vec<String>> = read_yaml_file(&path, "test").expect("read");
        assert!(read.is_none());
    }

    #[test]
    fn empty_file_reads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.yaml");
        fs::write(&path, "  \n").expect("write");
        let read: Option<Vec<String>> = read_yaml_file(&path, "test").expect("read");
        assert!(read.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("values.yaml");
        let values = vec!["one".to_string(), "two".to_string()];
        write_yaml_file(&path, "test", &values).expect("write");
        let read: Option<Vec<String>> = read_yaml_file(&path, "test").expect("read");
        assert_eq!(read, Some(values));
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_leaves_existing_file_untouched() {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};

        let temp = tempfile::tempdir().expect("tempdir");
        // Root bypasses directory write permissions, so the setup below
        // cannot make the write fail.
        if fs::metadata(temp.path()).expect("metadata").uid() == 0 {
            return;
        }
        let path = temp.path().join("values.yaml");
        fs::write(&path, "original\n").expect("write");

        let original_permissions = fs::metadata(temp.path())
            .expect("metadata")
            .permissions()
            .mode();
        let read_only = fs::Permissions::from_mode(original_permissions & 0o555);
        fs::set_permissions(temp.path(), read_only).expect("set read-only");

        let result = write_yaml_file(&path, "test", &vec!["changed".to_string()]);
        assert!(result.is_err());

        let restore = fs::Permissions::from_mode(original_permissions);
        fs::set_permissions(temp.path(), restore).expect("restore permissions");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content, "original\n");
    }
}
