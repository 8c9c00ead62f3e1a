// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{self, Config, ConfigError, ValidatedConfig};
use crate::runtime_paths::RuntimePaths;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug)]
pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
}

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Io(std::io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(err) => write!(f, "{}", err),
            BootstrapError::Io(err) => write!(f, "Bootstrap I/O error: {}", err),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Config(err) => Some(err),
            BootstrapError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

/// Prepares the runtime root: writes a default config on first run, then
/// loads and validates it and makes sure the data directory exists.
pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    fs::create_dir_all(root)?;
    let runtime_paths = RuntimePaths::new(root);

    let created_config = ensure_config(&runtime_paths)?;
    let validated_config = Config::load_and_validate(&runtime_paths.config_file)?;

    fs::create_dir_all(&runtime_paths.data_dir)?;

    Ok(BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
    })
}

fn ensure_config(runtime_paths: &RuntimePaths) -> Result<bool, BootstrapError> {
    if runtime_paths.config_file.exists() {
        return Ok(false);
    }

    let secret = generate_jwt_secret();
    fs::write(
        &runtime_paths.config_file,
        config::default_config_yaml(&secret),
    )?;
    log_action(format!(
        "created {} with a generated JWT secret",
        runtime_paths.config_file.display()
    ));
    Ok(true)
}

fn generate_jwt_secret() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

pub(crate) fn log_action(message: impl AsRef<str>) {
    eprintln!("[bootstrap] {}", message.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_defaults_when_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = bootstrap_runtime(temp.path()).expect("bootstrap");
        assert!(result.created_config);
        assert!(result.runtime_paths.config_file.exists());
        assert!(result.runtime_paths.data_dir.is_dir());
        assert_eq!(result.validated_config.app.name, "Stockroom");
    }

    #[test]
    fn bootstrap_keeps_existing_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let first = bootstrap_runtime(temp.path()).expect("first bootstrap");
        let second = bootstrap_runtime(temp.path()).expect("second bootstrap");
        assert!(first.created_config);
        assert!(!second.created_config);
        assert_eq!(
            first.validated_config.auth.jwt_secret,
            second.validated_config.auth.jwt_secret
        );
    }

    #[test]
    fn bootstrap_rejects_invalid_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = RuntimePaths::new(temp.path());
        fs::write(&paths.config_file, "auth:\n  jwt_secret: \"short\"\n").expect("write config");
        match bootstrap_runtime(temp.path()) {
            Err(BootstrapError::Config(ConfigError::ValidationError(_))) => {}
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn generated_secret_is_long_enough() {
        assert!(generate_jwt_secret().len() >= 32);
    }
}
