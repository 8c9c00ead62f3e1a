// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_description")]
    pub description: String,
}

fn default_app_name() -> String {
    "Stockroom".to_string()
}

fn default_app_description() -> String {
    "Inventory backend for devices, items, and tags".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            description: default_app_description(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8440
}

fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: u64,
}

fn default_token_ttl_minutes() -> u64 {
    12 * 60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Raw configuration as read from config.yaml. Validate into a
/// [`ValidatedConfig`] before use.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MIN_SECRET_LENGTH: usize = 32;

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| {
            ConfigError::LoadError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                err
            ))
        })?;
        serde_yaml::from_str(&content).map_err(|err| {
            ConfigError::LoadError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                err
            ))
        })
    }

    pub fn load_and_validate(path: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load(path)?.validate()
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.auth.jwt_secret.trim().len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::ValidationError(format!(
                "auth.jwt_secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }
        if self.auth.token_ttl_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_minutes must be at least 1".to_string(),
            ));
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(ValidatedConfig {
            app: self.app,
            server: self.server,
            auth: self.auth,
            logging: LoggingConfig { level },
        })
    }
}

impl ValidatedConfig {
    pub fn address_tuple(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

/// Rendered on first run by the bootstrap; every field is explicit so the
/// operator sees the full surface.
pub fn default_config_yaml(jwt_secret: &str) -> String {
    format!(
        "app:\n  name: \"{name}\"\n  description: \"{description}\"\nserver:\n  host: \"{host}\"\n  port: {port}\n  workers: {workers}\nauth:\n  jwt_secret: \"{secret}\"\n  token_ttl_minutes: {ttl}\nlogging:\n  level: \"{level}\"\n",
        name = default_app_name(),
        description = default_app_description(),
        host = default_host(),
        port = default_port(),
        workers = default_workers(),
        secret = jwt_secret,
        ttl = default_token_ttl_minutes(),
        level = default_log_level(),
    )
}
