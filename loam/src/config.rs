// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
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
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4680
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64, // 0 means unlimited
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

fn default_max_file_size_mb() -> u64 {
    32
}

/// One section of the site: a named group of field declarations.
///
/// Field declarations are kept as raw JSON maps; the directive layer extracts
/// the keys it recognizes and silently drops the rest.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SectionConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SectionConfig {
    pub fn display_label(&self, name: &str) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionConfig>,
}

fn default_site_name() -> String {
    "Loam Site".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            site_name: default_site_name(),
            server: ServerConfig::default(),
            upload: UploadConfig::default(),
            sections: BTreeMap::new(),
        }
    }
}

/// Configuration after validation. Handlers only ever see this form.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub site_name: String,
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub sections: BTreeMap<String, SectionConfig>,
}

impl ValidatedConfig {
    pub fn from_app_config(config: AppConfig) -> Result<Self, ConfigError> {
        if config.site_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "site_name must not be empty".to_string(),
            ));
        }
        if config.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        for name in config.sections.keys() {
            if name.trim().is_empty() || !name.chars().all(is_section_name_char) {
                return Err(ConfigError::ValidationError(format!(
                    "section name '{}' must be lowercase alphanumeric with dashes or underscores",
                    name
                )));
            }
        }
        Ok(ValidatedConfig {
            site_name: config.site_name,
            server: config.server,
            upload: config.upload,
            sections: config.sections,
        })
    }

    pub fn section(&self, name: &str) -> Option<&SectionConfig> {
        self.sections.get(name)
    }

    pub fn max_upload_bytes(&self) -> Option<u64> {
        match self.upload.max_file_size_mb {
            0 => None,
            mb => Some(mb * 1024 * 1024),
        }
    }
}

fn is_section_name_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_'
}

/// Load `config.yaml` from disk, writing a default when missing.
pub fn load_or_create(config_file: &Path) -> Result<ValidatedConfig, ConfigError> {
    if !config_file.exists() {
        let default = AppConfig::default();
        let rendered = serde_yaml::to_string(&default).map_err(|e| {
            ConfigError::LoadError(format!("Failed to render default config: {}", e))
        })?;
        fs::write(config_file, rendered).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to write default config '{}': {}",
                config_file.display(),
                e
            ))
        })?;
        log::info!("Created default configuration at {}", config_file.display());
    }

    let raw = fs::read_to_string(config_file).map_err(|e| {
        ConfigError::LoadError(format!(
            "Failed to read config '{}': {}",
            config_file.display(),
            e
        ))
    })?;
    let config: AppConfig = serde_yaml::from_str(&raw).map_err(|e| {
        ConfigError::LoadError(format!(
            "Failed to parse config '{}': {}",
            config_file.display(),
            e
        ))
    })?;
    ValidatedConfig::from_app_config(config)
}
