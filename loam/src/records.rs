// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Flat-file record persistence.
//!
//! One JSON document per record at `records/<section>/<id>.json`. This is
//! the thin persistence collaborator of the dashboard; the interesting
//! logic lives in content assembly, not here.

use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    pub fn parse_hex(raw: &str) -> Result<RecordId, StoreError> {
        let trimmed = raw.trim();
        if trimmed.len() != 16 || !trimmed.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidId(raw.to_string()));
        }
        u64::from_str_radix(trimmed, 16)
            .map(RecordId)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    pub fn generate() -> RecordId {
        RecordId(Uuid::new_v4().as_u128() as u64)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidId(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "record I/O failed: {}", err),
            StoreError::Json(err) => write!(f, "record parse failed: {}", err),
            StoreError::InvalidId(raw) => write!(f, "record id '{}' must be 16 hex chars", raw),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    records_dir: PathBuf,
}

impl RecordStore {
    pub fn new(records_dir: PathBuf) -> Self {
        RecordStore { records_dir }
    }

    fn record_path(&self, section: &str, id: RecordId) -> PathBuf {
        self.records_dir.join(section).join(format!("{}.json", id.hex()))
    }

    pub fn load(
        &self,
        section: &str,
        id: RecordId,
    ) -> Result<Option<Map<String, Value>>, StoreError> {
        let path = self.record_path(section, id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let content: Map<String, Value> = serde_json::from_str(&raw)?;
        Ok(Some(content))
    }

    /// Write a record atomically via temp-file + rename.
    pub fn save(
        &self,
        section: &str,
        id: RecordId,
        content: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let path = self.record_path(section, id);
        let parent = path.parent().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "record path has no parent",
            ))
        })?;
        fs::create_dir_all(parent)?;

        let rendered = serde_json::to_string_pretty(&Value::Object(content.clone()))?;
        let mut temp_path = path.clone();
        let temp_name = match path.file_name() {
            Some(name) => format!("{}.tmp", name.to_string_lossy()),
            None => "record.tmp".to_string(),
        };
        temp_path.set_file_name(temp_name);

        fs::write(&temp_path, rendered)?;
        fs::rename(temp_path, path)?;
        Ok(())
    }
}
