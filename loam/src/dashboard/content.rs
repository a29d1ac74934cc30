// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Content assembly for record create/update.
//!
//! Merges submitted scalar params, freshly ingested upload artifacts, and
//! destroy markers into the content map that gets persisted. Only fields
//! the section declares are ever written; everything else is dropped.

use crate::config::SectionConfig;
use crate::dashboard::field_directives;
use crate::dashboard::form::{FieldPath, ParamKind, UploadedFile};
use crate::uploads::{UploadError, store_upload};
use actix_web::web;
use futures_util::future::try_join_all;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// An upload that has already been written to the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub field: String,
    pub slot: Option<usize>,
    pub artifact: String,
}

#[derive(Debug)]
pub enum ContentError {
    Upload(UploadError),
    Canceled(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Upload(err) => write!(f, "upload ingestion failed: {}", err),
            ContentError::Canceled(msg) => write!(f, "upload ingestion canceled: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}

/// Ingest submitted files off the request thread, preserving submission
/// order. Each file is independent; a single failure fails the request.
pub async fn ingest_files(
    files: Vec<UploadedFile>,
    uploads_dir: PathBuf,
) -> Result<Vec<PreparedUpload>, ContentError> {
    let tasks: Vec<_> = files
        .into_iter()
        .map(|file| {
            let uploads_dir = uploads_dir.clone();
            web::block(move || {
                let artifact =
                    store_upload(file.temp.path(), &file.original_filename, &uploads_dir)?;
                Ok(PreparedUpload {
                    field: file.path.field,
                    slot: file.path.index,
                    artifact,
                })
            })
        })
        .collect();

    let joined = try_join_all(tasks)
        .await
        .map_err(|err| ContentError::Canceled(err.to_string()))?;
    joined
        .into_iter()
        .collect::<Result<Vec<_>, UploadError>>()
        .map_err(ContentError::Upload)
}

/// Build the content map for one submission.
pub fn assemble_content(
    section: &SectionConfig,
    params: &[(FieldPath, String)],
    uploads: &[PreparedUpload],
) -> Map<String, Value> {
    let directives = field_directives(section);
    let mut content = Map::new();

    // Submitted scalar values, restricted to declared fields.
    for (name, directive) in &directives {
        if directive.is_multiple() {
            if let Some(values) = collect_indexed_values(params, name) {
                content.insert(
                    name.clone(),
                    Value::Array(values.into_iter().map(Value::String).collect()),
                );
            }
        } else if let Some(value) = last_scalar(params, name) {
            content.insert(name.clone(), Value::String(value));
        }
    }

    // Newly ingested files.
    for upload in uploads {
        let Some((_, directive)) = directives.iter().find(|(name, _)| name == &upload.field)
        else {
            continue;
        };
        if directive.is_multiple() {
            let mut values = take_string_list(&mut content, &upload.field);
            place_artifact(&mut values, upload);
            content.insert(
                upload.field.clone(),
                Value::Array(values.into_iter().map(Value::String).collect()),
            );
        } else {
            content.insert(upload.field.clone(), Value::String(upload.artifact.clone()));
        }
    }

    // Destroy markers, applied last.
    for (name, directive) in &directives {
        if directive.is_multiple() {
            let marked = destroy_indices(params, name);
            if marked.is_empty() {
                continue;
            }
            let mut values = take_string_list(&mut content, name);
            // Reverse order so earlier removals don't shift pending indices.
            for index in marked.iter().rev() {
                if *index < values.len() {
                    values.remove(*index);
                }
            }
            content.insert(
                name.clone(),
                Value::Array(values.into_iter().map(Value::String).collect()),
            );
        } else if has_destroy_marker(params, name) {
            content.remove(name);
        }
    }

    content
}

/// Slot placement for one new artifact in a multi-valued field.
///
/// Already-present names are skipped so re-submitting the same bytes is a
/// no-op. Otherwise the first cleared (empty) slot wins, then the slot the
/// form-field index names, then append.
fn place_artifact(values: &mut Vec<String>, upload: &PreparedUpload) {
    if values.iter().any(|value| value == &upload.artifact) {
        return;
    }
    if let Some(empty) = values.iter().position(|value| value.is_empty()) {
        values[empty] = upload.artifact.clone();
        return;
    }
    match upload.slot {
        Some(slot) if slot < values.len() => values[slot] = upload.artifact.clone(),
        _ => values.push(upload.artifact.clone()),
    }
}

fn collect_indexed_values(params: &[(FieldPath, String)], field: &str) -> Option<Vec<String>> {
    let mut indexed: BTreeMap<usize, String> = BTreeMap::new();
    let mut appended: Vec<String> = Vec::new();
    let mut seen = false;

    for (path, value) in params {
        if path.kind != ParamKind::Content || path.field != field {
            continue;
        }
        seen = true;
        match path.index {
            Some(index) => {
                indexed.insert(index, value.clone());
            }
            None => appended.push(value.clone()),
        }
    }

    if !seen {
        return None;
    }
    let mut values: Vec<String> = indexed.into_values().collect();
    values.extend(appended);
    Some(values)
}

fn last_scalar(params: &[(FieldPath, String)], field: &str) -> Option<String> {
    params
        .iter()
        .filter(|(path, _)| path.kind == ParamKind::Content && path.field == field)
        .map(|(_, value)| value.clone())
        .next_back()
}

fn destroy_indices(params: &[(FieldPath, String)], field: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = params
        .iter()
        .filter(|(path, value)| {
            path.kind == ParamKind::Destroy && path.field == field && value == "on"
        })
        .filter_map(|(path, _)| path.index)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

fn has_destroy_marker(params: &[(FieldPath, String)], field: &str) -> bool {
    params
        .iter()
        .any(|(path, value)| path.kind == ParamKind::Destroy && path.field == field && value == "on")
}

fn take_string_list(content: &mut Map<String, Value>, field: &str) -> Vec<String> {
    match content.remove(field) {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(text) => text,
                _ => String::new(),
            })
            .collect(),
        Some(Value::String(scalar)) => vec![scalar],
        _ => Vec::new(),
    }
}
