// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Multipart submission parsing.
//!
//! Form fields follow the naming convention the directives render:
//! `content[<field>]`, `content[<field>][<i>]`, and the matching
//! `_destroy[...]` namespace for delete checkboxes.

use crate::util::TEMP_UPLOAD_PREFIX;
use actix_multipart::Multipart;
use futures_util::StreamExt as _;
use regex::Regex;
use std::io::Write as _;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Content,
    Destroy,
}

/// A parsed form-field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub kind: ParamKind,
    pub field: String,
    pub index: Option<usize>,
}

impl FieldPath {
    /// Parse a submitted field name.
    ///
    /// `content[photos][2]` carries slot index 2; `content[photos][]` and
    /// plain `content[photo]` carry none. Names with a recognizable field
    /// but a malformed index segment keep the field and drop the index,
    /// which downstream turns into append-if-absent. Names outside both
    /// namespaces are `None` and ignored by the caller.
    pub fn parse(raw: &str) -> Option<FieldPath> {
        static FULL: OnceLock<Regex> = OnceLock::new();
        static LENIENT: OnceLock<Regex> = OnceLock::new();

        let full = FULL.get_or_init(|| {
            Regex::new(r"^(content|_destroy)\[([^\[\]]+)\](?:\[(\d*)\])?$")
                .unwrap_or_else(|e| unreachable!("field pattern: {}", e))
        });
        if let Some(captures) = full.captures(raw) {
            return Some(FieldPath {
                kind: kind_from_namespace(&captures[1]),
                field: captures[2].to_string(),
                index: captures.get(3).and_then(|m| m.as_str().parse().ok()),
            });
        }

        let lenient = LENIENT.get_or_init(|| {
            Regex::new(r"^(content|_destroy)\[([^\[\]]+)\]")
                .unwrap_or_else(|e| unreachable!("field pattern: {}", e))
        });
        lenient.captures(raw).map(|captures| FieldPath {
            kind: kind_from_namespace(&captures[1]),
            field: captures[2].to_string(),
            index: None,
        })
    }
}

fn kind_from_namespace(namespace: &str) -> ParamKind {
    if namespace == "_destroy" {
        ParamKind::Destroy
    } else {
        ParamKind::Content
    }
}

/// One file received in a submission, spooled to a temp file that is
/// removed on drop.
#[derive(Debug)]
pub struct UploadedFile {
    pub path: FieldPath,
    pub original_filename: String,
    pub temp: NamedTempFile,
}

#[derive(Debug, Default)]
pub struct SubmittedForm {
    pub params: Vec<(FieldPath, String)>,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug)]
pub enum FormError {
    Multipart(actix_multipart::MultipartError),
    Io(std::io::Error),
    TooLarge { limit_bytes: u64 },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::Multipart(err) => write!(f, "multipart parse failed: {}", err),
            FormError::Io(err) => write!(f, "submission I/O failed: {}", err),
            FormError::TooLarge { limit_bytes } => {
                write!(f, "uploaded file exceeds the {} byte limit", limit_bytes)
            }
        }
    }
}

impl std::error::Error for FormError {}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Io(err)
    }
}

/// Drain a multipart payload into scalar params and spooled files.
///
/// Unparseable field names and empty file pickers are dropped. Temp files
/// land next to their final destination so the later rename stays on one
/// filesystem.
pub async fn parse_submission(
    mut payload: Multipart,
    uploads_dir: &Path,
    max_bytes: Option<u64>,
) -> Result<SubmittedForm, FormError> {
    let mut form = SubmittedForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(FormError::Multipart)?;
        let (raw_name, filename) = {
            let Some(disposition) = field.content_disposition() else {
                continue;
            };
            let Some(name) = disposition.get_name().map(str::to_owned) else {
                continue;
            };
            (name, disposition.get_filename().map(str::to_owned))
        };
        let Some(path) = FieldPath::parse(&raw_name) else {
            // Not a form field we render; drain and ignore.
            while let Some(chunk) = field.next().await {
                chunk.map_err(FormError::Multipart)?;
            }
            continue;
        };

        match filename {
            Some(filename) if !filename.is_empty() => {
                let mut temp = tempfile::Builder::new()
                    .prefix(TEMP_UPLOAD_PREFIX)
                    .suffix(".tmp")
                    .tempfile_in(uploads_dir)?;
                let mut written: u64 = 0;
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(FormError::Multipart)?;
                    written += chunk.len() as u64;
                    if let Some(limit) = max_bytes {
                        if written > limit {
                            return Err(FormError::TooLarge { limit_bytes: limit });
                        }
                    }
                    temp.write_all(&chunk)?;
                }
                if written == 0 {
                    // An untouched file picker submits an empty part.
                    continue;
                }
                temp.flush()?;
                form.files.push(UploadedFile {
                    path,
                    original_filename: filename,
                    temp,
                });
            }
            _ => {
                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(FormError::Multipart)?;
                    data.extend_from_slice(&chunk);
                }
                form.params
                    .push((path, String::from_utf8_lossy(&data).into_owned()));
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_content_names() {
        let path = FieldPath::parse("content[title]").expect("parse");
        assert_eq!(path.kind, ParamKind::Content);
        assert_eq!(path.field, "title");
        assert_eq!(path.index, None);
    }

    #[test]
    fn parses_indexed_names() {
        let path = FieldPath::parse("content[photos][2]").expect("parse");
        assert_eq!(path.field, "photos");
        assert_eq!(path.index, Some(2));
    }

    #[test]
    fn empty_brackets_mean_no_index() {
        let path = FieldPath::parse("content[photos][]").expect("parse");
        assert_eq!(path.index, None);
    }

    #[test]
    fn parses_destroy_names() {
        let path = FieldPath::parse("_destroy[photos][0]").expect("parse");
        assert_eq!(path.kind, ParamKind::Destroy);
        assert_eq!(path.field, "photos");
        assert_eq!(path.index, Some(0));
    }

    #[test]
    fn malformed_index_falls_back_to_no_index() {
        let path = FieldPath::parse("content[photos][two]").expect("parse");
        assert_eq!(path.field, "photos");
        assert_eq!(path.index, None);
    }

    #[test]
    fn unrelated_names_do_not_parse() {
        assert_eq!(FieldPath::parse("csrf_token"), None);
        assert_eq!(FieldPath::parse("content"), None);
        assert_eq!(FieldPath::parse("attachment[photo]"), None);
    }
}
