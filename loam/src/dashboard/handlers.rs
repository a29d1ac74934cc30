// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::{SectionConfig, ValidatedConfig};
use crate::dashboard::form::FormError;
use crate::dashboard::{content, field_directives, form};
use crate::records::RecordId;
use crate::uploads::UploadError;
use crate::util::{detect_mime_type, is_temp_upload_name};
use actix_multipart::Multipart;
use actix_web::body::SizedStream;
use actix_web::{HttpResponse, Result, web};
use minijinja::context;
use serde::Deserialize;
use serde_json::Map;
use std::io::SeekFrom;
use tokio::io::{AsyncReadExt as _, AsyncSeekExt as _};
use tokio_util::io::ReaderStream;

pub const DASHBOARD_PATH: &str = "/dashboard";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(DASHBOARD_PATH)
            .route("/records/{section}/new", web::get().to(records_new))
            .route("/records/{section}", web::post().to(records_create))
            .route("/records/{section}/{id}/edit", web::get().to(records_edit))
            .route("/records/{section}/{id}", web::post().to(records_update)),
    );
}

#[derive(Deserialize)]
pub struct SectionPath {
    pub section: String,
}

#[derive(Deserialize)]
pub struct RecordPath {
    pub section: String,
    pub id: String,
}

#[derive(Deserialize)]
pub struct UploadPath {
    pub name: String,
}

async fn records_new(
    path: web::Path<SectionPath>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Some(section) = config.section(&path.section) else {
        return Ok(section_not_found(&path.section));
    };
    let action = format!("{}/records/{}", DASHBOARD_PATH, path.section);
    render_edit_page(&config, &app_state, &path.section, section, &action, &Map::new())
}

async fn records_edit(
    path: web::Path<RecordPath>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let Some(section) = config.section(&path.section) else {
        return Ok(section_not_found(&path.section));
    };
    let id = match RecordId::parse_hex(&path.id) {
        Ok(id) => id,
        Err(err) => return Ok(HttpResponse::BadRequest().body(err.to_string())),
    };
    let record = match app_state.records.load(&path.section, id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .body(format!("Record {} not found", id.hex())));
        }
        Err(err) => {
            log::error!("Failed to load record {}: {}", id.hex(), err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let action = format!("{}/records/{}/{}", DASHBOARD_PATH, path.section, id.hex());
    render_edit_page(&config, &app_state, &path.section, section, &action, &record)
}

async fn records_create(
    path: web::Path<SectionPath>,
    payload: Multipart,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = RecordId::generate();
    save_submission(&path.section, id, payload, &config, &app_state).await
}

async fn records_update(
    path: web::Path<RecordPath>,
    payload: Multipart,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = match RecordId::parse_hex(&path.id) {
        Ok(id) => id,
        Err(err) => return Ok(HttpResponse::BadRequest().body(err.to_string())),
    };
    save_submission(&path.section, id, payload, &config, &app_state).await
}

/// Parse, ingest, assemble, persist; shared by create and update.
async fn save_submission(
    section_name: &str,
    id: RecordId,
    payload: Multipart,
    config: &ValidatedConfig,
    app_state: &AppState,
) -> Result<HttpResponse> {
    let Some(section) = config.section(section_name) else {
        return Ok(section_not_found(section_name));
    };

    let uploads_dir = app_state.runtime_paths.uploads_dir.clone();
    let form = match form::parse_submission(payload, &uploads_dir, config.max_upload_bytes()).await
    {
        Ok(form) => form,
        Err(FormError::TooLarge { limit_bytes }) => {
            return Ok(HttpResponse::PayloadTooLarge()
                .body(format!("Uploads are limited to {} bytes", limit_bytes)));
        }
        Err(FormError::Multipart(err)) => {
            return Ok(HttpResponse::BadRequest().body(format!("Malformed submission: {}", err)));
        }
        Err(err) => {
            log::error!("Failed to receive submission: {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    let uploads = match content::ingest_files(form.files, uploads_dir).await {
        Ok(uploads) => uploads,
        Err(content::ContentError::Upload(UploadError::Decode(err))) => {
            return Ok(HttpResponse::BadRequest()
                .body(format!("Uploaded file is not a readable image: {}", err)));
        }
        Err(err) => {
            log::error!("Upload ingestion failed: {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    let assembled = content::assemble_content(section, &form.params, &uploads);
    if let Err(err) = app_state.records.save(section_name, id, &assembled) {
        log::error!("Failed to save record {}: {}", id.hex(), err);
        return Ok(HttpResponse::InternalServerError().finish());
    }

    log::info!("Saved record {} in section '{}'", id.hex(), section_name);
    let location = format!("{}/records/{}/{}/edit", DASHBOARD_PATH, section_name, id.hex());
    Ok(HttpResponse::Found()
        .insert_header(("Location", location))
        .finish())
}

/// Serve one stored artifact from the uploads directory, streamed rather
/// than buffered; uploads can be arbitrarily large within the configured
/// limit.
pub async fn serve_upload(
    path: web::Path<UploadPath>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let name = &path.name;
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || is_temp_upload_name(name)
    {
        return Ok(HttpResponse::NotFound().finish());
    }

    let file_path = app_state.runtime_paths.uploads_dir.join(name);
    let mut file = match tokio::fs::File::open(&file_path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound().finish());
        }
        Err(err) => {
            log::error!("Failed to open upload '{}': {}", name, err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let file_size = match file.metadata().await {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            log::error!("Failed to stat upload '{}': {}", name, err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    // Sniff the leading bytes for the MIME type, then rewind to stream.
    let mut head = [0u8; 512];
    let head_len = match file.read(&mut head).await {
        Ok(read) => read,
        Err(err) => {
            log::error!("Failed to read upload '{}': {}", name, err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    if let Err(err) = file.seek(SeekFrom::Start(0)).await {
        log::error!("Failed to rewind upload '{}': {}", name, err);
        return Ok(HttpResponse::InternalServerError().finish());
    }
    let mime = detect_mime_type(&file_path, &head[..head_len]);

    let stream = ReaderStream::new(file);
    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Content-Length", file_size.to_string()))
        .body(SizedStream::new(file_size, stream)))
}

fn render_edit_page(
    config: &ValidatedConfig,
    app_state: &AppState,
    section_name: &str,
    section: &SectionConfig,
    action: &str,
    record_content: &Map<String, serde_json::Value>,
) -> Result<HttpResponse> {
    let fields: Vec<_> = field_directives(section)
        .iter()
        .map(|(name, directive)| {
            context! {
                label => field_label(name),
                input => directive.input(&format!("content[{}]", name), record_content.get(name)),
            }
        })
        .collect();

    let rendered = app_state
        .templates
        .get_template("records/edit.html")
        .and_then(|template| {
            template.render(context! {
                site_name => config.site_name,
                title => section.display_label(section_name),
                action => action,
                fields => fields,
            })
        });
    match rendered {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html)),
        Err(err) => {
            log::error!("Failed to render edit page: {}", err);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

fn section_not_found(name: &str) -> HttpResponse {
    HttpResponse::NotFound().body(format!("Section '{}' not found", name))
}

fn field_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
