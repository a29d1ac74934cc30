// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::uploads::is_animated_gif;
use crate::util::snake_case;
use image::metadata::Orientation;
use image::{DynamicImage, ImageReader};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;
use std::path::Path;

// 128 bits of SHA-256 as lowercase hex.
const CHECKSUM_HEX_LEN: usize = 32;

#[derive(Debug)]
pub enum UploadError {
    Io(std::io::Error),
    Decode(image::ImageError),
    Encode(image::ImageError),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Io(err) => write!(f, "upload I/O failed: {}", err),
            UploadError::Decode(err) => write!(f, "image decode failed: {}", err),
            UploadError::Encode(err) => write!(f, "image encode failed: {}", err),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err)
    }
}

/// Deterministic artifact name for one uploaded file.
///
/// `snake_case(stem)-<checksum><ext>`, where the checksum is derived from
/// the file bytes alone. Identical bytes under names sharing a normalized
/// stem always map to the same artifact, which deduplicates re-uploads and
/// makes the resulting URLs safely immutable.
pub fn artifact_name(original_filename: &str, bytes: &[u8]) -> String {
    let original = Path::new(original_filename);
    let stem = original
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut base = snake_case(&stem);
    if base.is_empty() {
        base = "file".to_string();
    }
    let extension = original
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let digest = Sha256::digest(bytes);
    let mut checksum = String::with_capacity(CHECKSUM_HEX_LEN);
    for byte in digest.iter().take(CHECKSUM_HEX_LEN / 2) {
        checksum.push_str(&format!("{:02x}", byte));
    }

    format!("{}-{}{}", base, checksum, extension)
}

/// Ingest one submitted file into the uploads directory.
///
/// Animated GIFs and SVGs are copied verbatim; re-encoding would destroy
/// the animation or is unsupported. Everything else is decoded, rotated
/// upright per its embedded orientation metadata, and re-encoded, which
/// also strips the metadata. Returns the artifact name for the content map.
pub fn store_upload(
    temp_path: &Path,
    original_filename: &str,
    uploads_dir: &Path,
) -> Result<String, UploadError> {
    let bytes = fs::read(temp_path)?;
    let file_name = artifact_name(original_filename, &bytes);
    let destination = uploads_dir.join(&file_name);

    let extension = Path::new(original_filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    if is_animated_gif(&bytes) || extension.as_deref() == Some("svg") {
        fs::write(&destination, &bytes)?;
        return Ok(file_name);
    }

    let mut decoder = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(UploadError::Io)?
        .into_decoder()
        .map_err(UploadError::Decode)?;
    // Missing or unreadable orientation metadata means no transform.
    let orientation = image::ImageDecoder::orientation(&mut decoder)
        .unwrap_or(Orientation::NoTransforms);
    let mut decoded = DynamicImage::from_decoder(decoder).map_err(UploadError::Decode)?;
    decoded.apply_orientation(orientation);
    decoded.save(&destination).map_err(UploadError::Encode)?;

    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_normalizes_the_stem() {
        let name = artifact_name("My Photo.JPG", b"bytes");
        assert!(name.starts_with("my_photo-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn identical_bytes_share_an_artifact_name() {
        let first = artifact_name("photo.jpg", b"same bytes");
        let second = artifact_name("Photo.jpg", b"same bytes");
        assert_eq!(first, second);
    }

    #[test]
    fn different_bytes_produce_different_names() {
        let first = artifact_name("photo.jpg", b"one");
        let second = artifact_name("photo.jpg", b"two");
        assert_ne!(first, second);
    }

    #[test]
    fn checksum_is_32_hex_characters() {
        let name = artifact_name("photo.jpg", b"bytes");
        let checksum = name
            .strip_prefix("photo-")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .expect("digest segment");
        assert_eq!(checksum.len(), 32);
        assert!(checksum.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn nameless_files_get_a_placeholder_stem() {
        let name = artifact_name("...", b"bytes");
        assert!(name.starts_with("file-"));
    }
}
