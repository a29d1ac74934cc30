// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::path::Path;

/// MIME type for a stored artifact: magic bytes first, then the file
/// extension, then `application/octet-stream`.
///
/// Content sniffing comes first because artifact extensions are taken from
/// whatever the browser submitted. SVG has no magic bytes, so the
/// extension fallback carries it.
pub fn detect_mime_type(file_path: &Path, file_content: &[u8]) -> String {
    infer::get(file_content)
        .map(|kind| kind.mime_type().to_string())
        .or_else(|| {
            mime_guess::from_path(file_path)
                .first()
                .map(|mime| mime.to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_png_from_magic_bytes() {
        let png_magic = [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        assert_eq!(
            detect_mime_type(Path::new("mystery.bin"), &png_magic),
            "image/png"
        );
    }

    #[test]
    fn falls_back_to_extension() {
        assert_eq!(
            detect_mime_type(Path::new("vector.svg"), b"<svg xmlns='x'/>"),
            "image/svg+xml"
        );
    }

    #[test]
    fn unknown_content_is_octet_stream() {
        assert_eq!(
            detect_mime_type(Path::new("noext"), b"plain text"),
            "application/octet-stream"
        );
    }
}
