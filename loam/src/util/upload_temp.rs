// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Prefix for files spooled into the uploads directory while a submission
/// is in flight. Spool files land next to their destination so the final
/// rename stays on one filesystem.
pub const TEMP_UPLOAD_PREFIX: &str = ".loam-upload-";

/// True for names that belong to in-flight spool files rather than stored
/// artifacts. The upload-serving route refuses these outright.
pub fn is_temp_upload_name(name: &str) -> bool {
    name.starts_with(TEMP_UPLOAD_PREFIX) || name.ends_with(".tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_temp_names() {
        assert!(is_temp_upload_name(".loam-upload-1234"));
        assert!(is_temp_upload_name("photo.jpg.tmp"));
        assert!(!is_temp_upload_name("photo-abc123.jpg"));
        assert!(!is_temp_upload_name("tmp.jpg"));
    }
}
