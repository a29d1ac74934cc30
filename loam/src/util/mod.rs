// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod html;
pub mod mime_helper;
pub mod slug;
pub mod test_fixtures;
pub mod upload_temp;

// Re-export commonly used items for convenience
pub use html::escape_html;
pub use mime_helper::detect_mime_type;
pub use slug::snake_case;
pub use upload_temp::{TEMP_UPLOAD_PREFIX, is_temp_upload_name};
