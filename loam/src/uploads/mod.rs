// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Upload ingestion: content-addressed artifact names and format-aware
//! transcoding into the uploads directory.

mod animated;
mod ingest;

pub use animated::is_animated_gif;
pub use ingest::{UploadError, artifact_name, store_upload};
