// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::Environment;

use crate::records::RecordStore;
use crate::runtime_paths::RuntimePaths;
use crate::templates;

/// Shared per-process state handed to handlers explicitly; no globals.
pub struct AppState {
    pub templates: Environment<'static>,
    pub runtime_paths: RuntimePaths,
    pub records: RecordStore,
}

impl AppState {
    pub fn new(runtime_paths: RuntimePaths) -> Result<Self, minijinja::Error> {
        let records = RecordStore::new(runtime_paths.records_dir.clone());
        Ok(AppState {
            templates: templates::build_environment()?,
            runtime_paths,
            records,
        })
    }
}
