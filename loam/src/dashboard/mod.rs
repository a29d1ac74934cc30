// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Dashboard request handling: record edit forms, multipart submissions,
//! and serving stored upload artifacts.

pub mod content;
pub mod form;
pub mod handlers;

pub use handlers::configure;

use crate::config::SectionConfig;
use crate::directives::Directive;

/// Directives for a section's declared fields, in declaration order.
pub fn field_directives(section: &SectionConfig) -> Vec<(String, Directive)> {
    section
        .fields
        .iter()
        .map(|(name, declaration)| (name.clone(), Directive::from_declaration(declaration)))
        .collect()
}
