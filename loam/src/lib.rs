// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod app_state;
pub mod config;
pub mod dashboard;
pub mod directives;
pub mod records;
pub mod runtime_paths;
pub mod templates;
pub mod uploads;
pub mod util;
