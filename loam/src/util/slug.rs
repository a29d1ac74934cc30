// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Normalize a file base name to snake_case.
///
/// Words are split on non-alphanumeric runs and on lower-to-upper camel
/// boundaries, then lowercased and joined with underscores. Used for the
/// human-readable half of artifact names, so uploads of `MyPhoto (1).JPG`
/// and `my-photo 1.jpg` with identical bytes land on the same name.
pub fn snake_case(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if previous_lower && ch.is_uppercase() && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = ch.is_lowercase() || ch.is_numeric();
            for lowered in ch.to_lowercase() {
                current.push(lowered);
            }
        } else {
            previous_lower = false;
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("_")
}
