// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::directives::{
    DirectiveSettings, attr_fragment, multiple_inputs, value_as_list, value_as_scalar,
};
use crate::util::escape_html;
use serde_json::Value;

/// Plain text field, also the fallback for unknown declared types.
#[derive(Debug, Clone)]
pub struct TextDirective {
    settings: DirectiveSettings,
}

impl TextDirective {
    pub fn new(settings: DirectiveSettings) -> Self {
        TextDirective { settings }
    }

    pub fn settings(&self) -> &DirectiveSettings {
        &self.settings
    }

    pub fn input(&self, name: &str, value: Option<&Value>) -> String {
        if self.settings.options.multiple {
            let values = value_as_list(value);
            multiple_inputs(name, &values, |slot_name, slot_value| {
                self.single_input(slot_name, slot_value)
            })
        } else {
            let value = value_as_scalar(value).unwrap_or_else(|| self.settings.options.default.clone());
            self.single_input(name, &value)
        }
    }

    pub fn render(&self, value: Option<&Value>) -> Option<String> {
        if self.settings.options.multiple {
            let rendered: Vec<String> = value_as_list(value)
                .into_iter()
                .filter(|entry| !entry.is_empty())
                .map(|entry| escape_html(&entry))
                .collect();
            return Some(rendered.join(""));
        }

        let effective = match value_as_scalar(value) {
            Some(scalar) if !scalar.is_empty() => scalar,
            _ => self.settings.options.default.clone(),
        };
        if effective.is_empty() {
            return None;
        }
        Some(escape_html(&effective))
    }

    // Text output has no headless form, so a preview is just a render.
    pub fn preview(&self, value: Option<&Value>) -> Option<String> {
        self.render(value)
    }

    fn single_input(&self, name: &str, value: &str) -> String {
        format!(
            "<input type=\"text\" name=\"{}\" value=\"{}\"{}>",
            escape_html(name),
            escape_html(value),
            self.html_attrs()
        )
    }

    fn html_attrs(&self) -> String {
        let mut attrs = attr_fragment(&[
            ("class", self.settings.attrs.class.clone()),
            ("placeholder", self.settings.attrs.placeholder.clone()),
        ]);
        if self.settings.attrs.required {
            attrs.push_str(" required");
        }
        attrs
    }
}
