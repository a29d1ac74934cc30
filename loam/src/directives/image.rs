// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::directives::{
    DirectiveSettings, attr_fragment, multiple_inputs, value_as_list, value_as_scalar,
};
use crate::util::escape_html;
use serde_json::Value;

/// Image field backed by files under `/uploads/`.
///
/// Content values are artifact names produced by upload ingestion; this
/// directive renders the picker/preview form groups for them and the
/// `<img>` (or raw path) display markup.
#[derive(Debug, Clone)]
pub struct ImageDirective {
    settings: DirectiveSettings,
}

impl ImageDirective {
    pub fn new(settings: DirectiveSettings) -> Self {
        ImageDirective { settings }
    }

    pub fn settings(&self) -> &DirectiveSettings {
        &self.settings
    }

    /// Inputs to upload, preview, and optionally remove images.
    pub fn input(&self, name: &str, value: Option<&Value>) -> String {
        if self.settings.options.multiple {
            // Existing values in multi groups are always deletable, so the
            // required flag is dropped for the individual slots.
            let values = value_as_list(value);
            multiple_inputs(name, &values, |slot_name, slot_value| {
                self.single_input(slot_name, slot_value, false)
            })
        } else {
            let value = value_as_scalar(value)
                .unwrap_or_else(|| self.settings.options.default.clone());
            self.single_input(name, &value, self.settings.attrs.required)
        }
    }

    /// `<img>` tag(s) or raw src path(s), depending on the `tag` option.
    pub fn render(&self, value: Option<&Value>) -> Option<String> {
        self.render_with_tag(value, self.settings.options.tag)
    }

    /// A preview always renders a tag, even for raw-path configured fields.
    pub fn preview(&self, value: Option<&Value>) -> Option<String> {
        self.render_with_tag(value, true)
    }

    fn render_with_tag(&self, value: Option<&Value>, tag: bool) -> Option<String> {
        if self.settings.options.multiple {
            let rendered: Vec<String> = value_as_list(value)
                .iter()
                .filter_map(|file_name| self.render_single(file_name, tag))
                .collect();
            return Some(rendered.join(""));
        }

        let file_name = value_as_scalar(value)?;
        self.render_single(&file_name, tag)
    }

    fn render_single(&self, file_name: &str, tag: bool) -> Option<String> {
        if file_name.is_empty() {
            return None;
        }

        let src = format!("/uploads/{}{}", file_name, self.query_string());
        if tag {
            Some(format!("<img src=\"{}\"{}>", escape_html(&src), self.tag_attrs()))
        } else {
            Some(src)
        }
    }

    fn single_input(&self, name: &str, value: &str, required: bool) -> String {
        let inputs = format!(
            "<input type=\"file\" name=\"{name}\" accept=\"image/*\"><input type=\"hidden\" name=\"{name}\" value=\"{value}\">",
            name = escape_html(name),
            value = escape_html(value),
        );
        let preview = if value.is_empty() {
            String::new()
        } else {
            format!(
                "<img class=\"preview\" src=\"/uploads/{}\">",
                escape_html(value)
            )
        };
        let destroy = if !required && !preview.is_empty() {
            format!(
                "<div class=\"checkbox\"><input type=\"checkbox\" name=\"{}\"><label>Delete</label></div>",
                escape_html(&name.replacen("content", "_destroy", 1))
            )
        } else {
            String::new()
        };

        format!("<div class=\"previewable\">{inputs}{preview}{destroy}</div>")
    }

    /// Resize hints as a `?w=&h=` query suffix for the upload URL.
    fn query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(width) = self.settings.attrs.width {
            parts.push(format!("w={}", width));
        }
        if let Some(height) = self.settings.attrs.height {
            parts.push(format!("h={}", height));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }

    fn tag_attrs(&self) -> String {
        attr_fragment(&[
            ("class", self.settings.attrs.class.clone()),
            ("alt", self.settings.attrs.alt.clone()),
            (
                "width",
                self.settings.attrs.width.map(|w| w.to_string()).unwrap_or_default(),
            ),
            (
                "height",
                self.settings.attrs.height.map(|h| h.to_string()).unwrap_or_default(),
            ),
        ])
    }
}
