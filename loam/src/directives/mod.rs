// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Field-type handlers ("directives").
//!
//! A directive turns one declared field into editable form markup and into
//! display markup, and gives the content-assembly step enough shape
//! information (single vs. multi-valued) to interpret submissions. The set
//! of directives is closed: a declaration's `type` key selects the variant
//! at construction time and unknown types fall back to `text`.

mod image;
mod settings;
mod text;

pub use image::ImageDirective;
pub use settings::{DirectiveAttrs, DirectiveOptions, DirectiveSettings};
pub use text::TextDirective;

use crate::util::escape_html;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub enum Directive {
    Text(TextDirective),
    Image(ImageDirective),
}

impl Directive {
    /// Construct the directive selected by a field declaration.
    ///
    /// Declarations that are not maps are treated as empty maps, and an
    /// unknown `type` falls back to `text`.
    pub fn from_declaration(declaration: &Value) -> Self {
        let empty = Map::new();
        let map = declaration.as_object().unwrap_or(&empty);
        let settings = DirectiveSettings::from_declaration(map);
        let declared_type = map.get("type").and_then(Value::as_str).unwrap_or("text");

        match declared_type {
            "image" => Directive::Image(ImageDirective::new(settings)),
            _ => Directive::Text(TextDirective::new(settings)),
        }
    }

    /// Editable form control(s) for one field.
    pub fn input(&self, name: &str, value: Option<&Value>) -> String {
        match self {
            Directive::Text(directive) => directive.input(name, value),
            Directive::Image(directive) => directive.input(name, value),
        }
    }

    /// Display markup for the current value; `None` when the value is absent.
    pub fn render(&self, value: Option<&Value>) -> Option<String> {
        match self {
            Directive::Text(directive) => directive.render(value),
            Directive::Image(directive) => directive.render(value),
        }
    }

    /// Like `render`, but always tag-form output, for authoring previews.
    pub fn preview(&self, value: Option<&Value>) -> Option<String> {
        match self {
            Directive::Text(directive) => directive.preview(value),
            Directive::Image(directive) => directive.preview(value),
        }
    }

    pub fn settings(&self) -> &DirectiveSettings {
        match self {
            Directive::Text(directive) => directive.settings(),
            Directive::Image(directive) => directive.settings(),
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.settings().options.multiple
    }
}

/// Coerce a stored content value to a scalar string.
pub(crate) fn value_as_scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Coerce a stored content value to an ordered list of strings.
///
/// Scalars become one-element lists; absent entries inside an array become
/// empty strings so slot positions are preserved.
pub(crate) fn value_as_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| value_as_scalar(Some(entry)).unwrap_or_default())
            .collect(),
        other => value_as_scalar(other).map(|scalar| vec![scalar]).unwrap_or_default(),
    }
}

/// Wrap per-value input groups in a container the front-end can extend.
///
/// The adder carries a JSON-serialized empty group in `data-template`; a
/// companion script clones it into the DOM before the adder on click. The
/// server never executes that behavior, it only emits the fragment.
pub(crate) fn multiple_inputs<F>(name: &str, values: &[String], render_single: F) -> String
where
    F: Fn(&str, &str) -> String,
{
    let padded;
    let values = if values.is_empty() {
        padded = [String::new()];
        &padded[..]
    } else {
        values
    };

    let groups: String = values
        .iter()
        .enumerate()
        .map(|(i, value)| render_single(&format!("{}[{}]", name, i), value))
        .collect();

    let template = Value::String(render_single(&format!("{}[]", name), "")).to_string();

    format!(
        "<div class=\"multiple-input\">{}<div class=\"adder button\" data-template='{}'>Add new</div></div>",
        groups,
        escape_single_quotes(&template)
    )
}

fn escape_single_quotes(raw: &str) -> String {
    raw.replace('\'', "&#39;")
}

/// HTML attribute fragment (leading space included) for non-empty attrs.
pub(crate) fn attr_fragment(pairs: &[(&str, String)]) -> String {
    let mut fragment = String::new();
    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        fragment.push_str(&format!(" {}=\"{}\"", key, escape_html(value)));
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_falls_back_to_text() {
        let directive = Directive::from_declaration(&json!({ "type": "carousel" }));
        assert!(matches!(directive, Directive::Text(_)));
    }

    #[test]
    fn image_type_selects_image_directive() {
        let directive = Directive::from_declaration(&json!({ "type": "image" }));
        assert!(matches!(directive, Directive::Image(_)));
    }

    #[test]
    fn non_map_declaration_is_treated_as_empty() {
        let directive = Directive::from_declaration(&json!("image"));
        assert!(matches!(directive, Directive::Text(_)));
        assert!(directive.settings().attrs.required);
    }

    #[test]
    fn value_as_list_coerces_scalars() {
        assert_eq!(value_as_list(Some(&json!("a.jpg"))), vec!["a.jpg"]);
        assert_eq!(
            value_as_list(Some(&json!(["a.jpg", null, "c.jpg"]))),
            vec!["a.jpg", "", "c.jpg"]
        );
        assert!(value_as_list(None).is_empty());
    }

    #[test]
    fn multiple_inputs_pads_empty_value_lists() {
        let html = multiple_inputs("content[x]", &[], |name, value| {
            format!("[{}={}]", name, value)
        });
        assert!(html.contains("[content[x][0]=]"));
        assert!(html.contains("Add new"));
    }

    #[test]
    fn multiple_inputs_embeds_a_template_copy() {
        let html = multiple_inputs("content[x]", &["a".to_string()], |name, value| {
            format!("<input name=\"{}\" value=\"{}\">", name, value)
        });
        assert!(html.contains("data-template='\"<input name=\\\"content[x][]\\\" value=\\\"\\\">\"'"));
    }
}
