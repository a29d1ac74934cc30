// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde_json::{Map, Value};

/// Presentation attributes a field declaration may set.
///
/// `required` defaults to true; everything else is empty unless declared.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveAttrs {
    pub class: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub placeholder: String,
    pub required: bool,
}

impl Default for DirectiveAttrs {
    fn default() -> Self {
        DirectiveAttrs {
            class: String::new(),
            alt: String::new(),
            width: None,
            height: None,
            placeholder: String::new(),
            required: true,
        }
    }
}

/// Behavioral options a field declaration may set.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveOptions {
    pub tag: bool,
    pub multiple: bool,
    pub default: String,
}

impl Default for DirectiveOptions {
    fn default() -> Self {
        DirectiveOptions {
            tag: true,
            multiple: false,
            default: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveSettings {
    pub attrs: DirectiveAttrs,
    pub options: DirectiveOptions,
}

impl DirectiveSettings {
    /// Build settings from a raw field declaration map.
    ///
    /// Only the recognized keys are consulted; unrecognized keys and values
    /// of the wrong shape are silently dropped, matching the schema policy
    /// of tolerating sloppy declarations rather than failing the page.
    pub fn from_declaration(declaration: &Map<String, Value>) -> Self {
        let mut settings = DirectiveSettings::default();

        for (key, value) in declaration {
            match key.as_str() {
                "class" => {
                    if let Some(text) = value_as_text(value) {
                        settings.attrs.class = text;
                    }
                }
                "alt" => {
                    if let Some(text) = value_as_text(value) {
                        settings.attrs.alt = text;
                    }
                }
                "placeholder" => {
                    if let Some(text) = value_as_text(value) {
                        settings.attrs.placeholder = text;
                    }
                }
                "width" => settings.attrs.width = value_as_dimension(value),
                "height" => settings.attrs.height = value_as_dimension(value),
                "required" => {
                    if let Some(flag) = value_as_bool(value) {
                        settings.attrs.required = flag;
                    }
                }
                "tag" => {
                    if let Some(flag) = value_as_bool(value) {
                        settings.options.tag = flag;
                    }
                }
                "multiple" => {
                    if let Some(flag) = value_as_bool(value) {
                        settings.options.multiple = flag;
                    }
                }
                "default" => {
                    if let Some(text) = value_as_text(value) {
                        settings.options.default = text;
                    }
                }
                // "type" is consumed by directive selection; everything else
                // is an unrecognized key and ignored.
                _ => {}
            }
        }

        settings
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn value_as_dimension(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declaration(value: Value) -> Map<String, Value> {
        value.as_object().expect("object declaration").clone()
    }

    #[test]
    fn ignores_non_allowed_params() {
        let settings =
            DirectiveSettings::from_declaration(&declaration(json!({ "junk": true })));
        assert_eq!(settings, DirectiveSettings::default());
    }

    #[test]
    fn sets_required_true_by_default() {
        let settings = DirectiveSettings::from_declaration(&Map::new());
        assert!(settings.attrs.required);
    }

    #[test]
    fn allows_defaults_to_be_overridden() {
        let settings =
            DirectiveSettings::from_declaration(&declaration(json!({ "required": false })));
        assert!(!settings.attrs.required);
    }

    #[test]
    fn sets_multiple_false_by_default() {
        let settings = DirectiveSettings::from_declaration(&Map::new());
        assert!(!settings.options.multiple);
    }

    #[test]
    fn accepts_a_multiple_option() {
        let settings =
            DirectiveSettings::from_declaration(&declaration(json!({ "multiple": true })));
        assert!(settings.options.multiple);
    }

    #[test]
    fn accepts_a_default_value() {
        let settings =
            DirectiveSettings::from_declaration(&declaration(json!({ "default": "testing" })));
        assert_eq!(settings.options.default, "testing");
    }

    #[test]
    fn coerces_dimension_strings() {
        let settings = DirectiveSettings::from_declaration(&declaration(
            json!({ "width": "100", "height": 50 }),
        ));
        assert_eq!(settings.attrs.width, Some(100));
        assert_eq!(settings.attrs.height, Some(50));
    }

    #[test]
    fn drops_malformed_values_silently() {
        let settings = DirectiveSettings::from_declaration(&declaration(
            json!({ "width": "wide", "multiple": "yes", "class": [1, 2] }),
        ));
        assert_eq!(settings.attrs.width, None);
        assert!(!settings.options.multiple);
        assert_eq!(settings.attrs.class, "");
    }
}
