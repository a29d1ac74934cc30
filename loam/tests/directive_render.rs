// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use loam::directives::Directive;
use serde_json::json;

#[test]
fn text_input_carries_value_and_declared_attrs() {
    let directive = Directive::from_declaration(&json!({
        "class": "headline",
        "placeholder": "Add a title"
    }));
    let html = directive.input("content[title]", Some(&json!("Hello & welcome")));
    assert!(html.contains("name=\"content[title]\""));
    assert!(html.contains("value=\"Hello &amp; welcome\""));
    assert!(html.contains("class=\"headline\""));
    assert!(html.contains("placeholder=\"Add a title\""));
    assert!(html.contains(" required"));
}

#[test]
fn text_render_escapes_and_falls_back_to_default() {
    let directive = Directive::from_declaration(&json!({ "default": "Untitled" }));
    assert_eq!(
        directive.render(Some(&json!("<b>bold</b>"))),
        Some("&lt;b&gt;bold&lt;/b&gt;".to_string())
    );
    assert_eq!(directive.render(None), Some("Untitled".to_string()));
}

#[test]
fn image_dimensions_appear_as_attributes_and_query_params() {
    let directive = Directive::from_declaration(&json!({
        "type": "image",
        "width": 300,
        "height": 200
    }));
    let html = directive.render(Some(&json!("pic-abc.jpg"))).expect("render");
    assert!(html.contains("src=\"/uploads/pic-abc.jpg?w=300&amp;h=200\""));
    assert!(html.contains("width=\"300\""));
    assert!(html.contains("height=\"200\""));
}

#[test]
fn image_without_tag_renders_the_bare_url() {
    let directive = Directive::from_declaration(&json!({ "type": "image", "tag": false }));
    assert_eq!(
        directive.render(Some(&json!("pic-abc.jpg"))),
        Some("/uploads/pic-abc.jpg".to_string())
    );
}

#[test]
fn preview_forces_tag_output() {
    let directive = Directive::from_declaration(&json!({ "type": "image", "tag": false }));
    let html = directive.preview(Some(&json!("pic-abc.jpg"))).expect("preview");
    assert!(html.starts_with("<img "));
    assert!(html.contains("src=\"/uploads/pic-abc.jpg\""));
}

#[test]
fn multiple_image_input_emits_slots_and_adder_template() {
    let directive = Directive::from_declaration(&json!({ "type": "image", "multiple": true }));
    let html = directive.input("content[photos]", Some(&json!(["a.jpg", "b.jpg"])));
    assert!(html.contains("name=\"content[photos][0]\""));
    assert!(html.contains("name=\"content[photos][1]\""));
    assert!(html.contains("name=\"_destroy[photos][0]\""));
    assert!(html.contains("class=\"multiple-input\""));
    assert!(html.contains("data-template="));
    assert!(html.contains("src=\"/uploads/a.jpg\""));
}

#[test]
fn multiple_image_render_emits_one_tag_per_stored_value() {
    let directive = Directive::from_declaration(&json!({ "type": "image", "multiple": true }));
    let html = directive
        .render(Some(&json!(["a.jpg", "", "c.jpg"])))
        .expect("render");
    assert_eq!(html.matches("<img ").count(), 2);
    assert!(html.contains("/uploads/a.jpg"));
    assert!(html.contains("/uploads/c.jpg"));
}

#[test]
fn unknown_declaration_keys_are_ignored() {
    let directive = Directive::from_declaration(&json!({
        "type": "image",
        "sparkle": true,
        "alt": "Team"
    }));
    let html = directive.render(Some(&json!("pic.jpg"))).expect("render");
    assert!(html.contains("alt=\"Team\""));
    assert!(!html.contains("sparkle"));
}
