// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::Environment;

/// Build the template environment with the embedded dashboard templates.
pub fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(
        "records/edit.html",
        include_str!("dashboard/templates/edit.html"),
    )?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn edit_template_renders_field_markup_unescaped() {
        let env = build_environment().expect("environment");
        let template = env.get_template("records/edit.html").expect("template");
        let html = template
            .render(context! {
                site_name => "Test Site",
                title => "About",
                action => "/dashboard/records/about/0000000000000001",
                fields => vec![context! {
                    label => "Photo",
                    input => "<input type=\"file\" name=\"content[photo]\">",
                }],
            })
            .expect("render");
        assert!(html.contains("<input type=\"file\" name=\"content[photo]\">"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("Test Site"));
    }
}
