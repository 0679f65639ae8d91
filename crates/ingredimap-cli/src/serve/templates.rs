//! HTML template rendering for the recipe map page.
//!
//! The page is split across `templates/index.html`, `templates/styles.css`
//! and `templates/app.js`, embedded at compile time with `include_str!`.

const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/app.js");

/// Render the recipe map page.
///
/// Substitutes `{{TITLE}}`, `{{STYLES}}` and `{{SCRIPT}}` in the template.
pub fn render_map_page(title: &str) -> String {
    HTML_TEMPLATE
        .replace("{{TITLE}}", &html_escape(title))
        .replace("{{STYLES}}", STYLES)
        .replace("{{SCRIPT}}", SCRIPT)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
