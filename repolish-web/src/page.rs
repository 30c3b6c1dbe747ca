//! HTML page rendering
//!
//! The page template is embedded at compile time and uses `{{VARIABLE}}`
//! placeholders. All user-derived values are HTML-escaped before
//! substitution.

use repolish_core::Style;

/// Embedded page template with {{OPTIONS}} and {{OUTCOME}} slots
const PAGE_TEMPLATE: &str = include_str!("templates/index.html");

/// Render the form page with an optional rewritten review
pub fn render_page(result: &str, selected: Style) -> String {
    let outcome = if result.is_empty() {
        String::new()
    } else {
        format!(
            "<section class=\"result\">\n  <h2>Improved review</h2>\n  <p>{}</p>\n</section>",
            escape_html(result).replace('\n', "<br>")
        )
    };
    render(selected, &outcome)
}

/// Render the form page with a failure notice
pub fn render_error_page(message: &str, selected: Style) -> String {
    let outcome = format!(
        "<section class=\"error\">\n  <p>{}</p>\n</section>",
        escape_html(message)
    );
    render(selected, &outcome)
}

fn render(selected: Style, outcome: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{OPTIONS}}", &style_options(selected))
        .replace("{{OUTCOME}}", outcome)
}

/// Build the style `<select>` options with the current choice marked.
///
/// Labels come from the closed catalog and need no escaping.
fn style_options(selected: Style) -> String {
    Style::all()
        .iter()
        .map(|style| {
            let marker = if *style == selected { " selected" } else { "" };
            format!(
                "      <option value=\"{label}\"{marker}>{label}</option>",
                label = style.label(),
                marker = marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimal HTML escaping for text interpolated into the page
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
