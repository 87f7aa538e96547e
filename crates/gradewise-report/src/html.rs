//! HTML results page.
//!
//! Produces a self-contained HTML file with the CSS inlined. The page opens
//! in the theme carried by the view.

use std::path::Path;

use anyhow::{Context, Result};

use crate::results::ResultsView;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a results view.
pub fn generate_html(view: &ResultsView) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(&view.title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n");
    html.push_str(&format!("<body class=\"theme-{}\">\n", view.theme));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&view.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} course(s) | {} credits | {}</p>\n",
        view.course_count,
        view.total_credits,
        view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Headline numbers
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<div class=\"card\"><span class=\"label\">CGPA</span><span class=\"value\" id=\"cgpa\">{}</span></div>\n",
        view.cgpa
    ));
    html.push_str(&format!(
        "<div class=\"card\"><span class=\"label\">Grade</span><span class=\"value grade-{}\">{}</span></div>\n",
        view.cgpa_grade, view.cgpa_grade
    ));
    html.push_str(&format!(
        "<div class=\"card\"><span class=\"label\">Average points</span><span class=\"value\">{}</span></div>\n",
        view.average_points
    ));
    html.push_str("</section>\n");

    html.push_str("<section class=\"courses\">\n");
    html.push_str("<h2>Courses</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Course</th><th>Credits</th><th>Score</th><th>Grade</th><th>Points</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for row in &view.rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"grade-{}\">{}</td><td>{}</td></tr>\n",
            html_escape(&row.name),
            row.credits,
            row.score,
            row.grade,
            row.grade,
            row.points,
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Write the HTML page to a file.
pub fn write_html_report(view: &ResultsView, path: &Path) -> Result<()> {
    let html = generate_html(view);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 20px; }
body.theme-dark { background: #1a1b26; color: #c0caf5; }
body.theme-light { background: #fafafa; color: #1f2335; }
h1 { margin-bottom: 4px; }
.meta { opacity: 0.7; margin-top: 0; }
.dashboard { display: flex; gap: 16px; margin: 24px 0; }
.card { flex: 1; padding: 16px; border-radius: 8px; display: flex; flex-direction: column; }
.theme-dark .card { background: #24283b; }
.theme-light .card { background: #ffffff; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
.label { font-size: 0.85em; opacity: 0.7; }
.value { font-size: 2em; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: 8px 12px; text-align: left; }
.theme-dark th, .theme-dark td { border-bottom: 1px solid #3b4261; }
.theme-light th, .theme-light td { border-bottom: 1px solid #ddd; }
.grade-S, .grade-A { color: #2e9e5b; font-weight: 600; }
.grade-E, .grade-F { color: #d0453b; font-weight: 600; }
"#;
