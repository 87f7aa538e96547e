//! The `gradewise cgpa` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradewise_core::engine::aggregate;
use gradewise_core::parser::{parse_course_sheet, validate_course_sheet};
use gradewise_core::theme::Theme;
use gradewise_report::html::{generate_html, write_html_report};
use gradewise_report::ResultsView;

use crate::config::{load_config_from, open_preferences};

pub fn execute(
    courses_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    title: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let sheet = parse_course_sheet(&courses_path)?;

    for w in validate_course_sheet(&sheet, config.assignment_fields) {
        let prefix = w
            .course
            .as_ref()
            .map(|name| format!("[{name}] "))
            .unwrap_or_default();
        eprintln!("{prefix}WARNING: {}", w.message);
    }

    let title = title
        .or_else(|| Some(sheet.name.clone()).filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "CGPA results".to_string());
    let store = sheet.into_store();
    let summary = aggregate(store.list())?;

    let prefs = open_preferences(&config)?;
    let view = ResultsView::new(&summary, store.list())
        .with_title(title)
        .with_theme(Theme::load(&*prefs));

    match format.as_str() {
        "json" => match &output {
            Some(path) => {
                view.save_json(path)?;
                println!("Results written to {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&view)?),
        },
        "markdown" | "md" => match &output {
            Some(path) => {
                write_text(path, &view.to_markdown())?;
                println!("Results written to {}", path.display());
            }
            None => println!("{}", view.to_markdown()),
        },
        "html" => match &output {
            Some(path) => {
                write_html_report(&view, path)?;
                println!("HTML report written to {}", path.display());
            }
            None => print!("{}", generate_html(&view)),
        },
        "text" => {
            if output.is_some() {
                anyhow::bail!("--output needs --format json, markdown or html");
            }
            print_summary(&view);
        }
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)"),
    }

    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Print the results the way the interactive results view does.
pub fn print_summary(view: &ResultsView) {
    use comfy_table::{Cell, Table};

    println!("{}", view.title);
    println!("CGPA: {}  Grade: {}", view.cgpa, view.cgpa_grade);
    println!(
        "Courses: {}  Credits: {}  Average points: {}",
        view.course_count, view.total_credits, view.average_points
    );

    let mut table = Table::new();
    table.set_header(vec!["Course", "Credits", "Score", "Grade", "Points"]);
    for row in &view.rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(row.credits),
            Cell::new(&row.score),
            Cell::new(row.grade),
            Cell::new(row.points),
        ]);
    }

    println!("{table}");
}
