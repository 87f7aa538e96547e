//! The results view: final CGPA, its grade, and a per-course breakdown.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gradewise_core::model::{CgpaSummary, Course, Grade};
use gradewise_core::theme::Theme;

/// Everything the results modal shows, already formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsView {
    /// Heading for the report.
    pub title: String,
    /// When the view was generated.
    pub generated_at: DateTime<Utc>,
    /// Theme the HTML page opens in.
    pub theme: Theme,
    /// CGPA with two decimals.
    pub cgpa: String,
    pub cgpa_grade: Grade,
    pub course_count: usize,
    pub total_credits: u32,
    /// Unweighted mean points with one decimal.
    pub average_points: String,
    /// One row per course, in list order.
    pub rows: Vec<ResultRow>,
}

/// A course row in the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub name: String,
    pub credits: u8,
    /// Total score with two decimals.
    pub score: String,
    pub grade: Grade,
    pub points: u8,
}

impl ResultsView {
    pub fn new(summary: &CgpaSummary, courses: &[Course]) -> Self {
        let rows = courses
            .iter()
            .map(|c| ResultRow {
                name: c.name().to_string(),
                credits: c.credits(),
                score: c.total_score_display(),
                grade: c.grade(),
                points: c.points(),
            })
            .collect();

        Self {
            title: "CGPA results".to_string(),
            generated_at: Utc::now(),
            theme: Theme::default(),
            cgpa: summary.cgpa_display(),
            cgpa_grade: summary.cgpa_grade,
            course_count: summary.course_count,
            total_credits: summary.total_credits,
            average_points: summary.average_points_display(),
            rows,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Save the view as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        Ok(())
    }

    /// Format the view as a markdown summary and table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.title));
        md.push_str(&format!(
            "**CGPA:** {} (grade {}) | {} course(s) | {} credits | average points {}\n\n",
            self.cgpa, self.cgpa_grade, self.course_count, self.total_credits, self.average_points
        ));

        md.push_str("| Course | Credits | Score | Grade | Points |\n");
        md.push_str("|--------|---------|-------|-------|--------|\n");
        for r in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.name.replace('|', "\\|"),
                r.credits,
                r.score,
                r.grade,
                r.points
            ));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradewise_core::engine::{aggregate, compute_course};
    use gradewise_core::model::ExamScores;

    fn courses() -> Vec<Course> {
        vec![
            compute_course("Math", 3, &[8.0; 10], ExamScores::new(50.0, 90.0, 70.0)).unwrap(),
            compute_course("Art | Design", 4, &[100.0; 10], ExamScores::new(100.0, 100.0, 100.0))
                .unwrap(),
        ]
    }

    fn view() -> ResultsView {
        let courses = courses();
        let summary = aggregate(&courses).unwrap();
        ResultsView::new(&summary, &courses)
    }

    #[test]
    fn view_formats_summary() {
        let v = view();
        // (7 * 3 + 10 * 4) / 7 = 8.714...
        assert_eq!(v.cgpa, "8.71");
        assert_eq!(v.cgpa_grade, Grade::A);
        assert_eq!(v.course_count, 2);
        assert_eq!(v.total_credits, 7);
        assert_eq!(v.average_points, "8.5");
        assert_eq!(v.rows[0].score, "65.80");
        assert_eq!(v.rows[1].grade, Grade::S);
    }

    #[test]
    fn markdown_output() {
        let md = view().with_title("Fall").to_markdown();
        assert!(md.starts_with("## Fall"));
        assert!(md.contains("**CGPA:** 8.71 (grade A)"));
        assert!(md.contains("| Math | 3 | 65.80 | C | 7 |"));
        assert!(md.contains("Art \\| Design"));
    }

    #[test]
    fn json_written_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.json");

        view().with_theme(Theme::Light).save_json(&path).unwrap();

        let loaded: ResultsView =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.cgpa, "8.71");
        assert_eq!(loaded.theme, Theme::Light);
        assert_eq!(loaded.rows.len(), 2);
    }
}
