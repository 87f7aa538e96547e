//! TOML course sheet parser.
//!
//! A course sheet lists finished courses for batch CGPA calculation. Every
//! entry goes through the same validation as a course entered in the wizard.
//!
//! ```toml
//! [sheet]
//! name = "Fall term"
//!
//! [[courses]]
//! name = "Math"
//! credits = 3
//! assignments = [8, 8, 8, 8, 8, 8, 8, 8, 8, 8]
//! quiz1 = 50
//! quiz2 = 90
//! final_exam = 70
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::compute_course;
use crate::model::{Course, ExamScores};
use crate::store::CourseStore;

/// Intermediate TOML structure for parsing course sheet files.
#[derive(Debug, Deserialize)]
struct TomlCourseSheet {
    #[serde(default)]
    sheet: TomlSheetHeader,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlSheetHeader {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    name: String,
    credits: u32,
    #[serde(default)]
    assignments: Vec<f64>,
    quiz1: f64,
    quiz2: f64,
    final_exam: f64,
}

/// A parsed course sheet.
#[derive(Debug, Clone)]
pub struct CourseSheet {
    /// Optional display name from the `[sheet]` table.
    pub name: String,
    /// Finalized courses in file order.
    pub courses: Vec<Course>,
}

impl CourseSheet {
    /// Move every course into a fresh store.
    pub fn into_store(self) -> CourseStore {
        let mut store = CourseStore::new();
        for course in self.courses {
            store.append(course);
        }
        store
    }
}

/// Parse a course sheet file.
pub fn parse_course_sheet(path: &Path) -> Result<CourseSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course sheet: {}", path.display()))?;

    parse_course_sheet_str(&content, path)
}

/// Parse a course sheet from a string (useful for testing).
pub fn parse_course_sheet_str(content: &str, source_path: &Path) -> Result<CourseSheet> {
    let parsed: TomlCourseSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            compute_course(
                &c.name,
                c.credits,
                &c.assignments,
                ExamScores::new(c.quiz1, c.quiz2, c.final_exam),
            )
            .with_context(|| format!("course #{} ({:?}) in {}", i + 1, c.name, source_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        path = %source_path.display(),
        courses = courses.len(),
        "parsed course sheet"
    );

    Ok(CourseSheet {
        name: parsed.sheet.name,
        courses,
    })
}

/// A warning from course sheet validation.
#[derive(Debug, Clone)]
pub struct SheetWarning {
    /// The course name (if applicable).
    pub course: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed sheet for things that are legal but probably unintended.
pub fn validate_course_sheet(sheet: &CourseSheet, assignment_fields: usize) -> Vec<SheetWarning> {
    let mut warnings = Vec::new();

    if sheet.courses.is_empty() {
        warnings.push(SheetWarning {
            course: None,
            message: "sheet has no courses".into(),
        });
    }

    // Duplicates are kept as separate courses.
    let mut seen = std::collections::HashSet::new();
    for course in &sheet.courses {
        if !seen.insert(course.name()) {
            warnings.push(SheetWarning {
                course: Some(course.name().to_string()),
                message: format!("duplicate course name: {}", course.name()),
            });
        }
    }

    for course in &sheet.courses {
        let count = course.assignments().len();
        if count != assignment_fields {
            warnings.push(SheetWarning {
                course: Some(course.name().to_string()),
                message: format!(
                    "{count} assignment score(s), expected {assignment_fields}; the average still divides by 10"
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grade;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[sheet]
name = "Fall term"

[[courses]]
name = "Math"
credits = 3
assignments = [8, 8, 8, 8, 8, 8, 8, 8, 8, 8]
quiz1 = 50
quiz2 = 90
final_exam = 70

[[courses]]
name = "Art"
credits = 2
assignments = [100, 100, 100, 100, 100, 100, 100, 100, 100, 100]
quiz1 = 100
quiz2 = 100
final_exam = 100
"#;

    #[test]
    fn parse_valid_toml() {
        let sheet = parse_course_sheet_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(sheet.name, "Fall term");
        assert_eq!(sheet.courses.len(), 2);
        assert_eq!(sheet.courses[0].name(), "Math");
        assert_eq!(sheet.courses[0].grade(), Grade::C);
        assert_eq!(sheet.courses[1].grade(), Grade::S);
        assert!(validate_course_sheet(&sheet, 10).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[[courses]]
name = "Solo"
credits = 4
quiz1 = 60.5
quiz2 = 70
final_exam = 80
"#;
        let sheet = parse_course_sheet_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(sheet.name.is_empty());
        assert!(sheet.courses[0].assignments().is_empty());
    }

    #[test]
    fn invalid_course_names_position() {
        let toml = r#"
[[courses]]
name = "Ok"
credits = 3
quiz1 = 50
quiz2 = 50
final_exam = 50

[[courses]]
name = "Heavy"
credits = 12
quiz1 = 50
quiz2 = 50
final_exam = 50
"#;
        let err = parse_course_sheet_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("course #2"), "{msg}");
        assert!(msg.contains("credits must be between 1 and 10"), "{msg}");
    }

    #[test]
    fn validate_duplicates_and_field_count() {
        let toml = r#"
[[courses]]
name = "Math"
credits = 3
assignments = [1, 2]
quiz1 = 50
quiz2 = 50
final_exam = 50

[[courses]]
name = "Math"
credits = 3
assignments = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]
quiz1 = 50
quiz2 = 50
final_exam = 50
"#;
        let sheet = parse_course_sheet_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_course_sheet(&sheet, 10);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("2 assignment")));
        assert_eq!(sheet.into_store().count(), 2);
    }

    #[test]
    fn empty_sheet_warns() {
        let sheet = parse_course_sheet_str("", &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_course_sheet(&sheet, 10);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].course.is_none());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_course_sheet_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.toml");
        std::fs::write(&path, VALID_TOML).unwrap();

        let sheet = parse_course_sheet(&path).unwrap();
        assert_eq!(sheet.courses.len(), 2);
        assert!(parse_course_sheet(&dir.path().join("missing.toml")).is_err());
    }
}
