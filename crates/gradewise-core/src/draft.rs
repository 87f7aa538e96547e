//! The in-progress course assembled across wizard steps.

use crate::engine::{self, parse_assignment};
use crate::error::GradeError;
use crate::model::{Course, ExamScores};

/// A partially-populated course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: Option<String>,
    pub credits: Option<u8>,
    pub assignments: Option<Vec<f64>>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.credits.is_none() && self.assignments.is_none()
    }
}

/// Owns the single draft and promotes it to a [`Course`].
#[derive(Debug, Clone, Default)]
pub struct DraftBuilder {
    draft: Draft,
}

impl DraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Validate and store the course name and credits.
    ///
    /// Both fields are checked before either is written, so a failure leaves
    /// the draft as it was.
    pub fn set_course_info(&mut self, name: &str, credits: &str) -> Result<(), GradeError> {
        let name = engine::validate_name(name)?;
        let credits = engine::parse_credits(credits)?;
        self.draft.name = Some(name);
        self.draft.credits = Some(credits);
        Ok(())
    }

    /// Store assignment scores, reading unparsable entries as 0.
    pub fn set_assignments<S: AsRef<str>>(&mut self, raw: &[S]) {
        let scores = raw.iter().map(|s| parse_assignment(s.as_ref())).collect();
        self.draft.assignments = Some(scores);
    }

    pub fn has_assignments(&self) -> bool {
        self.draft
            .assignments
            .as_ref()
            .is_some_and(|a| !a.is_empty())
    }

    /// `true` once course info and assignments have both been captured.
    pub fn is_complete(&self) -> bool {
        self.draft.name.is_some() && self.draft.credits.is_some() && self.draft.assignments.is_some()
    }

    /// Promote the draft to a course using the given exam scores.
    ///
    /// Fails with [`GradeError::IncompleteDraft`] when course info was never
    /// captured. The draft is cleared only on success. Assignments that were
    /// never captured count as all zero.
    pub fn finalize(&mut self, exams: ExamScores) -> Result<Course, GradeError> {
        let (Some(name), Some(credits)) = (&self.draft.name, self.draft.credits) else {
            return Err(GradeError::IncompleteDraft);
        };
        let assignments = self.draft.assignments.as_deref().unwrap_or(&[]);
        let course = engine::compute_course(name, u32::from(credits), assignments, exams)?;
        self.reset();
        Ok(course)
    }

    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::model::Grade;

    fn exams() -> ExamScores {
        ExamScores::new(50.0, 90.0, 70.0)
    }

    #[test]
    fn set_course_info_validates_before_mutating() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();

        let err = builder.set_course_info("Physics", "12").unwrap_err();
        assert_eq!(err.field(), Some(Field::Credits));
        assert_eq!(builder.draft().name.as_deref(), Some("Math"));
        assert_eq!(builder.draft().credits, Some(3));

        let err = builder.set_course_info("  ", "4").unwrap_err();
        assert_eq!(err.field(), Some(Field::CourseName));
        assert_eq!(builder.draft().credits, Some(3));
    }

    #[test]
    fn assignments_coerce_to_zero() {
        let mut builder = DraftBuilder::new();
        builder.set_assignments(&["8", "", "abc", "7.5"]);
        assert_eq!(builder.draft().assignments, Some(vec![8.0, 0.0, 0.0, 7.5]));
        assert!(builder.has_assignments());
    }

    #[test]
    fn completeness_requires_info_and_assignments() {
        let mut builder = DraftBuilder::new();
        assert!(!builder.is_complete());
        builder.set_course_info("Math", "3").unwrap();
        assert!(!builder.is_complete());
        builder.set_assignments(&["8"; 10]);
        assert!(builder.is_complete());
    }

    #[test]
    fn finalize_promotes_and_clears() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();
        builder.set_assignments(&["8"; 10]);

        let course = builder.finalize(exams()).unwrap();
        assert_eq!(course.name(), "Math");
        assert_eq!(course.credits(), 3);
        assert_eq!(course.grade(), Grade::C);
        assert!(builder.draft().is_empty());
    }

    #[test]
    fn second_finalize_fails_as_incomplete() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();
        builder.set_assignments(&["8"; 10]);
        builder.finalize(exams()).unwrap();

        assert_eq!(builder.finalize(exams()), Err(GradeError::IncompleteDraft));
    }

    #[test]
    fn failed_finalize_keeps_draft() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();
        builder.set_assignments(&["8"; 10]);
        let before = builder.draft().clone();

        let err = builder
            .finalize(ExamScores::new(50.0, 90.0, 120.0))
            .unwrap_err();
        assert_eq!(err.field(), Some(Field::FinalExam));
        assert_eq!(builder.draft(), &before);
    }

    #[test]
    fn finalize_without_assignments_uses_zero() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();
        let course = builder.finalize(ExamScores::new(100.0, 100.0, 100.0)).unwrap();
        assert!(course.assignments().is_empty());
        assert_eq!(course.average_assignment(), 0.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut builder = DraftBuilder::new();
        builder.set_course_info("Math", "3").unwrap();
        builder.set_assignments(&["1"]);
        builder.reset();
        assert!(builder.draft().is_empty());
        assert_eq!(builder.finalize(exams()), Err(GradeError::IncompleteDraft));
    }
}
