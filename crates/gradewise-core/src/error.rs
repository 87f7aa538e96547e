//! Validation error types.
//!
//! Every variant is recoverable: it blocks the requested transition or action,
//! leaves all state untouched, and is shown to the user as-is. The `Display`
//! strings are the user-facing messages.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user-editable form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CourseName,
    Credits,
    Quiz1,
    Quiz2,
    FinalExam,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::CourseName => write!(f, "course name"),
            Field::Credits => write!(f, "credits"),
            Field::Quiz1 => write!(f, "quiz 1 score"),
            Field::Quiz2 => write!(f, "quiz 2 score"),
            Field::FinalExam => write!(f, "final exam score"),
        }
    }
}

/// Errors raised by the grade engine, the draft, the store, and the wizard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    /// A required field was empty (or, for exam scores, not a number).
    #[error("please enter the {field}")]
    MissingField { field: Field },

    /// Credits or an exam score fell outside its valid interval.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: Field,
        value: String,
        min: u32,
        max: u32,
    },

    /// The draft was finalized before the course-info step was completed.
    #[error("missing course info, start from step 1")]
    IncompleteDraft,

    /// CGPA was requested with no courses.
    #[error("please add at least one course")]
    EmptyAggregation,

    /// A deletion index did not address a stored course.
    #[error("no course at position {index} (list has {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A delete confirmation arrived after the list had already changed.
    #[error("the course list changed since deletion was requested")]
    StaleConfirmation,
}

impl GradeError {
    /// Returns `true` if the user has to go back to the first step to recover.
    pub fn requires_restart(&self) -> bool {
        matches!(self, GradeError::IncompleteDraft)
    }

    /// The form field this error points at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            GradeError::MissingField { field } | GradeError::OutOfRange { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = GradeError::MissingField {
            field: Field::CourseName,
        };
        assert_eq!(err.to_string(), "please enter the course name");

        let err = GradeError::OutOfRange {
            field: Field::Credits,
            value: "12".into(),
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "credits must be between 1 and 10 (got 12)");
    }

    #[test]
    fn only_incomplete_draft_requires_restart() {
        assert!(GradeError::IncompleteDraft.requires_restart());
        assert!(!GradeError::EmptyAggregation.requires_restart());
        assert!(!GradeError::StaleConfirmation.requires_restart());
        assert!(!GradeError::IndexOutOfBounds { index: 3, len: 1 }.requires_restart());
    }

    #[test]
    fn field_accessor() {
        let err = GradeError::OutOfRange {
            field: Field::FinalExam,
            value: "101".into(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.field(), Some(Field::FinalExam));
        assert_eq!(GradeError::IncompleteDraft.field(), None);
    }
}
