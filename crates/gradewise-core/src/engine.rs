//! Grade computation and CGPA aggregation.
//!
//! Pure functions only. A course score is the better of two weightings:
//!
//! - Formula A: 0.1·avg + 0.2·max(quiz1, quiz2) + 0.6·final (drops the lower quiz)
//! - Formula B: 0.1·avg + 0.2·quiz1 + 0.3·quiz2 + 0.4·final
//!
//! where `avg` is the assignment sum divided by a fixed [`ASSIGNMENT_DIVISOR`].

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Field, GradeError};
use crate::model::{CgpaSummary, Course, ExamScores, Grade};

/// Divisor for the assignment average. Independent of how many assignment
/// fields the form has.
pub const ASSIGNMENT_DIVISOR: f64 = 10.0;

/// Valid credit values.
pub const CREDIT_RANGE: RangeInclusive<u32> = 1..=10;

/// Valid quiz and final exam scores.
pub const EXAM_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Score thresholds, highest first. A score maps to the first row whose
/// minimum it reaches.
pub const GRADE_THRESHOLDS: [(f64, Grade); 7] = [
    (90.0, Grade::S),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
    (40.0, Grade::E),
    (0.0, Grade::F),
];

/// Map a 0–100 score to its letter grade.
pub fn grade_for_score(score: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// Assignment sum divided by [`ASSIGNMENT_DIVISOR`].
pub fn average_assignment(assignments: &[f64]) -> f64 {
    assignments
        .iter()
        .map(|&a| if a.is_finite() { a } else { 0.0 })
        .sum::<f64>()
        / ASSIGNMENT_DIVISOR
}

/// Drop-lower-quiz weighting.
pub fn formula_a(average_assignment: f64, exams: &ExamScores) -> f64 {
    0.1 * average_assignment + 0.2 * exams.quiz1.max(exams.quiz2) + 0.6 * exams.final_exam
}

/// Weighted-both-quizzes weighting.
pub fn formula_b(average_assignment: f64, exams: &ExamScores) -> f64 {
    0.1 * average_assignment + 0.2 * exams.quiz1 + 0.3 * exams.quiz2 + 0.4 * exams.final_exam
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Every intermediate value of a course computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub average_assignment: f64,
    pub formula_a: f64,
    pub formula_b: f64,
    pub total_score: f64,
    pub grade: Grade,
    pub points: u8,
}

/// Compute the score breakdown without validating the inputs.
pub fn score_breakdown(assignments: &[f64], exams: &ExamScores) -> ScoreBreakdown {
    let average = average_assignment(assignments);
    let a = formula_a(average, exams);
    let b = formula_b(average, exams);
    let total_score = a.max(b);
    let grade = grade_for_score(total_score);
    ScoreBreakdown {
        average_assignment: average,
        formula_a: a,
        formula_b: b,
        total_score,
        grade,
        points: grade.points(),
    }
}

/// Trim and check a course name.
pub fn validate_name(name: &str) -> Result<String, GradeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GradeError::MissingField {
            field: Field::CourseName,
        });
    }
    Ok(trimmed.to_string())
}

/// Check that credits fall in [`CREDIT_RANGE`].
pub fn validate_credits(credits: u32) -> Result<u8, GradeError> {
    if !CREDIT_RANGE.contains(&credits) {
        return Err(credits_out_of_range(credits.to_string()));
    }
    // Range check above keeps this within u8.
    Ok(credits as u8)
}

/// Parse credits from form text.
///
/// Empty text is a missing field. The leading number is read and truncated
/// toward zero, so `"3.7"` and `"3 cr"` read as 3 credits. Text that does not
/// start with a number is out of range.
pub fn parse_credits(raw: &str) -> Result<u8, GradeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GradeError::MissingField {
            field: Field::Credits,
        });
    }
    let value =
        leading_number(trimmed).ok_or_else(|| credits_out_of_range(trimmed.to_string()))?;
    if !value.is_finite() || value.trunc() < 1.0 || value.trunc() > *CREDIT_RANGE.end() as f64 {
        return Err(credits_out_of_range(trimmed.to_string()));
    }
    validate_credits(value.trunc() as u32)
}

fn credits_out_of_range(value: String) -> GradeError {
    GradeError::OutOfRange {
        field: Field::Credits,
        value,
        min: *CREDIT_RANGE.start(),
        max: *CREDIT_RANGE.end(),
    }
}

/// Check a single exam score against [`EXAM_RANGE`].
pub fn validate_exam(field: Field, value: f64) -> Result<f64, GradeError> {
    if !value.is_finite() {
        return Err(GradeError::MissingField { field });
    }
    if !EXAM_RANGE.contains(&value) {
        return Err(GradeError::OutOfRange {
            field,
            value: value.to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(value)
}

/// Check all three exam scores, quiz 1 first.
pub fn validate_exams(exams: &ExamScores) -> Result<(), GradeError> {
    validate_exam(Field::Quiz1, exams.quiz1)?;
    validate_exam(Field::Quiz2, exams.quiz2)?;
    validate_exam(Field::FinalExam, exams.final_exam)?;
    Ok(())
}

/// Read the longest numeric prefix of `raw`, after leading whitespace.
///
/// `"8abc"` reads as 8 and `"85.5%"` as 85.5. Returns `None` when the text
/// does not start with a finite number.
pub fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read an exam score from form text without range-checking it. Text that
/// does not start with a number counts as missing.
pub fn parse_exam(field: Field, raw: &str) -> Result<f64, GradeError> {
    leading_number(raw).ok_or(GradeError::MissingField { field })
}

/// Read an assignment score; text that does not start with a number is 0.
pub fn parse_assignment(raw: &str) -> f64 {
    leading_number(raw).unwrap_or(0.0)
}

/// Validate inputs and build a finalized [`Course`].
pub fn compute_course(
    name: &str,
    credits: u32,
    assignments: &[f64],
    exams: ExamScores,
) -> Result<Course, GradeError> {
    let name = validate_name(name)?;
    let credits = validate_credits(credits)?;
    validate_exams(&exams)?;

    let assignments: Vec<f64> = assignments
        .iter()
        .map(|&a| if a.is_finite() { a } else { 0.0 })
        .collect();
    let breakdown = score_breakdown(&assignments, &exams);

    tracing::debug!(
        course = %name,
        formula_a = breakdown.formula_a,
        formula_b = breakdown.formula_b,
        grade = %breakdown.grade,
        "computed course score"
    );

    Ok(Course {
        name,
        credits,
        assignments,
        exams,
        average_assignment: breakdown.average_assignment,
        total_score: breakdown.total_score,
        grade: breakdown.grade,
        points: breakdown.points,
    })
}

/// Aggregate courses into a credit-weighted CGPA.
///
/// The CGPA grade reuses the 0–100 score table on the two-decimal CGPA times
/// ten, so a CGPA of 7.86 grades as if it were a score of 78.6.
pub fn aggregate(courses: &[Course]) -> Result<CgpaSummary, GradeError> {
    if courses.is_empty() {
        return Err(GradeError::EmptyAggregation);
    }

    let total_grade_points: u32 = courses
        .iter()
        .map(|c| c.points as u32 * c.credits as u32)
        .sum();
    let total_credits: u32 = courses.iter().map(|c| c.credits as u32).sum();
    let cgpa = total_grade_points as f64 / total_credits as f64;
    let cgpa_grade = grade_for_score(round_to(cgpa, 2) * 10.0);
    let average_points =
        courses.iter().map(|c| c.points as f64).sum::<f64>() / courses.len() as f64;

    Ok(CgpaSummary {
        cgpa,
        cgpa_grade,
        course_count: courses.len(),
        total_credits,
        total_grade_points,
        average_points,
    })
}
