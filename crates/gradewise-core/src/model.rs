//! Core data model types for gradewise.
//!
//! A [`Course`] is only ever built by the grade engine, so its derived score,
//! grade, and points always agree with its inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::round_to;

/// Letter grade on the S..F scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Grade points awarded for this letter.
    pub fn points(self) -> u8 {
        match self {
            Grade::S => 10,
            Grade::A => 9,
            Grade::B => 8,
            Grade::C => 7,
            Grade::D => 6,
            Grade::E => 5,
            Grade::F => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" => Ok(Grade::S),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// Quiz and final exam scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExamScores {
    pub quiz1: f64,
    pub quiz2: f64,
    pub final_exam: f64,
}

impl ExamScores {
    pub fn new(quiz1: f64, quiz2: f64, final_exam: f64) -> Self {
        Self {
            quiz1,
            quiz2,
            final_exam,
        }
    }
}

/// A finalized course with its computed score and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub(crate) name: String,
    pub(crate) credits: u8,
    pub(crate) assignments: Vec<f64>,
    pub(crate) exams: ExamScores,
    pub(crate) average_assignment: f64,
    pub(crate) total_score: f64,
    pub(crate) grade: Grade,
    pub(crate) points: u8,
}

impl Course {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }

    pub fn assignments(&self) -> &[f64] {
        &self.assignments
    }

    pub fn exams(&self) -> ExamScores {
        self.exams
    }

    /// Assignment sum scaled by the fixed divisor, full precision.
    pub fn average_assignment(&self) -> f64 {
        self.average_assignment
    }

    /// Weighted course score on a 0–100 scale, full precision.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    /// Total score rounded to two decimals, as shown in lists and tables.
    pub fn total_score_display(&self) -> String {
        format!("{:.2}", round_to(self.total_score, 2))
    }

    /// Assignment average rounded to one decimal.
    pub fn average_assignment_display(&self) -> String {
        format!("{:.1}", round_to(self.average_assignment, 1))
    }
}

/// Credit-weighted aggregate over every stored course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgpaSummary {
    /// Full-precision credit-weighted grade point average.
    pub cgpa: f64,
    /// Grade looked up from the two-decimal CGPA scaled by ten.
    pub cgpa_grade: Grade,
    pub course_count: usize,
    pub total_credits: u32,
    /// Sum of points times credits.
    pub total_grade_points: u32,
    /// Unweighted mean of per-course points.
    pub average_points: f64,
}

/// Display strings round ties away from zero, matching [`round_to`], so the
/// shown CGPA is the one the grade was looked up from.
impl CgpaSummary {
    pub fn cgpa_display(&self) -> String {
        format!("{:.2}", round_to(self.cgpa, 2))
    }

    pub fn average_points_display(&self) -> String {
        format!("{:.1}", round_to(self.average_points, 1))
    }
}

/// A wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CourseInfo,
    Assignments,
    Exams,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::CourseInfo, Step::Assignments, Step::Exams, Step::Review];

    /// One-based step number.
    pub fn number(self) -> u8 {
        match self {
            Step::CourseInfo => 1,
            Step::Assignments => 2,
            Step::Exams => 3,
            Step::Review => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::CourseInfo),
            2 => Some(Step::Assignments),
            3 => Some(Step::Exams),
            4 => Some(Step::Review),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::CourseInfo => "Course info",
            Step::Assignments => "Assignments",
            Step::Exams => "Exams",
            Step::Review => "Review",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
