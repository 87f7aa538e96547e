//! The `gradewise compute` command.

use anyhow::Result;
use serde::Serialize;

use gradewise_core::draft::DraftBuilder;
use gradewise_core::engine::{score_breakdown, ScoreBreakdown};
use gradewise_core::model::Course;
use gradewise_core::wizard::FormInput;

#[derive(Serialize)]
struct ComputeOutput<'a> {
    course: &'a Course,
    breakdown: ScoreBreakdown,
}

pub fn execute(
    name: String,
    credits: String,
    assignments: String,
    quiz1: String,
    quiz2: String,
    final_exam: String,
    format: String,
) -> Result<()> {
    // Same path as the wizard: course info, assignments, then exams.
    let mut draft = DraftBuilder::new();
    draft.set_course_info(&name, &credits)?;

    let raw_assignments: Vec<&str> = if assignments.trim().is_empty() {
        Vec::new()
    } else {
        assignments.split(',').collect()
    };
    draft.set_assignments(raw_assignments.as_slice());

    let form = FormInput {
        quiz1,
        quiz2,
        final_exam,
        ..FormInput::default()
    };
    let course = draft.finalize(form.exam_scores()?)?;
    let breakdown = score_breakdown(course.assignments(), &course.exams());

    match format.as_str() {
        "json" => {
            let output = ComputeOutput {
                course: &course,
                breakdown,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("Course:      {} ({} credits)", course.name(), course.credits());
            println!(
                "Assignments: {} score(s), average {}",
                course.assignments().len(),
                course.average_assignment_display()
            );
            println!("Formula A:   {:.2}", breakdown.formula_a);
            println!("Formula B:   {:.2}", breakdown.formula_b);
            println!("Total score: {}", course.total_score_display());
            println!("Grade:       {} ({} points)", course.grade(), course.points());
        }
    }

    Ok(())
}
