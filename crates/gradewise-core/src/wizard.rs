//! Step sequencer that gates data entry.
//!
//! The wizard walks through four steps: course info, assignments, exams, and
//! the review list. Moving forward out of step 1 validates and captures the
//! course info; moving forward out of step 2 captures the assignment scores;
//! the add-course action on step 3 finalizes the draft. Moving backward never
//! validates or captures anything.

use crate::draft::DraftBuilder;
use crate::engine;
use crate::error::{Field, GradeError};
use crate::model::{CgpaSummary, Course, ExamScores, Step};
use crate::presenter::{CourseListView, Notice, Presenter};
use crate::store::CourseStore;

/// Number of assignment fields on the form unless configured otherwise.
pub const DEFAULT_ASSIGNMENT_FIELDS: usize = 10;

/// Most assignment fields a form may have. The average divides by a fixed
/// 10, so more fields could push a score past 100.
pub const MAX_ASSIGNMENT_FIELDS: usize = engine::ASSIGNMENT_DIVISOR as usize;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormInput {
    pub course_name: String,
    pub credits: String,
    /// One entry per assignment field; the length never changes.
    pub assignments: Vec<String>,
    pub quiz1: String,
    pub quiz2: String,
    pub final_exam: String,
}

impl FormInput {
    pub fn new(assignment_fields: usize) -> Self {
        Self {
            assignments: vec![String::new(); assignment_fields],
            ..Default::default()
        }
    }

    /// Set one assignment field. Returns `false` if `index` is not a field.
    pub fn set_assignment(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.assignments.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Blank every field, keeping the assignment field count.
    pub fn clear(&mut self) {
        let fields = self.assignments.len();
        *self = FormInput::new(fields);
    }

    /// Read the three exam fields.
    ///
    /// Every field must parse before any range is checked, so an empty quiz
    /// is reported ahead of an out-of-range final.
    pub fn exam_scores(&self) -> Result<ExamScores, GradeError> {
        let exams = ExamScores::new(
            engine::parse_exam(Field::Quiz1, &self.quiz1)?,
            engine::parse_exam(Field::Quiz2, &self.quiz2)?,
            engine::parse_exam(Field::FinalExam, &self.final_exam)?,
        );
        engine::validate_exams(&exams)?;
        Ok(exams)
    }
}

/// First half of the two-step deletion protocol.
///
/// Holds the position, the course name for the confirmation prompt, and the
/// store revision it was issued against. Dropping it declines the deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIntent {
    index: usize,
    name: String,
    revision: u64,
}

impl DeleteIntent {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prompt text for the confirmation dialog.
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
    }
}

/// Owns the wizard step, the draft, the course store, and the form.
pub struct WizardController {
    step: Step,
    draft: DraftBuilder,
    store: CourseStore,
    form: FormInput,
    presenter: Box<dyn Presenter>,
}

impl WizardController {
    pub fn new(presenter: Box<dyn Presenter>) -> Self {
        Self::with_assignment_fields(presenter, DEFAULT_ASSIGNMENT_FIELDS)
    }

    /// Build a wizard whose form has `assignment_fields` assignment fields,
    /// capped at [`MAX_ASSIGNMENT_FIELDS`].
    pub fn with_assignment_fields(presenter: Box<dyn Presenter>, assignment_fields: usize) -> Self {
        if assignment_fields > MAX_ASSIGNMENT_FIELDS {
            tracing::warn!(
                requested = assignment_fields,
                max = MAX_ASSIGNMENT_FIELDS,
                "too many assignment fields, capping"
            );
        }
        let assignment_fields = assignment_fields.min(MAX_ASSIGNMENT_FIELDS);
        Self {
            step: Step::CourseInfo,
            draft: DraftBuilder::new(),
            store: CourseStore::new(),
            form: FormInput::new(assignment_fields),
            presenter,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn draft(&self) -> &DraftBuilder {
        &self.draft
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    /// Draw the current step. Call once after construction.
    pub fn start(&self) {
        self.render();
    }

    /// Request a move to `target`.
    ///
    /// Forward moves validate or capture the current step first; on failure
    /// the step is unchanged and the error is shown. Backward moves always
    /// succeed.
    pub fn go_to(&mut self, target: Step) -> Result<Step, GradeError> {
        if target > self.step {
            match self.step {
                Step::CourseInfo => {
                    if let Err(err) = self
                        .draft
                        .set_course_info(&self.form.course_name, &self.form.credits)
                    {
                        tracing::warn!(error = %err, "course info rejected");
                        self.presenter.on_notice(&Notice::from(&err));
                        return Err(err);
                    }
                }
                Step::Assignments => {
                    self.draft.set_assignments(self.form.assignments.as_slice());
                }
                Step::Exams | Step::Review => {}
            }
        }

        tracing::debug!(from = self.step.number(), to = target.number(), "step change");
        self.step = target;
        self.render();
        Ok(self.step)
    }

    /// The add-course action on the exams step.
    ///
    /// On success the course is appended, the form cleared, and the wizard
    /// jumps to the review list. If course info was never captured the wizard
    /// jumps back to step 1.
    pub fn add_course(&mut self) -> Result<Course, GradeError> {
        let exams = match self.form.exam_scores() {
            Ok(exams) => exams,
            Err(err) => return Err(self.reject(err)),
        };

        // Put back if promotion fails, so a rejected add leaves the draft as it was.
        let before = self.draft.clone();
        if !self.draft.has_assignments() {
            self.draft.set_assignments(self.form.assignments.as_slice());
        }

        match self.draft.finalize(exams) {
            Ok(course) => {
                tracing::info!(
                    course = course.name(),
                    score = %course.total_score_display(),
                    grade = %course.grade(),
                    "course added"
                );
                self.store.append(course.clone());
                self.form.clear();
                self.presenter
                    .on_notice(&Notice::success("course added successfully"));
                self.step = Step::Review;
                self.render();
                Ok(course)
            }
            Err(err) => {
                self.draft = before;
                let restart = err.requires_restart();
                let err = self.reject(err);
                if restart {
                    self.step = Step::CourseInfo;
                    self.render();
                }
                Err(err)
            }
        }
    }

    /// Aggregate every stored course and open the results view.
    pub fn calculate(&self) -> Result<CgpaSummary, GradeError> {
        match engine::aggregate(self.store.list()) {
            Ok(summary) => {
                tracing::info!(
                    cgpa = %summary.cgpa_display(),
                    courses = summary.course_count,
                    "cgpa calculated"
                );
                self.presenter.on_results(&summary, self.store.list());
                Ok(summary)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Start deleting the course at `index`.
    pub fn request_delete(&self, index: usize) -> Result<DeleteIntent, GradeError> {
        match self.store.get(index) {
            Some(course) => Ok(DeleteIntent {
                index,
                name: course.name().to_string(),
                revision: self.store.revision(),
            }),
            None => Err(self.reject(GradeError::IndexOutOfBounds {
                index,
                len: self.store.count(),
            })),
        }
    }

    /// Finish a deletion the user confirmed.
    ///
    /// Fails with [`GradeError::StaleConfirmation`] if the list changed after
    /// the intent was issued.
    pub fn confirm_delete(&mut self, intent: DeleteIntent) -> Result<Course, GradeError> {
        if intent.revision != self.store.revision() {
            return Err(self.reject(GradeError::StaleConfirmation));
        }
        let removed = match self.store.remove_at(intent.index) {
            Ok(course) => course,
            Err(err) => return Err(self.reject(err)),
        };
        tracing::info!(course = removed.name(), position = intent.index, "course removed");
        self.presenter
            .on_course_list(&CourseListView::from_courses(self.store.list()));
        self.presenter.on_notice(&Notice::success("course removed"));
        Ok(removed)
    }

    /// Abandon the course being entered and return to step 1.
    pub fn cancel_course(&mut self) {
        self.draft.reset();
        self.form.clear();
        self.step = Step::CourseInfo;
        self.render();
    }

    /// Clear the draft, the course list, and the form, and return to step 1.
    pub fn reset(&mut self) {
        let dropped = self.store.count();
        self.draft.reset();
        self.store.clear();
        self.form.clear();
        self.step = Step::CourseInfo;
        tracing::info!(dropped, "calculator reset");
        self.render();
        self.presenter
            .on_notice(&Notice::success("calculator reset successfully"));
    }

    fn render(&self) {
        self.presenter.on_step_changed(self.step);
        if self.step == Step::Review {
            self.presenter
                .on_course_list(&CourseListView::from_courses(self.store.list()));
        }
    }

    fn reject(&self, err: GradeError) -> GradeError {
        tracing::warn!(error = %err, step = self.step.number(), "action rejected");
        self.presenter.on_notice(&Notice::from(&err));
        err
    }
}
