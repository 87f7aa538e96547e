//! Presentation boundary.
//!
//! The wizard never draws anything. It tells a [`Presenter`] which step to
//! show, what the course list looks like, which notice to flash, and when to
//! open the results view.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::model::{CgpaSummary, Course, Grade, Step};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

impl From<&GradeError> for Notice {
    fn from(err: &GradeError) -> Self {
        Notice::error(err.to_string())
    }
}

/// One row of the course list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListEntry {
    /// Position to pass back for deletion.
    pub index: usize,
    pub name: String,
    pub credits: u8,
    /// Total score with two decimals.
    pub score: String,
    pub grade: Grade,
    pub points: u8,
}

/// Everything needed to draw the review list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseListView {
    pub entries: Vec<CourseListEntry>,
    /// Show the empty-state placeholder instead of entries.
    pub empty: bool,
    /// Whether the CGPA action is enabled.
    pub calculate_enabled: bool,
}

impl CourseListView {
    pub fn from_courses(courses: &[Course]) -> Self {
        let entries: Vec<CourseListEntry> = courses
            .iter()
            .enumerate()
            .map(|(index, c)| CourseListEntry {
                index,
                name: c.name().to_string(),
                credits: c.credits(),
                score: c.total_score_display(),
                grade: c.grade(),
                points: c.points(),
            })
            .collect();
        let empty = entries.is_empty();
        Self {
            entries,
            empty,
            calculate_enabled: !empty,
        }
    }
}

/// Receives render instructions from the wizard.
pub trait Presenter {
    /// Show only `step`.
    fn on_step_changed(&self, step: Step);
    /// Redraw the course list.
    fn on_course_list(&self, view: &CourseListView);
    /// Flash a notice.
    fn on_notice(&self, notice: &Notice);
    /// Open the results view.
    fn on_results(&self, summary: &CgpaSummary, courses: &[Course]);
}

/// Presenter that ignores everything.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn on_step_changed(&self, _: Step) {}
    fn on_course_list(&self, _: &CourseListView) {}
    fn on_notice(&self, _: &Notice) {}
    fn on_results(&self, _: &CgpaSummary, _: &[Course]) {}
}

/// A render instruction captured by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    StepChanged(Step),
    CourseList(CourseListView),
    Notice(Notice),
    Results(CgpaSummary),
}

/// Presenter that records every instruction, for tests and headless use.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.lock().clone()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<PresenterEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Most recent notice, if any.
    pub fn last_notice(&self) -> Option<Notice> {
        self.lock().iter().rev().find_map(|e| match e {
            PresenterEvent::Notice(n) => Some(n.clone()),
            _ => None,
        })
    }

    /// Most recent course list view, if any.
    pub fn last_course_list(&self) -> Option<CourseListView> {
        self.lock().iter().rev().find_map(|e| match e {
            PresenterEvent::CourseList(v) => Some(v.clone()),
            _ => None,
        })
    }

    fn push(&self, event: PresenterEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PresenterEvent>> {
        // A poisoned log still holds valid events.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn on_step_changed(&self, step: Step) {
        self.push(PresenterEvent::StepChanged(step));
    }

    fn on_course_list(&self, view: &CourseListView) {
        self.push(PresenterEvent::CourseList(view.clone()));
    }

    fn on_notice(&self, notice: &Notice) {
        self.push(PresenterEvent::Notice(notice.clone()));
    }

    fn on_results(&self, summary: &CgpaSummary, _: &[Course]) {
        self.push(PresenterEvent::Results(summary.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_course;
    use crate::model::ExamScores;

    #[test]
    fn empty_list_view_disables_calculation() {
        let view = CourseListView::from_courses(&[]);
        assert!(view.empty);
        assert!(!view.calculate_enabled);
        assert!(view.entries.is_empty());
    }

    #[test]
    fn list_view_rows_follow_store_order() {
        let courses = vec![
            compute_course("Math", 3, &[8.0; 10], ExamScores::new(50.0, 90.0, 70.0)).unwrap(),
            compute_course("Art", 2, &[], ExamScores::new(100.0, 100.0, 100.0)).unwrap(),
        ];
        let view = CourseListView::from_courses(&courses);
        assert!(!view.empty);
        assert!(view.calculate_enabled);
        assert_eq!(view.entries[0].index, 0);
        assert_eq!(view.entries[0].score, "65.80");
        assert_eq!(view.entries[0].grade, Grade::C);
        assert_eq!(view.entries[1].name, "Art");
        assert_eq!(view.entries[1].points, 9);
    }

    #[test]
    fn recording_presenter_shares_log_between_clones() {
        let presenter = RecordingPresenter::new();
        let handle = presenter.clone();
        presenter.on_step_changed(Step::Exams);
        presenter.on_notice(&Notice::error("nope"));

        assert_eq!(handle.events().len(), 2);
        assert_eq!(handle.last_notice(), Some(Notice::error("nope")));
        assert_eq!(handle.take().len(), 2);
        assert!(presenter.events().is_empty());
    }

    #[test]
    fn list_view_json_shape() {
        let courses =
            vec![compute_course("Math", 3, &[8.0; 10], ExamScores::new(50.0, 90.0, 70.0)).unwrap()];
        let json = serde_json::to_value(CourseListView::from_courses(&courses)).unwrap();
        assert_eq!(json["entries"][0]["grade"], "C");
        assert_eq!(json["entries"][0]["score"], "65.80");
        assert_eq!(json["calculate_enabled"], true);
    }

    #[test]
    fn notice_from_error_uses_message() {
        let notice = Notice::from(&GradeError::EmptyAggregation);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "please add at least one course");
    }
}
