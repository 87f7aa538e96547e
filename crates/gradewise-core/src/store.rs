//! In-memory ordered course list.

use crate::error::GradeError;
use crate::model::Course;

/// Finalized courses in insertion order.
///
/// Courses are addressed by position only. Every mutation bumps
/// [`CourseStore::revision`], which lets callers detect that a position they
/// captured earlier may now point at a different course.
#[derive(Debug, Clone, Default)]
pub struct CourseStore {
    courses: Vec<Course>,
    revision: u64,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, course: Course) {
        tracing::debug!(course = course.name(), position = self.courses.len(), "course appended");
        self.courses.push(course);
        self.revision += 1;
    }

    /// Remove the course at `index`, shifting later courses down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Course, GradeError> {
        if index >= self.courses.len() {
            return Err(GradeError::IndexOutOfBounds {
                index,
                len: self.courses.len(),
            });
        }
        self.revision += 1;
        Ok(self.courses.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn count(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn clear(&mut self) {
        self.courses.clear();
        self.revision += 1;
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<'a> IntoIterator for &'a CourseStore {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_course;
    use crate::model::ExamScores;

    fn course(name: &str) -> Course {
        compute_course(name, 3, &[], ExamScores::new(50.0, 50.0, 50.0)).unwrap()
    }

    fn names(store: &CourseStore) -> Vec<&str> {
        store.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn append_keeps_insertion_order_and_duplicates() {
        let mut store = CourseStore::new();
        assert!(store.is_empty());
        store.append(course("Math"));
        store.append(course("Physics"));
        store.append(course("Math"));
        assert_eq!(store.count(), 3);
        assert_eq!(names(&store), vec!["Math", "Physics", "Math"]);
    }

    #[test]
    fn remove_shifts_higher_indices_down() {
        let mut store = CourseStore::new();
        for n in ["a", "b", "c", "d"] {
            store.append(course(n));
        }
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.name(), "b");
        assert_eq!(names(&store), vec!["a", "c", "d"]);
        assert_eq!(store.get(1).map(|c| c.name()), Some("c"));
    }

    #[test]
    fn repeated_remove_at_zero_empties_list() {
        let mut store = CourseStore::new();
        for n in ["a", "b", "c"] {
            store.append(course(n));
        }
        for expected in ["a", "b", "c"] {
            assert_eq!(store.remove_at(0).unwrap().name(), expected);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn remove_out_of_bounds_is_signaled() {
        let mut store = CourseStore::new();
        store.append(course("a"));
        let before = store.revision();
        assert_eq!(
            store.remove_at(1),
            Err(GradeError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(store.count(), 1);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn revision_tracks_mutations() {
        let mut store = CourseStore::new();
        assert_eq!(store.revision(), 0);
        store.append(course("a"));
        store.append(course("b"));
        store.remove_at(0).unwrap();
        assert_eq!(store.revision(), 3);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 4);
    }
}
