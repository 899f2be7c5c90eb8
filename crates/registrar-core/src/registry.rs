// crates/registrar-core/src/registry.rs
//
// In-memory enrollment registry implementing the `EnrollmentStore` trait.
//
// Holds the student catalog, the course catalog, and the two enrollment
// indexes (student -> courses, course -> students) behind a single RwLock.
// Writers validate everything before touching any map, so both indexes are
// always mutually consistent and a rejected request changes nothing.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::record::{Course, Student};
use crate::traits::EnrollmentStore;

/// Catalog and enrollment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Number of registered students.
    pub students: usize,
    /// Number of registered courses.
    pub courses: usize,
    /// Number of (student, course) enrollment pairs.
    pub enrollments: usize,
}

/// The four maps guarded together by the registry lock.
#[derive(Debug, Default)]
struct RegistryState {
    students: HashMap<String, Student>,
    courses: HashMap<String, Course>,
    /// Student id -> enrolled course codes.
    by_student: HashMap<String, BTreeSet<String>>,
    /// Course code -> enrolled student ids.
    by_course: HashMap<String, BTreeSet<String>>,
}

/// In-memory student/course registry with bidirectional enrollment tracking.
///
/// Keys are opaque, case-sensitive strings. List operations return records
/// ordered by key.
#[derive(Debug, Default)]
pub struct EnrollmentRegistry {
    state: RwLock<RegistryState>,
}

impl EnrollmentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations never leave the state half-applied, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnrollmentStore for EnrollmentRegistry {
    fn register_student(&self, student: Student) -> Result<Student, RegistryError> {
        if student.id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "student id is required".to_string(),
            ));
        }

        let mut state = self.write();
        if state.students.contains_key(&student.id) {
            return Err(RegistryError::AlreadyExists(format!(
                "student with id '{}' already exists",
                student.id
            )));
        }

        state.students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    fn register_course(&self, course: Course) -> Result<Course, RegistryError> {
        if course.code.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "course code is required".to_string(),
            ));
        }

        let mut state = self.write();
        if state.courses.contains_key(&course.code) {
            return Err(RegistryError::AlreadyExists(format!(
                "course with code '{}' already exists",
                course.code
            )));
        }

        state.courses.insert(course.code.clone(), course.clone());
        Ok(course)
    }

    fn enroll(&self, student_id: &str, course_code: &str) -> Result<(), RegistryError> {
        let mut state = self.write();

        if !state.students.contains_key(student_id) {
            return Err(RegistryError::NotFound(format!(
                "student with id '{}' does not exist",
                student_id
            )));
        }
        if !state.courses.contains_key(course_code) {
            return Err(RegistryError::NotFound(format!(
                "course with code '{}' does not exist",
                course_code
            )));
        }
        let already_enrolled = state
            .by_student
            .get(student_id)
            .is_some_and(|codes| codes.contains(course_code));
        if already_enrolled {
            return Err(RegistryError::AlreadyExists(format!(
                "student '{}' is already enrolled in course '{}'",
                student_id, course_code
            )));
        }

        state
            .by_student
            .entry(student_id.to_string())
            .or_default()
            .insert(course_code.to_string());
        state
            .by_course
            .entry(course_code.to_string())
            .or_default()
            .insert(student_id.to_string());
        Ok(())
    }

    fn courses_for_student(&self, student_id: &str) -> Result<Vec<Course>, RegistryError> {
        let state = self.read();

        if !state.students.contains_key(student_id) {
            return Err(RegistryError::NotFound(format!(
                "student with id '{}' does not exist",
                student_id
            )));
        }

        let courses = state
            .by_student
            .get(student_id)
            .into_iter()
            .flatten()
            .filter_map(|code| state.courses.get(code).cloned())
            .collect();
        Ok(courses)
    }

    fn students_for_course(&self, course_code: &str) -> Result<Vec<Student>, RegistryError> {
        let state = self.read();

        if !state.courses.contains_key(course_code) {
            return Err(RegistryError::NotFound(format!(
                "course with code '{}' does not exist",
                course_code
            )));
        }

        let students = state
            .by_course
            .get(course_code)
            .into_iter()
            .flatten()
            .filter_map(|id| state.students.get(id).cloned())
            .collect();
        Ok(students)
    }

    fn stats(&self) -> RegistryStats {
        let state = self.read();
        RegistryStats {
            students: state.students.len(),
            courses: state.courses.len(),
            enrollments: state.by_student.values().map(BTreeSet::len).sum(),
        }
    }
}
