// crates/registrar-core/src/traits.rs

use crate::error::RegistryError;
use crate::record::{Course, Student};
use crate::registry::RegistryStats;

/// Trait for the student/course enrollment store.
///
/// Implemented by `EnrollmentRegistry` (in-memory). The RPC layer only sees
/// this trait, so each call must be atomic on its own: a failed call leaves
/// no trace in the store.
pub trait EnrollmentStore: Send + Sync {
    /// Register a new student. Returns the stored record.
    fn register_student(&self, student: Student) -> Result<Student, RegistryError>;

    /// Register a new course. Returns the stored record.
    fn register_course(&self, course: Course) -> Result<Course, RegistryError>;

    /// Enroll an existing student in an existing course.
    fn enroll(&self, student_id: &str, course_code: &str) -> Result<(), RegistryError>;

    /// List the courses a student is enrolled in.
    fn courses_for_student(&self, student_id: &str) -> Result<Vec<Course>, RegistryError>;

    /// List the students enrolled in a course.
    fn students_for_course(&self, course_code: &str) -> Result<Vec<Student>, RegistryError>;

    /// Catalog and enrollment counts.
    fn stats(&self) -> RegistryStats;
}
