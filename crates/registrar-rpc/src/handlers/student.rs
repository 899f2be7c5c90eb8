// crates/registrar-rpc/src/handlers/student.rs
//
// Student handlers: RegisterStudent, ListCoursesForStudent.

use serde::{Deserialize, Serialize};

use registrar_core::{Course, EnrollmentStore, RegistryError, Student};

// ---------------------------------------------------------------------------
// RegisterStudent
// ---------------------------------------------------------------------------

/// Request to register a new student. Fields are the student record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    #[serde(flatten)]
    pub student: Student,
}

/// Response carrying the stored student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentResponse {
    pub student: Student,
}

/// Handle a RegisterStudent request.
pub async fn handle_register_student(
    store: &dyn EnrollmentStore,
    request: RegisterStudentRequest,
) -> Result<RegisterStudentResponse, RegistryError> {
    let student = store.register_student(request.student)?;
    tracing::info!("Registered student {}", student.id);
    Ok(RegisterStudentResponse { student })
}

// ---------------------------------------------------------------------------
// ListCoursesForStudent
// ---------------------------------------------------------------------------

/// Request to list the courses a student is enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCoursesForStudentRequest {
    /// The student's id.
    #[serde(default)]
    pub student_id: String,
}

/// Response containing the student's courses, ordered by course code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCoursesForStudentResponse {
    pub courses: Vec<Course>,
}

/// Handle a ListCoursesForStudent request.
pub async fn handle_list_courses_for_student(
    store: &dyn EnrollmentStore,
    request: ListCoursesForStudentRequest,
) -> Result<ListCoursesForStudentResponse, RegistryError> {
    let courses = store.courses_for_student(&request.student_id)?;
    Ok(ListCoursesForStudentResponse { courses })
}
