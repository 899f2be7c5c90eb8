// crates/registrar-rpc/src/handlers/course.rs
//
// Course handlers: RegisterCourse, ListStudentsForCourse.

use serde::{Deserialize, Serialize};

use registrar_core::{Course, EnrollmentStore, RegistryError, Student};

// ---------------------------------------------------------------------------
// RegisterCourse
// ---------------------------------------------------------------------------

/// Request to register a new course. Fields are the course record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCourseRequest {
    #[serde(flatten)]
    pub course: Course,
}

/// Response carrying the stored course record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCourseResponse {
    pub course: Course,
}

/// Handle a RegisterCourse request.
pub async fn handle_register_course(
    store: &dyn EnrollmentStore,
    request: RegisterCourseRequest,
) -> Result<RegisterCourseResponse, RegistryError> {
    let course = store.register_course(request.course)?;
    tracing::info!("Registered course {}", course.code);
    Ok(RegisterCourseResponse { course })
}

// ---------------------------------------------------------------------------
// ListStudentsForCourse
// ---------------------------------------------------------------------------

/// Request to list the students enrolled in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStudentsForCourseRequest {
    /// The course code.
    #[serde(default)]
    pub course_code: String,
}

/// Response containing the course's students, ordered by student id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStudentsForCourseResponse {
    pub students: Vec<Student>,
}

/// Handle a ListStudentsForCourse request.
pub async fn handle_list_students_for_course(
    store: &dyn EnrollmentStore,
    request: ListStudentsForCourseRequest,
) -> Result<ListStudentsForCourseResponse, RegistryError> {
    let students = store.students_for_course(&request.course_code)?;
    Ok(ListStudentsForCourseResponse { students })
}
