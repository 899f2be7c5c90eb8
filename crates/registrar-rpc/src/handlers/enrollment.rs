// crates/registrar-rpc/src/handlers/enrollment.rs
//
// Enrollment handler: Enroll.

use serde::{Deserialize, Serialize};

use registrar_core::{EnrollmentStore, RegistryError};

/// Message returned with every successful enrollment.
pub const ENROLLED_MESSAGE: &str = "Enrollment recorded";

/// Request to enroll a student in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    /// Id of a registered student.
    #[serde(default)]
    pub student_id: String,
    /// Code of a registered course.
    #[serde(default)]
    pub course_code: String,
}

/// Acknowledgement of a successful enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollResponse {
    /// Always true; failures travel in the response envelope's error.
    pub ok: bool,
    /// Human-readable status message.
    pub message: String,
}

/// Handle an Enroll request.
pub async fn handle_enroll(
    store: &dyn EnrollmentStore,
    request: EnrollRequest,
) -> Result<EnrollResponse, RegistryError> {
    store.enroll(&request.student_id, &request.course_code)?;
    tracing::info!(
        "Enrolled student {} in course {}",
        request.student_id,
        request.course_code
    );
    Ok(EnrollResponse {
        ok: true,
        message: ENROLLED_MESSAGE.to_string(),
    })
}
