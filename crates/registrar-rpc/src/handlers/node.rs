// crates/registrar-rpc/src/handlers/node.rs
//
// Node health handler: GetHealth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registrar_core::{EnrollmentStore, RegistryError};

/// Request for node health status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHealthRequest {}

/// Response containing node health status and registry counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHealthResponse {
    /// Overall health. The in-memory registry has no failure modes, so this
    /// is always "healthy" when the server answers.
    pub status: String,
    /// Software version.
    pub version: String,
    /// When the server was started.
    pub started_at: DateTime<Utc>,
    /// Seconds since `started_at`.
    pub uptime_seconds: u64,
    /// Number of registered students.
    pub students: usize,
    /// Number of registered courses.
    pub courses: usize,
    /// Number of (student, course) enrollments.
    pub enrollments: usize,
}

/// Handle a GetHealth request.
pub async fn handle_get_health(
    store: &dyn EnrollmentStore,
    _request: GetHealthRequest,
    started_at: DateTime<Utc>,
) -> Result<GetHealthResponse, RegistryError> {
    let stats = store.stats();
    let uptime_seconds = (Utc::now() - started_at).num_seconds().max(0) as u64;

    Ok(GetHealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        uptime_seconds,
        students: stats.students,
        courses: stats.courses,
        enrollments: stats.enrollments,
    })
}
