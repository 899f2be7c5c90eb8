// crates/registrar-rpc/tests/enrollment_flow.rs
//
// End-to-end tests through the public tower service: raw HTTP request bodies
// in, JSON-RPC envelopes out, backed by a real EnrollmentRegistry.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use serde_json::{json, Value};
use tower_service::Service;

use registrar_core::{Course, EnrollmentRegistry, EnrollmentStore, ErrorCode, Student};
use registrar_rpc::handlers::course::{ListStudentsForCourseResponse, RegisterCourseResponse};
use registrar_rpc::handlers::enrollment::EnrollResponse;
use registrar_rpc::handlers::student::{ListCoursesForStudentResponse, RegisterStudentResponse};
use registrar_rpc::{JsonRpcResponse, RegistrarJsonRpcServer, RegistrarRpcServer, RpcConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_service() -> (RegistrarJsonRpcServer, Arc<EnrollmentRegistry>) {
    let registry = Arc::new(EnrollmentRegistry::new());
    let server = RegistrarRpcServer::new(RpcConfig::default(), registry.clone());
    (server.service(), registry)
}

/// POST raw bytes to the service and decode the response envelope.
async fn post_raw(svc: &mut RegistrarJsonRpcServer, body: impl Into<Bytes>) -> JsonRpcResponse {
    let request = http::Request::builder()
        .method("POST")
        .uri("/registrar.rpc.RegistrarService/Call")
        .header("content-type", "application/json")
        .body(Full::new(body.into()))
        .unwrap();

    let response = svc.call(request).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn rpc(svc: &mut RegistrarJsonRpcServer, method: &str, params: Value) -> JsonRpcResponse {
    let body = serde_json::to_vec(&json!({ "method": method, "params": params })).unwrap();
    post_raw(svc, body).await
}

fn code_of(resp: &JsonRpcResponse) -> Option<ErrorCode> {
    resp.error.as_ref().map(|e| e.code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_classroom_scenario_end_to_end() {
    let (mut svc, _registry) = new_service();

    let carlos = json!({
        "id": "12345",
        "given_names": "Carlos",
        "surnames": "Montellano",
        "program": "Sistemas"
    });
    let resp = rpc(&mut svc, "student/register", carlos.clone()).await;
    let registered: RegisterStudentResponse = resp.into_result().unwrap();
    assert_eq!(registered.student.id, "12345");

    let inf101 = json!({ "code": "INF101", "name": "Programación I", "instructor": "Ing. Pérez" });
    let inf202 = json!({ "code": "INF202", "name": "Estructuras de Datos", "instructor": "Ing. Gómez" });
    let resp = rpc(&mut svc, "course/register", inf101).await;
    let registered: RegisterCourseResponse = resp.into_result().unwrap();
    assert_eq!(registered.course.instructor, "Ing. Pérez");
    let resp = rpc(&mut svc, "course/register", inf202).await;
    assert!(resp.success);

    for code in ["INF101", "INF202"] {
        let resp = rpc(
            &mut svc,
            "enrollment/enroll",
            json!({ "student_id": "12345", "course_code": code }),
        )
        .await;
        let ack: EnrollResponse = resp.into_result().unwrap();
        assert!(ack.ok);
    }

    let resp = rpc(
        &mut svc,
        "enrollment/enroll",
        json!({ "student_id": "12345", "course_code": "INF101" }),
    )
    .await;
    assert!(!resp.success);
    assert_eq!(code_of(&resp), Some(ErrorCode::AlreadyExists));

    let resp = rpc(&mut svc, "student/courses", json!({ "student_id": "12345" })).await;
    let list: ListCoursesForStudentResponse = resp.into_result().unwrap();
    let codes: Vec<&str> = list.courses.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["INF101", "INF202"]);

    let resp = rpc(&mut svc, "course/students", json!({ "course_code": "INF101" })).await;
    let list: ListStudentsForCourseResponse = resp.into_result().unwrap();
    assert_eq!(list.students.len(), 1);
    assert_eq!(serde_json::to_value(&list.students[0]).unwrap(), carlos);
}

#[tokio::test]
async fn test_rpc_shares_state_with_injected_registry() {
    let (mut svc, registry) = new_service();

    registry
        .register_student(Student {
            id: "s1".to_string(),
            ..Student::default()
        })
        .unwrap();
    registry
        .register_course(Course {
            code: "C1".to_string(),
            ..Course::default()
        })
        .unwrap();

    let resp = rpc(
        &mut svc,
        "enrollment/enroll",
        json!({ "student_id": "s1", "course_code": "C1" }),
    )
    .await;
    assert!(resp.success);
    assert_eq!(registry.courses_for_student("s1").unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_enrollment_leaves_lists_untouched() {
    let (mut svc, _registry) = new_service();
    rpc(&mut svc, "course/register", json!({ "code": "C1" })).await;

    let resp = rpc(
        &mut svc,
        "enrollment/enroll",
        json!({ "student_id": "ghost", "course_code": "C1" }),
    )
    .await;
    assert_eq!(code_of(&resp), Some(ErrorCode::NotFound));

    let resp = rpc(&mut svc, "course/students", json!({ "course_code": "C1" })).await;
    let list: ListStudentsForCourseResponse = resp.into_result().unwrap();
    assert!(list.students.is_empty());
}

#[tokio::test]
async fn test_duplicate_student_registration() {
    let (mut svc, registry) = new_service();
    let params = json!({ "id": "12345", "given_names": "Carlos" });

    assert!(rpc(&mut svc, "student/register", params.clone()).await.success);
    let resp = rpc(&mut svc, "student/register", params).await;
    assert_eq!(code_of(&resp), Some(ErrorCode::AlreadyExists));
    assert_eq!(registry.stats().students, 1);
}

#[tokio::test]
async fn test_garbage_body_is_invalid_argument() {
    let (mut svc, _registry) = new_service();
    let resp = post_raw(&mut svc, "not json at all").await;
    assert_eq!(code_of(&resp), Some(ErrorCode::InvalidArgument));

    let resp = post_raw(&mut svc, Bytes::new()).await;
    assert_eq!(code_of(&resp), Some(ErrorCode::InvalidArgument));
}

#[tokio::test]
async fn test_error_codes_on_the_wire() {
    let (mut svc, _registry) = new_service();
    let resp = rpc(&mut svc, "student/courses", json!({ "student_id": "nobody" })).await;

    let raw = serde_json::to_value(&resp).unwrap();
    assert_eq!(raw["success"], false);
    assert_eq!(raw["error"]["code"], "NOT_FOUND");

    let resp = rpc(&mut svc, "no/such/method", json!({})).await;
    let raw = serde_json::to_value(&resp).unwrap();
    assert_eq!(raw["error"]["code"], "UNIMPLEMENTED");
}
