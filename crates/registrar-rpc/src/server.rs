// crates/registrar-rpc/src/server.rs
//
// RPC server setup: RegistrarRpcServer and RpcConfig.
//
// Uses a JSON-RPC-over-gRPC approach. A single tonic unary service accepts
// JSON-encoded requests with a method field, dispatches to the appropriate
// handler, and returns JSON-encoded responses carrying either a result or
// an error code plus message.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;
use tracing::Instrument;

use registrar_core::{EnrollmentStore, ErrorCode, RegistryError};

use crate::handlers;
use crate::middleware::{self, RequestId};

/// Fully-qualified tonic service name. Clients POST to `/{SERVICE_NAME}/Call`.
pub const SERVICE_NAME: &str = "registrar.rpc.RegistrarService";

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
/// The client sends a method name and a JSON params payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The RPC method to invoke (e.g., "student/register", "enrollment/enroll").
    pub method: String,
    /// JSON-encoded parameters for the method. Omitted params behave like `{}`.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Error carried in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    /// Taxonomy code. Callers branch on this, never on `message`.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<RegistryError> for RpcError {
    fn from(err: RegistryError) -> Self {
        Self::new(err.code(), err.message())
    }
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// The result data (if success).
    pub result: Option<serde_json::Value>,
    /// Error code and message (if not success).
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn ok(value: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(value),
            error: None,
        }
    }

    pub fn err(error: RpcError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }

    /// Convert into a `Result`, decoding the payload into `T` on success.
    pub fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, RpcError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let value = self.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(|e| {
            RpcError::new(ErrorCode::Internal, format!("Failed to decode result: {}", e))
        })
    }
}

// ---------------------------------------------------------------------------
// RegistrarRpcServer
// ---------------------------------------------------------------------------

/// The RPC server for the Registrar enrollment service.
///
/// Holds the injected enrollment store and exposes a tonic-based gRPC
/// server with JSON-RPC dispatching.
#[derive(Clone)]
pub struct RegistrarRpcServer {
    /// Server configuration.
    config: RpcConfig,
    /// Shared enrollment store.
    store: Arc<dyn EnrollmentStore>,
    /// Reported by the health endpoint.
    started_at: DateTime<Utc>,
}

impl std::fmt::Debug for RegistrarRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarRpcServer")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl RegistrarRpcServer {
    /// Create a new RegistrarRpcServer.
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port).
    /// * `store` - Shared enrollment store all handlers operate on.
    pub fn new(config: RpcConfig, store: Arc<dyn EnrollmentStore>) -> Self {
        Self {
            config,
            store,
            started_at: Utc::now(),
        }
    }

    /// Set the start time reported by `node/health`.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// The configured bind address as a string (e.g., "0.0.0.0:50051").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the tower service that handles JSON-RPC calls.
    ///
    /// `start` wraps this in the logging interceptor; tests can drive it
    /// directly.
    pub fn service(&self) -> RegistrarJsonRpcServer {
        RegistrarJsonRpcServer::new(RegistrarServiceImpl {
            store: self.store.clone(),
            started_at: self.started_at,
        })
    }

    /// Start the RPC server and listen for requests.
    ///
    /// This binds to the configured address and serves requests until
    /// the process is terminated.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start the RPC server and stop gracefully once `signal` resolves.
    pub async fn start_with_shutdown<F>(&self, signal: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send,
    {
        let addr: std::net::SocketAddr = self.bind_address().parse()?;

        tracing::info!("Registrar RPC server starting on {}", addr);

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                self.service(),
                middleware::logging_interceptor,
            ))
            .serve_with_shutdown(addr, signal)
            .await?;

        tracing::info!("Registrar RPC server stopped");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// gRPC Service Definition (manual, no proto codegen)
// ---------------------------------------------------------------------------

/// The internal service implementation that holds shared state
/// and dispatches JSON-RPC calls to the appropriate handler.
#[derive(Clone)]
struct RegistrarServiceImpl {
    store: Arc<dyn EnrollmentStore>,
    started_at: DateTime<Utc>,
}

impl RegistrarServiceImpl {
    /// Dispatch a JSON-RPC request to the appropriate handler based on the method name.
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let store = &*self.store;

        let result = match request.method.as_str() {
            // Students
            "student/register" => {
                dispatch_handler(request.params, |r| {
                    handlers::student::handle_register_student(store, r)
                })
                .await
            }
            "student/courses" => {
                dispatch_handler(request.params, |r| {
                    handlers::student::handle_list_courses_for_student(store, r)
                })
                .await
            }

            // Courses
            "course/register" => {
                dispatch_handler(request.params, |r| {
                    handlers::course::handle_register_course(store, r)
                })
                .await
            }
            "course/students" => {
                dispatch_handler(request.params, |r| {
                    handlers::course::handle_list_students_for_course(store, r)
                })
                .await
            }

            // Enrollment
            "enrollment/enroll" => {
                dispatch_handler(request.params, |r| {
                    handlers::enrollment::handle_enroll(store, r)
                })
                .await
            }

            // Node
            "node/health" => {
                let started_at = self.started_at;
                dispatch_handler(request.params, |r| {
                    handlers::node::handle_get_health(store, r, started_at)
                })
                .await
            }

            _ => Err(RpcError::new(
                ErrorCode::Unimplemented,
                format!("Unknown method: {}", request.method),
            )),
        };

        match result {
            Ok(value) => JsonRpcResponse::ok(value),
            Err(err) => {
                tracing::warn!(code = %err.code, "RPC call rejected: {}", err.message);
                JsonRpcResponse::err(err)
            }
        }
    }
}

/// Generic dispatch helper: deserialize params into a request type,
/// call the handler, and serialize the result to JSON.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, RpcError>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, RegistryError>>,
{
    let params = if params.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        params
    };
    let request: Req = serde_json::from_value(params).map_err(|e| {
        RpcError::new(
            ErrorCode::InvalidArgument,
            format!("Failed to deserialize request: {}", e),
        )
    })?;
    let response = handler(request).await?;
    serde_json::to_value(response).map_err(|e| {
        RpcError::new(
            ErrorCode::Internal,
            format!("Failed to serialize response: {}", e),
        )
    })
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------
// We define a single gRPC service; every path under it is handled the same
// way. The request and response are raw bytes (JSON-encoded
// JsonRpcRequest/Response).

/// The tonic service wrapper. Implements the low-level gRPC service
/// by accepting bytes, deserializing as JSON-RPC, and dispatching.
#[derive(Clone)]
pub struct RegistrarJsonRpcServer {
    inner: RegistrarServiceImpl,
}

impl std::fmt::Debug for RegistrarJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarJsonRpcServer").finish()
    }
}

impl RegistrarJsonRpcServer {
    fn new(inner: RegistrarServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for RegistrarJsonRpcServer {
    const NAME: &'static str = SERVICE_NAME;
}

impl<B> tower_service::Service<http::Request<B>> for RegistrarJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .copied()
            .unwrap_or_default();

        Box::pin(async move {
            let body_bytes = match collect_body(req.into_body()).await {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!(request_id = %request_id, "Failed to read request body: {}", e);
                    return Ok(json_response(&JsonRpcResponse::err(RpcError::new(
                        ErrorCode::InvalidArgument,
                        format!("Failed to read request body: {}", e),
                    ))));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(r) => r,
                Err(e) => {
                    return Ok(json_response(&JsonRpcResponse::err(RpcError::new(
                        ErrorCode::InvalidArgument,
                        format!("Invalid JSON-RPC request: {}", e),
                    ))));
                }
            };

            let span = tracing::info_span!(
                "rpc",
                request_id = %request_id,
                method = %rpc_request.method
            );
            let rpc_response = inner.dispatch(rpc_request).instrument(span).await;
            Ok(json_response(&rpc_response))
        })
    }
}

/// Collect the body of an HTTP request into bytes.
async fn collect_body<B>(body: B) -> Result<bytes::Bytes, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let err: Box<dyn std::error::Error + Send + Sync> = e.into();
            Err(err.to_string())
        }
    }
}

/// Serialize an envelope into an HTTP response.
fn json_response(response: &JsonRpcResponse) -> http::Response<tonic::body::BoxBody> {
    let json = match serde_json::to_vec(response) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize response envelope: {}", e);
            br#"{"success":false,"result":null,"error":{"code":"INTERNAL","message":"response serialization failed"}}"#
                .to_vec()
        }
    };
    build_response(json)
}

/// Build an HTTP response with the given JSON body.
fn build_response(json: Vec<u8>) -> http::Response<tonic::body::BoxBody> {
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    let mut response = http::Response::new(body);
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::EnrollmentRegistry;
    use serde_json::json;

    fn service_impl() -> RegistrarServiceImpl {
        RegistrarServiceImpl {
            store: Arc::new(EnrollmentRegistry::new()),
            started_at: Utc::now(),
        }
    }

    async fn call(svc: &RegistrarServiceImpl, method: &str, params: serde_json::Value) -> JsonRpcResponse {
        svc.dispatch(JsonRpcRequest {
            method: method.to_string(),
            params,
        })
        .await
    }

    fn error_code(resp: &JsonRpcResponse) -> Option<ErrorCode> {
        resp.error.as_ref().map(|e| e.code)
    }

    #[tokio::test]
    async fn test_register_student_echoes_record() {
        let svc = service_impl();
        let params = json!({
            "id": "12345",
            "given_names": "Carlos",
            "surnames": "Montellano",
            "program": "Sistemas"
        });
        let resp = call(&svc, "student/register", params.clone()).await;
        assert!(resp.success);
        assert_eq!(resp.result.unwrap()["student"], params);
    }

    #[tokio::test]
    async fn test_missing_id_is_invalid_argument() {
        let svc = service_impl();
        let resp = call(&svc, "student/register", json!({ "given_names": "Ana" })).await;
        assert!(!resp.success);
        assert_eq!(error_code(&resp), Some(ErrorCode::InvalidArgument));

        let resp = call(&svc, "course/register", serde_json::Value::Null).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::InvalidArgument));
    }

    #[tokio::test]
    async fn test_malformed_params_are_invalid_argument() {
        let svc = service_impl();
        let resp = call(&svc, "enrollment/enroll", json!({ "student_id": 42 })).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::InvalidArgument));
        assert!(resp
            .error
            .unwrap()
            .message
            .starts_with("Failed to deserialize request"));
    }

    #[tokio::test]
    async fn test_unknown_method_is_unimplemented() {
        let svc = service_impl();
        let resp = call(&svc, "student/delete", json!({})).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::Unimplemented));
    }

    #[tokio::test]
    async fn test_enroll_error_codes() {
        let svc = service_impl();
        call(&svc, "student/register", json!({ "id": "s1" })).await;
        call(&svc, "course/register", json!({ "code": "C1" })).await;

        let resp = call(&svc, "enrollment/enroll", json!({ "student_id": "nope", "course_code": "C1" })).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::NotFound));

        let resp = call(&svc, "enrollment/enroll", json!({ "student_id": "s1", "course_code": "nope" })).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::NotFound));

        let resp = call(&svc, "enrollment/enroll", json!({ "student_id": "s1", "course_code": "C1" })).await;
        assert!(resp.success);
        let ack: handlers::enrollment::EnrollResponse = resp.into_result().unwrap();
        assert!(ack.ok);
        assert_eq!(ack.message, handlers::enrollment::ENROLLED_MESSAGE);

        let resp = call(&svc, "enrollment/enroll", json!({ "student_id": "s1", "course_code": "C1" })).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::AlreadyExists));
    }

    #[tokio::test]
    async fn test_list_methods() {
        let svc = service_impl();
        let resp = call(&svc, "student/courses", json!({ "student_id": "ghost" })).await;
        assert_eq!(error_code(&resp), Some(ErrorCode::NotFound));

        call(&svc, "student/register", json!({ "id": "s1" })).await;
        call(&svc, "course/register", json!({ "code": "C1", "name": "One" })).await;

        let resp = call(&svc, "student/courses", json!({ "student_id": "s1" })).await;
        let list: handlers::student::ListCoursesForStudentResponse = resp.into_result().unwrap();
        assert!(list.courses.is_empty());

        call(&svc, "enrollment/enroll", json!({ "student_id": "s1", "course_code": "C1" })).await;

        let resp = call(&svc, "course/students", json!({ "course_code": "C1" })).await;
        let list: handlers::course::ListStudentsForCourseResponse = resp.into_result().unwrap();
        assert_eq!(list.students.len(), 1);
        assert_eq!(list.students[0].id, "s1");
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let svc = service_impl();
        call(&svc, "student/register", json!({ "id": "s1" })).await;
        call(&svc, "course/register", json!({ "code": "C1" })).await;
        call(&svc, "enrollment/enroll", json!({ "student_id": "s1", "course_code": "C1" })).await;

        let resp = call(&svc, "node/health", serde_json::Value::Null).await;
        let health: handlers::node::GetHealthResponse = resp.into_result().unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.students, 1);
        assert_eq!(health.courses, 1);
        assert_eq!(health.enrollments, 1);
    }

    #[test]
    fn test_rpc_error_display() {
        let err = RpcError::from(RegistryError::AlreadyExists("dup".to_string()));
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(err.to_string(), "ALREADY_EXISTS: dup");
    }

    #[test]
    fn test_envelope_params_default_to_null() {
        let req: JsonRpcRequest = serde_json::from_str(r#"{"method":"node/health"}"#).unwrap();
        assert!(req.params.is_null());
    }
}
