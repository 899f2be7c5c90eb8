// crates/registrar-rpc/src/middleware.rs
//
// Middleware for the RPC server: logging interceptor and request ids.

use tonic::{Request, Status};
use uuid::Uuid;

/// Per-request identifier stamped by the interceptor.
///
/// Travels in the request extensions so the dispatcher can tag its
/// tracing span with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a new time-ordered request id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logging interceptor for tonic gRPC requests.
///
/// Logs the metadata of each incoming request using the `tracing` crate and
/// attaches a fresh `RequestId` unless the request already carries one.
pub fn logging_interceptor(mut req: Request<()>) -> Result<Request<()>, Status> {
    let request_id = match req.extensions().get::<RequestId>() {
        Some(id) => *id,
        None => {
            let id = RequestId::new();
            req.extensions_mut().insert(id);
            id
        }
    };

    tracing::info!(
        request_id = %request_id,
        "Incoming RPC request: {:?}",
        req.metadata()
    );
    Ok(req)
}
