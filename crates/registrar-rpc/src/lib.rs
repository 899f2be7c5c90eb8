// crates/registrar-rpc/src/lib.rs
//
// registrar-rpc: gRPC/JSON-RPC server and handlers for the Registrar service.
//
// Provides a tonic-based RPC server whose handlers adapt JSON payloads to
// the EnrollmentStore trait. Uses JSON-based RPC over tonic rather than
// protobuf codegen.

pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export the main server and envelope types for ergonomic access.
pub use server::{
    JsonRpcRequest, JsonRpcResponse, RegistrarJsonRpcServer, RegistrarRpcServer, RpcConfig,
    RpcError, SERVICE_NAME,
};
