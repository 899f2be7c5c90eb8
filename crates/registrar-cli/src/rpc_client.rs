// crates/registrar-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the registrar-daemon endpoint.

use serde::de::DeserializeOwned;
use serde::Serialize;

use registrar_rpc::{JsonRpcRequest, JsonRpcResponse, RpcError, SERVICE_NAME};

/// Errors surfaced by RPC calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The daemon could not be reached or returned an unreadable body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The params could not be encoded.
    #[error("failed to encode params: {0}")]
    Encode(#[from] serde_json::Error),

    /// The daemon answered with an error code.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Build the call URL for a daemon endpoint (e.g., "http://localhost:50051").
pub fn call_url(endpoint: &str) -> String {
    format!("{}/{}/Call", endpoint.trim_end_matches('/'), SERVICE_NAME)
}

/// JSON-RPC client bound to one daemon endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            url: call_url(endpoint),
            http: reqwest::Client::new(),
        }
    }

    /// Send a JSON-RPC call and return the raw response envelope.
    pub async fn call_raw(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<JsonRpcResponse, ClientError> {
        let request = JsonRpcRequest {
            method: method.to_string(),
            params,
        };

        let resp = self.http.post(&self.url).json(&request).send().await?;
        let rpc_response: JsonRpcResponse = resp.json().await?;
        Ok(rpc_response)
    }

    /// Send a JSON-RPC call and decode a successful result into `R`.
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, ClientError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        let response = self.call_raw(method, params).await?;
        Ok(response.into_result()?)
    }
}
