//! JSON-RPC 2.0 transport
//!
//! The `Transport` trait is the seam between clients and the wire;
//! `HttpTransport` is the production implementation, tests substitute
//! scripted stubs. A transport failure maps to `NetworkError`, a
//! JSON-RPC error object to `NodeReportedError`; no other failure kind
//! originates here.

use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// One logical connection capable of carrying JSON-RPC calls
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send one request and return the raw `result` value
    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// HTTP POST transport with a per-request timeout
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: &str) -> Result<Self, WalletError> {
        Self::with_timeout(url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        log::debug!("JSON-RPC request: {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::Network(format!("Request to {} failed: {}", self.url, e)))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Network(format!("Failed to read response body: {}", e)))?;

        if let Some(error) = body.error {
            return Err(WalletError::NodeReported {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or_else(|| WalletError::NodeReported {
            code: -1,
            message: "Response carried neither result nor error".to_string(),
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").field("url", &self.url).finish()
    }
}
