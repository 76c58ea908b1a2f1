//! Blockchain node client
//!
//! Owns one logical connection to one node endpoint and is the sole
//! transport for every resolved RPC request. Performs no retries;
//! retry policy lives with the command layer. Keeps a read-only cached
//! head state so commands can skip a redundant round-trip when a
//! freshness requirement is already met.

use crate::error::WalletError;
use crate::rpc::api::{self, DynamicGlobalProperties, EmptyParams};
use crate::rpc::endpoint::Endpoint;
use crate::rpc::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CachedHead {
    properties: DynamicGlobalProperties,
    fetched_at: Instant,
}

/// Client for the node's JSON-RPC interface
pub struct NodeClient<T: Transport = HttpTransport> {
    transport: T,
    url: String,
    head_cache: Mutex<Option<CachedHead>>,
}

impl NodeClient<HttpTransport> {
    /// Connect to a node endpoint over HTTP
    pub fn connect(url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let transport = HttpTransport::with_timeout(url, timeout)?;
        Ok(Self::new(transport, url))
    }
}

impl<T: Transport> NodeClient<T> {
    pub fn new(transport: T, url: &str) -> Self {
        Self {
            transport,
            url: url.to_string(),
            head_cache: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve a declared call and decode its typed response
    ///
    /// Never panics across this boundary: transport failures arrive as
    /// `Network`, JSON-RPC error objects as `NodeReported`, and a
    /// response that does not match the declared result type is
    /// reported as `NodeReported` as well.
    pub async fn call<P, R>(&self, endpoint: &Endpoint<P, R>, params: &P) -> Result<R, WalletError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let method = endpoint.wire_method();
        let params_value = serde_json::to_value(params)
            .map_err(|e| WalletError::Validation(format!("Failed to encode params: {}", e)))?;

        let raw = self.transport.call(&method, params_value).await?;

        serde_json::from_value(raw).map_err(|e| WalletError::NodeReported {
            code: -1,
            message: format!("Unexpected response shape for {}: {}", method, e),
        })
    }

    /// Current head state, served from cache when fetched within
    /// `max_age`, otherwise refreshed from the node
    pub async fn head_state(
        &self,
        max_age: Duration,
    ) -> Result<DynamicGlobalProperties, WalletError> {
        let mut cache = self.head_cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() <= max_age {
                log::debug!(
                    "Serving head state from cache (block {})",
                    cached.properties.head_block_number
                );
                return Ok(cached.properties.clone());
            }
        }

        let properties = self
            .call(
                &api::database_api::get_dynamic_global_properties(),
                &EmptyParams::default(),
            )
            .await?;

        *cache = Some(CachedHead {
            properties: properties.clone(),
            fetched_at: Instant::now(),
        });

        Ok(properties)
    }

    /// Check whether the node endpoint is reachable
    pub async fn is_available(&self) -> bool {
        self.head_state(Duration::ZERO).await.is_ok()
    }
}

impl<T: Transport> std::fmt::Debug for NodeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient").field("url", &self.url).finish()
    }
}
