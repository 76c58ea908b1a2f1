//! Key-custody daemon client
//!
//! Talks to the local beekeeper daemon: wallet and key listing, public
//! key lookup, digest signing, and lock/session state. Independent from
//! the node client; each owns its own transport so an outage of one
//! never blocks the other. Daemon errors about locked wallets and
//! unknown keys are mapped to their dedicated failure kinds so the
//! retry wrapper can tell fixable preconditions apart.

use crate::error::WalletError;
use crate::rpc::api::{
    self, CreateKeyResponse, CreateWalletResponse, DaemonInfo, EmptyParams, SignDigestParams,
    WalletParams, WalletPasswordParams, WalletStatus,
};
use crate::rpc::endpoint::Endpoint;
use crate::rpc::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Client for the beekeeper JSON-RPC interface
pub struct BeekeeperClient<T: Transport = HttpTransport> {
    transport: T,
    url: String,
}

impl BeekeeperClient<HttpTransport> {
    /// Connect to a local beekeeper endpoint over HTTP
    pub fn connect(url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let transport = HttpTransport::with_timeout(url, timeout)?;
        Ok(Self::new(transport, url))
    }
}

impl<T: Transport> BeekeeperClient<T> {
    pub fn new(transport: T, url: &str) -> Self {
        Self {
            transport,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<P, R>(&self, endpoint: &Endpoint<P, R>, params: &P) -> Result<R, WalletError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let method = endpoint.wire_method();
        let params_value = serde_json::to_value(params)
            .map_err(|e| WalletError::Validation(format!("Failed to encode params: {}", e)))?;

        let raw = self
            .transport
            .call(&method, params_value)
            .await
            .map_err(map_custody_error)?;

        serde_json::from_value(raw).map_err(|e| WalletError::NodeReported {
            code: -1,
            message: format!("Unexpected response shape for {}: {}", method, e),
        })
    }

    /// Create a new wallet in the daemon; returns its generated password
    /// when one was not supplied
    pub async fn create(&self, wallet: &str, password: &str) -> Result<String, WalletError> {
        let response: CreateWalletResponse = self
            .call(
                &api::beekeeper_api::create(),
                &WalletPasswordParams {
                    wallet_name: wallet.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        Ok(response.password)
    }

    /// Generate a new key inside a wallet; returns the public key
    pub async fn create_key(&self, wallet: &str) -> Result<String, WalletError> {
        let response: CreateKeyResponse = self
            .call(
                &api::beekeeper_api::create_key(),
                &WalletParams {
                    wallet_name: wallet.to_string(),
                },
            )
            .await?;
        Ok(response.public_key)
    }

    /// Public keys held by one wallet
    pub async fn list_keys(&self, wallet: &str) -> Result<Vec<String>, WalletError> {
        let response = self
            .call(
                &api::beekeeper_api::list_keys(),
                &WalletParams {
                    wallet_name: wallet.to_string(),
                },
            )
            .await?;
        Ok(response.keys.into_iter().map(|k| k.public_key).collect())
    }

    /// All wallets known to the daemon with their lock state
    pub async fn list_wallets(&self) -> Result<Vec<WalletStatus>, WalletError> {
        let response = self
            .call(&api::beekeeper_api::list_wallets(), &EmptyParams::default())
            .await?;
        Ok(response.wallets)
    }

    /// Public keys across all unlocked wallets
    pub async fn get_public_keys(&self) -> Result<Vec<String>, WalletError> {
        let response = self
            .call(
                &api::beekeeper_api::get_public_keys(),
                &EmptyParams::default(),
            )
            .await?;
        Ok(response.keys.into_iter().map(|k| k.public_key).collect())
    }

    /// Sign a 32-byte digest with the key behind `public_key`
    ///
    /// Safe to invoke twice with identical inputs: the daemon produces
    /// the same signature for the same digest and key.
    pub async fn sign_digest(
        &self,
        digest: &[u8; 32],
        public_key: &str,
    ) -> Result<String, WalletError> {
        let response = self
            .call(
                &api::beekeeper_api::sign_digest(),
                &SignDigestParams {
                    sig_digest: hex::encode(digest),
                    public_key: public_key.to_string(),
                },
            )
            .await?;
        Ok(response.signature)
    }

    /// Daemon time and session timeout deadline
    pub async fn get_info(&self) -> Result<DaemonInfo, WalletError> {
        self.call(&api::beekeeper_api::get_info(), &EmptyParams::default())
            .await
    }

    /// Unlock a wallet; the fix-up step for `WalletLocked` failures
    pub async fn unlock(&self, wallet: &str, password: &str) -> Result<(), WalletError> {
        self.call(
            &api::beekeeper_api::unlock(),
            &WalletPasswordParams {
                wallet_name: wallet.to_string(),
                password: password.to_string(),
            },
        )
        .await?;
        Ok(())
    }

    /// Lock a wallet
    pub async fn lock(&self, wallet: &str) -> Result<(), WalletError> {
        self.call(
            &api::beekeeper_api::lock(),
            &WalletParams {
                wallet_name: wallet.to_string(),
            },
        )
        .await?;
        Ok(())
    }
}

/// Map daemon-reported errors onto the wallet taxonomy
///
/// The daemon reports preconditions through JSON-RPC error messages;
/// locked wallets and unknown keys get their own kinds, everything else
/// passes through unchanged.
fn map_custody_error(error: WalletError) -> WalletError {
    if let WalletError::NodeReported { ref message, .. } = error {
        let lower = message.to_lowercase();
        if lower.contains("locked") {
            return WalletError::WalletLocked(message.clone());
        }
        if lower.contains("key not") || lower.contains("not found") || lower.contains("unknown key")
        {
            return WalletError::KeyNotFound(message.clone());
        }
    }
    error
}

impl<T: Transport> std::fmt::Debug for BeekeeperClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeekeeperClient")
            .field("url", &self.url)
            .finish()
    }
}
