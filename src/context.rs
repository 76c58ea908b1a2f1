//! Session context
//!
//! One explicit context value per session, threaded into every command's
//! construction: the node client, the key-custody client, the chain id
//! and the profile's key aliases. Never reached through global state;
//! torn down by dropping it at session end.

use crate::config::GlobalConfig;
use crate::error::WalletError;
use crate::rpc::{BeekeeperClient, HttpTransport, NodeClient, Transport};
use crate::chain::transaction::ChainId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Everything a command needs for one wallet session
pub struct SessionContext<N: Transport = HttpTransport, B: Transport = HttpTransport> {
    pub node: NodeClient<N>,
    pub beekeeper: BeekeeperClient<B>,
    pub chain_id: ChainId,
    /// Daemon-side wallet holding this profile's keys
    pub wallet: String,
    /// Alias -> public key for this profile
    pub key_aliases: BTreeMap<String, String>,
    active: AtomicBool,
}

impl SessionContext<HttpTransport, HttpTransport> {
    /// Open a session from the global configuration
    pub fn open(config: &GlobalConfig) -> Result<Self, WalletError> {
        let node = NodeClient::connect(
            &config.node.url,
            Duration::from_secs(config.node.timeout_secs),
        )?;
        let beekeeper = BeekeeperClient::connect(
            &config.beekeeper.url,
            Duration::from_secs(config.beekeeper.timeout_secs),
        )?;
        let chain_id = ChainId::from_hex(&config.node.chain_id)?;

        Ok(Self::new(
            node,
            beekeeper,
            chain_id,
            &config.beekeeper.wallet,
            config.profile.key_aliases.clone(),
        ))
    }
}

impl<N: Transport, B: Transport> SessionContext<N, B> {
    pub fn new(
        node: NodeClient<N>,
        beekeeper: BeekeeperClient<B>,
        chain_id: ChainId,
        wallet: &str,
        key_aliases: BTreeMap<String, String>,
    ) -> Self {
        Self {
            node,
            beekeeper,
            chain_id,
            wallet: wallet.to_string(),
            key_aliases,
            active: AtomicBool::new(false),
        }
    }

    /// Signing requires an activated session
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        log::info!("Session activated for wallet '{}'", self.wallet);
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Resolve a profile key alias to its public key
    pub fn resolve_alias(&self, alias: &str) -> Result<String, WalletError> {
        self.key_aliases
            .get(alias)
            .cloned()
            .ok_or_else(|| WalletError::KeyNotFound(format!("No key aliased '{}'", alias)))
    }
}
