//! Configuration types for the Hive wallet
//!
//! Manages global configuration: node endpoint and chain id, key-custody
//! daemon endpoint, and the active profile's key aliases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Global wallet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub node: NodeConfig,
    pub beekeeper: BeekeeperConfig,
    pub profile: ProfileConfig,
}

/// Blockchain node connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    pub url: String,
    /// Hex-encoded 32-byte chain id mixed into every signing digest
    pub chain_id: String,
    pub timeout_secs: u64,
}

/// Key-custody daemon connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeekeeperConfig {
    pub url: String,
    /// Daemon-side wallet holding this profile's keys
    pub wallet: String,
    pub timeout_secs: u64,
}

/// Active profile: a name and its key aliases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    /// Alias -> public key, e.g. "owner" -> "STM5...".
    /// Sign resolves aliases here and verifies the key against the
    /// key-custody daemon.
    #[serde(default)]
    pub key_aliases: BTreeMap<String, String>,
}

/// Target chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

pub const MAINNET_CHAIN_ID: &str =
    "beeab0de00000000000000000000000000000000000000000000000000000000";
pub const TESTNET_CHAIN_ID: &str =
    "18dcf0a285365fc58b71f18b3d3fec954aa0c141c44e4e5cb4cf777b9eab274e";

impl GlobalConfig {
    /// Create default configuration for mainnet
    pub fn default_mainnet() -> Self {
        Self {
            node: NodeConfig {
                url: "https://api.hive.blog".to_string(),
                chain_id: MAINNET_CHAIN_ID.to_string(),
                timeout_secs: 30,
            },
            beekeeper: BeekeeperConfig {
                url: "http://127.0.0.1:9090".to_string(),
                wallet: "default".to_string(),
                timeout_secs: 10,
            },
            profile: ProfileConfig {
                name: "default".to_string(),
                key_aliases: BTreeMap::new(),
            },
        }
    }

    /// Create default configuration for the public testnet
    pub fn default_testnet() -> Self {
        Self {
            node: NodeConfig {
                url: "https://testnet.openhive.network".to_string(),
                chain_id: TESTNET_CHAIN_ID.to_string(),
                timeout_secs: 30,
            },
            ..Self::default_mainnet()
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::default_mainnet()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Config directory not found")]
    DirectoryNotFound,
}

/// Configuration overrides from CLI arguments or environment variables
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub network: Option<NetworkType>,
    pub node_url: Option<String>,
    pub chain_id: Option<String>,
    pub beekeeper_url: Option<String>,
    pub beekeeper_wallet: Option<String>,
    pub profile: Option<String>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create overrides from environment variables
    pub fn from_env() -> Self {
        Self {
            network: std::env::var("HIVE_NETWORK")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "mainnet" => Some(NetworkType::Mainnet),
                    "testnet" => Some(NetworkType::Testnet),
                    _ => None,
                }),
            node_url: std::env::var("HIVE_NODE_URL").ok(),
            chain_id: std::env::var("HIVE_CHAIN_ID").ok(),
            beekeeper_url: std::env::var("BEEKEEPER_URL").ok(),
            beekeeper_wallet: std::env::var("BEEKEEPER_WALLET").ok(),
            profile: std::env::var("HIVE_PROFILE").ok(),
        }
    }

    /// Merge with another set of overrides (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.network.is_some() {
            self.network = other.network;
        }
        if other.node_url.is_some() {
            self.node_url = other.node_url;
        }
        if other.chain_id.is_some() {
            self.chain_id = other.chain_id;
        }
        if other.beekeeper_url.is_some() {
            self.beekeeper_url = other.beekeeper_url;
        }
        if other.beekeeper_wallet.is_some() {
            self.beekeeper_wallet = other.beekeeper_wallet;
        }
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        self
    }
}

/// Get the default configuration directory path
///
/// Returns: `~/.hive-wallet/`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".hive-wallet"))
        .ok_or(ConfigError::DirectoryNotFound)
}

/// Get the default configuration file path
///
/// Returns: `~/.hive-wallet/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(default_config_dir()?.join("config.json"))
}

/// Load configuration from file with overrides
///
/// # Priority (highest to lowest):
/// 1. CLI overrides (passed as argument)
/// 2. Environment variables
/// 3. Config file
/// 4. Network defaults
pub fn load_config(
    config_path: Option<&Path>,
    cli_overrides: ConfigOverrides,
) -> Result<GlobalConfig, ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)?
    } else {
        match cli_overrides.network {
            Some(NetworkType::Testnet) => GlobalConfig::default_testnet(),
            _ => GlobalConfig::default_mainnet(),
        }
    };

    let env_overrides = ConfigOverrides::from_env();
    apply_overrides(&mut config, env_overrides);

    apply_overrides(&mut config, cli_overrides);

    Ok(config)
}

/// Save configuration to file, creating parent directories as needed
pub fn save_config(config: &GlobalConfig, config_path: Option<&Path>) -> Result<(), ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;

    Ok(())
}

/// Apply configuration overrides (internal helper)
fn apply_overrides(config: &mut GlobalConfig, overrides: ConfigOverrides) {
    // A network switch swaps node URL and chain id to the network's
    // defaults unless those were explicitly overridden too
    if let Some(network) = overrides.network {
        let defaults = match network {
            NetworkType::Mainnet => GlobalConfig::default_mainnet(),
            NetworkType::Testnet => GlobalConfig::default_testnet(),
        };
        if overrides.node_url.is_none() {
            config.node.url = defaults.node.url;
        }
        if overrides.chain_id.is_none() {
            config.node.chain_id = defaults.node.chain_id;
        }
    }

    if let Some(url) = overrides.node_url {
        config.node.url = url;
    }
    if let Some(chain_id) = overrides.chain_id {
        config.node.chain_id = chain_id;
    }
    if let Some(url) = overrides.beekeeper_url {
        config.beekeeper.url = url;
    }
    if let Some(wallet) = overrides.beekeeper_wallet {
        config.beekeeper.wallet = wallet;
    }
    if let Some(profile) = overrides.profile {
        config.profile.name = profile;
    }
}
