//! Config command implementations

use crate::config::{
    default_config_path, load_config, save_config, ConfigError, ConfigOverrides, GlobalConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Write a fresh config file with the chosen network's defaults
pub fn init(network: &str) -> Result<(), ConfigCommandError> {
    let config = match network.to_lowercase().as_str() {
        "mainnet" => GlobalConfig::default_mainnet(),
        "testnet" => GlobalConfig::default_testnet(),
        other => return Err(ConfigError::InvalidNetwork(other.to_string()).into()),
    };

    save_config(&config, None)?;

    let path = default_config_path()?;
    println!("✓ Configuration written to {}", path.display());
    println!();
    println!("  Node:      {}", config.node.url);
    println!("  Beekeeper: {}", config.beekeeper.url);
    println!("  Profile:   {}", config.profile.name);

    Ok(())
}

/// Print the effective configuration after overrides
pub fn show(overrides: ConfigOverrides) -> Result<(), ConfigCommandError> {
    let config = load_config(None, overrides)?;

    println!("Node URL:         {}", config.node.url);
    println!("Chain id:         {}", config.node.chain_id);
    println!("Node timeout:     {}s", config.node.timeout_secs);
    println!("Beekeeper URL:    {}", config.beekeeper.url);
    println!("Beekeeper wallet: {}", config.beekeeper.wallet);
    println!("Profile:          {}", config.profile.name);
    if config.profile.key_aliases.is_empty() {
        println!("Key aliases:      (none)");
    } else {
        println!("Key aliases:");
        for (alias, key) in &config.profile.key_aliases {
            println!("  {} -> {}", alias, key);
        }
    }

    Ok(())
}
