//! Key and wallet command implementations (key-custody daemon)

use crate::config::{load_config, ConfigError, ConfigOverrides};
use crate::context::SessionContext;
use crate::error::WalletError;

#[derive(Debug, thiserror::Error)]
pub enum KeysCommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Wallet(#[from] WalletError),
}

fn open_session(overrides: ConfigOverrides) -> Result<SessionContext, KeysCommandError> {
    let config = load_config(None, overrides)?;
    Ok(SessionContext::open(&config)?)
}

/// List public keys held by the configured wallet
pub async fn list_keys(overrides: ConfigOverrides) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    let keys = ctx.beekeeper.list_keys(&ctx.wallet).await?;

    if keys.is_empty() {
        println!("Wallet '{}' holds no keys", ctx.wallet);
    } else {
        println!("Keys in wallet '{}':", ctx.wallet);
        for key in keys {
            println!("  {}", key);
        }
    }

    Ok(())
}

/// Generate a new key inside the configured wallet
pub async fn create_key(overrides: ConfigOverrides) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    let public_key = ctx.beekeeper.create_key(&ctx.wallet).await?;

    println!("✓ Key created in wallet '{}'", ctx.wallet);
    println!("  Public key: {}", public_key);

    Ok(())
}

/// List wallets known to the daemon
pub async fn list_wallets(overrides: ConfigOverrides) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    let wallets = ctx.beekeeper.list_wallets().await?;

    if wallets.is_empty() {
        println!("The daemon knows no wallets");
    } else {
        for wallet in wallets {
            let state = if wallet.unlocked { "unlocked" } else { "locked" };
            println!("  {} ({})", wallet.name, state);
        }
    }

    Ok(())
}

/// Create a new wallet in the daemon
pub async fn create_wallet(
    password: &str,
    overrides: ConfigOverrides,
) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    ctx.beekeeper.create(&ctx.wallet, password).await?;

    println!("✓ Wallet '{}' created", ctx.wallet);

    Ok(())
}

/// Unlock the configured wallet
pub async fn unlock_wallet(
    password: &str,
    overrides: ConfigOverrides,
) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    ctx.beekeeper.unlock(&ctx.wallet, password).await?;

    println!("✓ Wallet '{}' unlocked", ctx.wallet);

    Ok(())
}

/// Show daemon time and session timeout
pub async fn daemon_info(overrides: ConfigOverrides) -> Result<(), KeysCommandError> {
    let ctx = open_session(overrides)?;
    let info = ctx.beekeeper.get_info().await?;

    println!("Daemon time:  {}", info.now);
    println!("Session ends: {}", info.timeout_time);

    Ok(())
}
