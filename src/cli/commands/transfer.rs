//! Transfer command implementation

use crate::assembler::{self, SessionRecovery};
use crate::chain::asset::{Asset, AssetError};
use crate::chain::operation::{Operation, TransferOperation};
use crate::config::{load_config, ConfigError, ConfigOverrides};
use crate::context::SessionContext;
use crate::error::WalletError;

#[derive(Debug, thiserror::Error)]
pub enum TransferCommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid amount: {0}")]
    Asset(#[from] AssetError),

    #[error("{0}")]
    Wallet(#[from] WalletError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Build, sign and optionally broadcast a transfer
#[allow(clippy::too_many_arguments)]
pub async fn transfer(
    from: &str,
    to: &str,
    amount: &str,
    memo: &str,
    sign_as: &str,
    password: &str,
    broadcast: bool,
    overrides: ConfigOverrides,
) -> Result<(), TransferCommandError> {
    let config = load_config(None, overrides)?;
    let ctx = SessionContext::open(&config)?;

    let operation = Operation::Transfer(TransferOperation {
        from: from.to_string(),
        to: to.to_string(),
        amount: Asset::from_legacy(amount)?,
        memo: memo.to_string(),
    });

    let built = assembler::build(&ctx, vec![operation]).await.into_result()?;
    let recovery = SessionRecovery::new(&ctx, password);

    if broadcast {
        let id = assembler::sign_and_broadcast(&ctx, built, sign_as, &recovery)
            .await
            .into_result()?;
        println!("✓ Transfer broadcast");
        println!("  Transaction id: {}", id);
    } else {
        let signed = assembler::sign(&ctx, built, sign_as, &recovery)
            .await
            .into_result()?;
        println!("✓ Transfer signed (not broadcast)");
        println!("  Transaction id: {}", signed.transaction_id());
        println!("{}", serde_json::to_string_pretty(&signed)?);
    }

    Ok(())
}
