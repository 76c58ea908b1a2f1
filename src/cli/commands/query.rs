//! Read-only query command implementations

use crate::command::Command;
use crate::config::{load_config, ConfigError, ConfigOverrides};
use crate::context::SessionContext;
use crate::error::WalletError;
use crate::queries::{
    RetrieveAccount, RetrieveAccountHistory, RetrieveDynamicGlobalProperties, RetrieveRcAccount,
    RetrieveReputation, RetrieveTransactionStatus,
};

#[derive(Debug, thiserror::Error)]
pub enum QueryCommandError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Wallet(#[from] WalletError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn open_session(overrides: ConfigOverrides) -> Result<SessionContext, QueryCommandError> {
    let config = load_config(None, overrides)?;
    Ok(SessionContext::open(&config)?)
}

/// Show an account's balances
pub async fn balance(account: &str, overrides: ConfigOverrides) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let account = RetrieveAccount::new(&ctx, account).run().await.into_result()?;

    println!("Account: {}", account.name);
    println!("  Balance:        {}", account.balance);
    println!("  HBD balance:    {}", account.hbd_balance);
    println!("  Vesting shares: {}", account.vesting_shares);
    if let Some(savings) = &account.savings_balance {
        println!("  Savings:        {}", savings);
    }
    if let Some(savings_hbd) = &account.savings_hbd_balance {
        println!("  Savings HBD:    {}", savings_hbd);
    }

    Ok(())
}

/// Show the current chain head state
pub async fn head(overrides: ConfigOverrides) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let props = RetrieveDynamicGlobalProperties::new(&ctx)
        .run()
        .await
        .into_result()?;

    println!("Head block:         {}", props.head_block_number);
    println!("Head block id:      {}", props.head_block_id);
    println!("Head time:          {}", props.time.format("%Y-%m-%dT%H:%M:%S"));
    println!("Last irreversible:  {}", props.last_irreversible_block_num);

    Ok(())
}

/// Show recent account history entries
pub async fn history(
    account: &str,
    limit: u32,
    overrides: ConfigOverrides,
) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let response = RetrieveAccountHistory::new(&ctx, account, limit)
        .run()
        .await
        .into_result()?;

    println!("History for {} ({} entries):", account, response.history.len());
    for (index, entry) in &response.history {
        println!("  [{}] {}", index, serde_json::to_string(entry)?);
    }

    Ok(())
}

/// Show an account's resource credits
pub async fn rc(account: &str, overrides: ConfigOverrides) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let rc = RetrieveRcAccount::new(&ctx, account).run().await.into_result()?;

    println!("RC for {}:", rc.account);
    println!("  Current mana: {}", rc.rc_manabar.current_mana);
    println!("  Max RC:       {}", rc.max_rc);

    Ok(())
}

/// Show an account's reputation
pub async fn reputation(account: &str, overrides: ConfigOverrides) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let reputation = RetrieveReputation::new(&ctx, account)
        .run()
        .await
        .into_result()?;

    println!("Reputation for {}: {}", account, reputation);

    Ok(())
}

/// Look up the status of a broadcast transaction
pub async fn tx_status(id: &str, overrides: ConfigOverrides) -> Result<(), QueryCommandError> {
    let ctx = open_session(overrides)?;
    let status = RetrieveTransactionStatus::new(&ctx, id)
        .run()
        .await
        .into_result()?;

    println!("Transaction {}:", id);
    println!("  Status: {}", status.status);
    if let Some(block) = status.block_num {
        println!("  Block:  {}", block);
    }

    Ok(())
}
