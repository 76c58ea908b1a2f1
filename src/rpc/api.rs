//! Declared RPC calls and their wire types
//!
//! One constructor per remote call, grouped by API namespace. This table
//! is the single source of truth binding endpoint names to request and
//! response types.

use crate::chain::asset::Asset;
use crate::chain::transaction::{chain_timestamp, Transaction};
use crate::rpc::endpoint::Endpoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameter payload for calls that take none
#[derive(Debug, Clone, Serialize, Default)]
pub struct EmptyParams {}

// ---------------------------------------------------------------------
// database_api
// ---------------------------------------------------------------------

/// Chain head state used for TAPOS and expiration computation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DynamicGlobalProperties {
    pub head_block_number: u32,
    pub head_block_id: String,
    #[serde(with = "chain_timestamp")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub last_irreversible_block_num: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindAccountsParams {
    pub accounts: Vec<String>,
}

/// Account state; asset fields decode either wire notation
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub balance: Asset,
    pub hbd_balance: Asset,
    pub vesting_shares: Asset,
    #[serde(default)]
    pub savings_balance: Option<Asset>,
    #[serde(default)]
    pub savings_hbd_balance: Option<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindAccountsResponse {
    pub accounts: Vec<Account>,
}

pub mod database_api {
    use super::*;

    pub fn get_dynamic_global_properties() -> Endpoint<EmptyParams, DynamicGlobalProperties> {
        Endpoint::new("DatabaseApi", "getDynamicGlobalProperties")
    }

    pub fn find_accounts() -> Endpoint<FindAccountsParams, FindAccountsResponse> {
        Endpoint::new("DatabaseApi", "findAccounts")
    }
}

// ---------------------------------------------------------------------
// network_broadcast_api
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BroadcastTransactionParams {
    pub trx: Transaction,
}

/// The node returns an empty object on acceptance
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastTransactionResponse {}

pub mod network_broadcast_api {
    use super::*;

    pub fn broadcast_transaction() -> Endpoint<BroadcastTransactionParams, BroadcastTransactionResponse>
    {
        Endpoint::new("NetworkBroadcastApi", "broadcastTransaction")
    }
}

// ---------------------------------------------------------------------
// account_history_api
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GetAccountHistoryParams {
    pub account: String,
    /// -1 starts from the most recent entry
    pub start: i64,
    pub limit: u32,
}

/// History entries stay opaque; their per-kind schemas belong to the
/// external schema collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct AccountHistoryResponse {
    pub history: Vec<(u64, serde_json::Value)>,
}

pub mod account_history_api {
    use super::*;

    pub fn get_account_history() -> Endpoint<GetAccountHistoryParams, AccountHistoryResponse> {
        Endpoint::new("AccountHistoryApi", "getAccountHistory")
    }
}

// ---------------------------------------------------------------------
// rc_api
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FindRcAccountsParams {
    pub accounts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RcManabar {
    /// Big integers arrive as strings on the wire
    pub current_mana: String,
    pub last_update_time: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RcAccount {
    pub account: String,
    pub rc_manabar: RcManabar,
    pub max_rc: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindRcAccountsResponse {
    pub rc_accounts: Vec<RcAccount>,
}

pub mod rc_api {
    use super::*;

    pub fn find_rc_accounts() -> Endpoint<FindRcAccountsParams, FindRcAccountsResponse> {
        Endpoint::new("RcApi", "findRcAccounts")
    }
}

// ---------------------------------------------------------------------
// reputation_api
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GetAccountReputationsParams {
    pub account_lower_bound: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountReputation {
    pub account: String,
    pub reputation: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountReputationsResponse {
    pub reputations: Vec<AccountReputation>,
}

pub mod reputation_api {
    use super::*;

    pub fn get_account_reputations() -> Endpoint<GetAccountReputationsParams, AccountReputationsResponse>
    {
        Endpoint::new("ReputationApi", "getAccountReputations")
    }
}

// ---------------------------------------------------------------------
// transaction_status_api
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FindTransactionParams {
    pub transaction_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionStatusResponse {
    pub status: String,
    #[serde(default)]
    pub block_num: Option<u32>,
}

pub mod transaction_status_api {
    use super::*;

    pub fn find_transaction() -> Endpoint<FindTransactionParams, TransactionStatusResponse> {
        Endpoint::new("TransactionStatusApi", "findTransaction")
    }
}

// ---------------------------------------------------------------------
// beekeeper_api (key-custody daemon)
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct WalletParams {
    pub wallet_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletPasswordParams {
    pub wallet_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWalletResponse {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateKeyResponse {
    pub public_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicKeyEntry {
    pub public_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListKeysResponse {
    pub keys: Vec<PublicKeyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletStatus {
    pub name: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListWalletsResponse {
    pub wallets: Vec<WalletStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPublicKeysResponse {
    pub keys: Vec<PublicKeyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignDigestParams {
    pub sig_digest: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignDigestResponse {
    pub signature: String,
}

/// Daemon clock and session-timeout deadline
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonInfo {
    pub now: String,
    pub timeout_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmptyResponse {}

pub mod beekeeper_api {
    use super::*;

    pub fn create() -> Endpoint<WalletPasswordParams, CreateWalletResponse> {
        Endpoint::new("BeekeeperApi", "create")
    }

    pub fn create_key() -> Endpoint<WalletParams, CreateKeyResponse> {
        Endpoint::new("BeekeeperApi", "createKey")
    }

    pub fn list_keys() -> Endpoint<WalletParams, ListKeysResponse> {
        Endpoint::new("BeekeeperApi", "listKeys")
    }

    pub fn list_wallets() -> Endpoint<EmptyParams, ListWalletsResponse> {
        Endpoint::new("BeekeeperApi", "listWallets")
    }

    pub fn get_public_keys() -> Endpoint<EmptyParams, GetPublicKeysResponse> {
        Endpoint::new("BeekeeperApi", "getPublicKeys")
    }

    pub fn sign_digest() -> Endpoint<SignDigestParams, SignDigestResponse> {
        Endpoint::new("BeekeeperApi", "signDigest")
    }

    pub fn get_info() -> Endpoint<EmptyParams, DaemonInfo> {
        Endpoint::new("BeekeeperApi", "getInfo")
    }

    pub fn unlock() -> Endpoint<WalletPasswordParams, EmptyResponse> {
        Endpoint::new("BeekeeperApi", "unlock")
    }

    pub fn lock() -> Endpoint<WalletParams, EmptyResponse> {
        Endpoint::new("BeekeeperApi", "lock")
    }
}
