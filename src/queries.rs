//! Read-only chain queries
//!
//! One command per node query, all sharing the `Command` contract so
//! callers get a `CommandResult` regardless of which API group answers.
//! These are safe to run concurrently against the same node client.

use crate::command::{Command, CommandResult};
use crate::context::SessionContext;
use crate::error::WalletError;
use crate::rpc::api::{
    self, Account, AccountHistoryResponse, DynamicGlobalProperties, EmptyParams,
    FindAccountsParams, FindRcAccountsParams, FindTransactionParams, GetAccountHistoryParams,
    GetAccountReputationsParams, RcAccount, TransactionStatusResponse,
};
use crate::rpc::Transport;

/// Fetch one account's state by name
pub struct RetrieveAccount<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    account: String,
}

impl<'a, N: Transport, B: Transport> RetrieveAccount<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, account: &str) -> Self {
        Self {
            ctx,
            account: account.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveAccount<'_, N, B> {
    type Output = Account;

    async fn run(&self) -> CommandResult<Account> {
        let params = FindAccountsParams {
            accounts: vec![self.account.clone()],
        };
        let response = match self
            .ctx
            .node
            .call(&api::database_api::find_accounts(), &params)
            .await
        {
            Ok(response) => response,
            Err(e) => return CommandResult::err(e),
        };

        match response.accounts.into_iter().next() {
            Some(account) => CommandResult::ok(account),
            None => CommandResult::err(WalletError::Validation(format!(
                "Account '{}' does not exist",
                self.account
            ))),
        }
    }
}

/// Fetch the current dynamic global properties (chain head state)
pub struct RetrieveDynamicGlobalProperties<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
}

impl<'a, N: Transport, B: Transport> RetrieveDynamicGlobalProperties<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>) -> Self {
        Self { ctx }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveDynamicGlobalProperties<'_, N, B> {
    type Output = DynamicGlobalProperties;

    async fn run(&self) -> CommandResult<DynamicGlobalProperties> {
        self.ctx
            .node
            .call(
                &api::database_api::get_dynamic_global_properties(),
                &EmptyParams::default(),
            )
            .await
            .into()
    }
}

/// Fetch recent account history entries (most recent first)
pub struct RetrieveAccountHistory<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    account: String,
    limit: u32,
}

impl<'a, N: Transport, B: Transport> RetrieveAccountHistory<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, account: &str, limit: u32) -> Self {
        Self {
            ctx,
            account: account.to_string(),
            limit,
        }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveAccountHistory<'_, N, B> {
    type Output = AccountHistoryResponse;

    async fn run(&self) -> CommandResult<AccountHistoryResponse> {
        let params = GetAccountHistoryParams {
            account: self.account.clone(),
            start: -1,
            limit: self.limit,
        };
        self.ctx
            .node
            .call(&api::account_history_api::get_account_history(), &params)
            .await
            .into()
    }
}

/// Fetch one account's resource-credit state
pub struct RetrieveRcAccount<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    account: String,
}

impl<'a, N: Transport, B: Transport> RetrieveRcAccount<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, account: &str) -> Self {
        Self {
            ctx,
            account: account.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveRcAccount<'_, N, B> {
    type Output = RcAccount;

    async fn run(&self) -> CommandResult<RcAccount> {
        let params = FindRcAccountsParams {
            accounts: vec![self.account.clone()],
        };
        let response = match self
            .ctx
            .node
            .call(&api::rc_api::find_rc_accounts(), &params)
            .await
        {
            Ok(response) => response,
            Err(e) => return CommandResult::err(e),
        };

        match response.rc_accounts.into_iter().next() {
            Some(rc) => CommandResult::ok(rc),
            None => CommandResult::err(WalletError::Validation(format!(
                "No RC state for account '{}'",
                self.account
            ))),
        }
    }
}

/// Fetch one account's reputation
pub struct RetrieveReputation<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    account: String,
}

impl<'a, N: Transport, B: Transport> RetrieveReputation<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, account: &str) -> Self {
        Self {
            ctx,
            account: account.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveReputation<'_, N, B> {
    type Output = i64;

    async fn run(&self) -> CommandResult<i64> {
        let params = GetAccountReputationsParams {
            account_lower_bound: self.account.clone(),
            limit: 1,
        };
        let response = match self
            .ctx
            .node
            .call(&api::reputation_api::get_account_reputations(), &params)
            .await
        {
            Ok(response) => response,
            Err(e) => return CommandResult::err(e),
        };

        match response
            .reputations
            .into_iter()
            .find(|r| r.account == self.account)
        {
            Some(entry) => CommandResult::ok(entry.reputation),
            None => CommandResult::err(WalletError::Validation(format!(
                "No reputation entry for account '{}'",
                self.account
            ))),
        }
    }
}

/// Look up the lifecycle status of a broadcast transaction
pub struct RetrieveTransactionStatus<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    transaction_id: String,
}

impl<'a, N: Transport, B: Transport> RetrieveTransactionStatus<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, transaction_id: &str) -> Self {
        Self {
            ctx,
            transaction_id: transaction_id.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Command for RetrieveTransactionStatus<'_, N, B> {
    type Output = TransactionStatusResponse;

    async fn run(&self) -> CommandResult<TransactionStatusResponse> {
        let params = FindTransactionParams {
            transaction_id: self.transaction_id.clone(),
        };
        self.ctx
            .node
            .call(&api::transaction_status_api::find_transaction(), &params)
            .await
            .into()
    }
}
