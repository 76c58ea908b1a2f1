//! Transaction assembler
//!
//! The build -> sign -> broadcast pipeline. Build populates TAPOS and
//! the expiration from a fresh chain head; sign asks the key-custody
//! daemon for a signature over the canonical digest; broadcast hands
//! the signed transaction to the node exactly once. Sign may run under
//! the recovery wrapper; broadcast never does, because a duplicate
//! broadcast is terminal.

use crate::chain::operation::Operation;
use crate::chain::transaction::{Transaction, TransactionId};
use crate::command::{run_with_recovery, Command, CommandResult, Recovery};
use crate::context::SessionContext;
use crate::error::WalletError;
use crate::rpc::api::{self, BroadcastTransactionParams};
use crate::rpc::Transport;
use std::time::Duration;

/// How long a built transaction stays valid after the head it saw
pub fn expiration_window() -> chrono::Duration {
    chrono::Duration::minutes(30)
}

/// Head-state staleness tolerated when building TAPOS fields
pub const HEAD_MAX_AGE: Duration = Duration::from_secs(3);

/// Build a transaction from an ordered list of operations
///
/// Validates every operation locally, queries the chain head, and
/// returns a TAPOS-populated transaction preserving operation order.
pub struct BuildTransaction<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    operations: Vec<Operation>,
}

impl<'a, N: Transport, B: Transport> BuildTransaction<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, operations: Vec<Operation>) -> Self {
        Self { ctx, operations }
    }
}

impl<N: Transport, B: Transport> Command for BuildTransaction<'_, N, B> {
    type Output = Transaction;

    async fn run(&self) -> CommandResult<Transaction> {
        if self.operations.is_empty() {
            return CommandResult::err(WalletError::Validation(
                "A transaction needs at least one operation".to_string(),
            ));
        }
        for operation in &self.operations {
            if let Err(e) = operation.validate() {
                return CommandResult::err(WalletError::Validation(format!(
                    "Operation '{}' rejected: {}",
                    operation.name(),
                    e
                )));
            }
        }

        let head = match self.ctx.node.head_state(HEAD_MAX_AGE).await {
            Ok(head) => head,
            Err(e) => return CommandResult::err(e),
        };

        let mut transaction = Transaction::with_operations(self.operations.clone());
        if let Err(e) = transaction.apply_tapos(
            head.head_block_number,
            &head.head_block_id,
            head.time + expiration_window(),
        ) {
            return CommandResult::err(e);
        }

        log::debug!(
            "Built transaction against head block {} ({} operation(s))",
            head.head_block_number,
            transaction.operations.len()
        );
        CommandResult::ok(transaction)
    }
}

/// Sign a built transaction with the key behind a profile alias
///
/// Idempotent: signing the same digest with the same key twice yields
/// the same signature and the transaction skips duplicate blobs, so
/// this command is safe under the recovery wrapper.
pub struct SignTransaction<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    transaction: Transaction,
    key_alias: String,
}

impl<'a, N: Transport, B: Transport> SignTransaction<'a, N, B> {
    pub fn new(
        ctx: &'a SessionContext<N, B>,
        transaction: Transaction,
        key_alias: &str,
    ) -> Self {
        Self {
            ctx,
            transaction,
            key_alias: key_alias.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Command for SignTransaction<'_, N, B> {
    type Output = Transaction;

    async fn run(&self) -> CommandResult<Transaction> {
        if !self.ctx.is_active() {
            return CommandResult::err(WalletError::SessionNotActivated);
        }
        if self.transaction.operations.is_empty() {
            return CommandResult::err(WalletError::Validation(
                "Refusing to sign a transaction with no operations".to_string(),
            ));
        }
        if !self.transaction.is_built() {
            return CommandResult::err(WalletError::Validation(
                "Transaction must be built before signing".to_string(),
            ));
        }

        let public_key = match self.ctx.resolve_alias(&self.key_alias) {
            Ok(key) => key,
            Err(e) => return CommandResult::err(e),
        };

        // The alias map belongs to the profile; the daemon decides
        // whether the key itself is available
        let held = match self.ctx.beekeeper.get_public_keys().await {
            Ok(keys) => keys,
            Err(e) => return CommandResult::err(e),
        };
        if !held.contains(&public_key) {
            return CommandResult::err(WalletError::KeyNotFound(format!(
                "Key '{}' (alias '{}') is not held by the key-custody daemon",
                public_key, self.key_alias
            )));
        }

        let digest = self.transaction.signing_digest(&self.ctx.chain_id);
        let signature = match self.ctx.beekeeper.sign_digest(&digest, &public_key).await {
            Ok(signature) => signature,
            Err(e) => return CommandResult::err(e),
        };

        let mut signed = self.transaction.clone();
        signed.add_signature(signature);
        log::debug!(
            "Signed transaction {} with alias '{}'",
            signed.transaction_id(),
            self.key_alias
        );
        CommandResult::ok(signed)
    }
}

/// Broadcast a signed transaction via the node
///
/// Must not run under any retry wrapper: a duplicate broadcast of an
/// already-accepted transaction yields a node-reported duplicate error
/// and is terminal.
pub struct BroadcastTransaction<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    transaction: Transaction,
}

impl<'a, N: Transport, B: Transport> BroadcastTransaction<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, transaction: Transaction) -> Self {
        Self { ctx, transaction }
    }
}

impl<N: Transport, B: Transport> Command for BroadcastTransaction<'_, N, B> {
    type Output = TransactionId;

    async fn run(&self) -> CommandResult<TransactionId> {
        if !self.transaction.is_signed() {
            return CommandResult::err(WalletError::Validation(
                "Transaction must be signed before broadcasting".to_string(),
            ));
        }

        let params = BroadcastTransactionParams {
            trx: self.transaction.clone(),
        };
        if let Err(e) = self
            .ctx
            .node
            .call(&api::network_broadcast_api::broadcast_transaction(), &params)
            .await
        {
            if e.is_duplicate_transaction() {
                log::warn!("Node rejected broadcast as a duplicate; not retrying");
            }
            return CommandResult::err(e);
        }

        let id = self.transaction.transaction_id();
        log::info!("Broadcast accepted, transaction id {}", id);
        CommandResult::ok(id)
    }
}

/// Recovery callback for the two fixable preconditions: unlocks the
/// session wallet on `WalletLocked` and activates the session on
/// `SessionNotActivated`.
pub struct SessionRecovery<'a, N: Transport, B: Transport> {
    ctx: &'a SessionContext<N, B>,
    password: String,
}

impl<'a, N: Transport, B: Transport> SessionRecovery<'a, N, B> {
    pub fn new(ctx: &'a SessionContext<N, B>, password: &str) -> Self {
        Self {
            ctx,
            password: password.to_string(),
        }
    }
}

impl<N: Transport, B: Transport> Recovery for SessionRecovery<'_, N, B> {
    async fn recover(&self, error: &WalletError) -> bool {
        match error {
            WalletError::WalletLocked(_) => {
                match self.ctx.beekeeper.unlock(&self.ctx.wallet, &self.password).await {
                    Ok(()) => {
                        log::info!("Unlocked wallet '{}'", self.ctx.wallet);
                        true
                    }
                    Err(e) => {
                        log::warn!("Unlock of '{}' failed: {}", self.ctx.wallet, e);
                        false
                    }
                }
            }
            WalletError::SessionNotActivated => {
                self.ctx.activate();
                true
            }
            _ => false,
        }
    }
}

/// Build entry point: ordered operations in, built transaction out
pub async fn build<N: Transport, B: Transport>(
    ctx: &SessionContext<N, B>,
    operations: Vec<Operation>,
) -> CommandResult<Transaction> {
    BuildTransaction::new(ctx, operations).run().await
}

/// Sign entry point, with one recovery attempt for fixable preconditions
pub async fn sign<N: Transport, B: Transport, R: Recovery>(
    ctx: &SessionContext<N, B>,
    transaction: Transaction,
    key_alias: &str,
    recovery: &R,
) -> CommandResult<Transaction> {
    let command = SignTransaction::new(ctx, transaction, key_alias);
    run_with_recovery(&command, recovery).await
}

/// Broadcast entry point; never retried
pub async fn broadcast<N: Transport, B: Transport>(
    ctx: &SessionContext<N, B>,
    transaction: Transaction,
) -> CommandResult<TransactionId> {
    BroadcastTransaction::new(ctx, transaction).run().await
}

/// Sign, then broadcast once. Both the "fast" and the "staged" CLI
/// paths route through this single pipeline.
pub async fn sign_and_broadcast<N: Transport, B: Transport, R: Recovery>(
    ctx: &SessionContext<N, B>,
    transaction: Transaction,
    key_alias: &str,
    recovery: &R,
) -> CommandResult<TransactionId> {
    let signed = match sign(ctx, transaction, key_alias, recovery).await.into_result() {
        Ok(signed) => signed,
        Err(e) => return CommandResult::err(e),
    };
    broadcast(ctx, signed).await
}
