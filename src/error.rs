//! Wallet error taxonomy
//!
//! Every boundary (node client, key-custody client, assembler) converts
//! native failures into one of these kinds before returning a
//! `CommandResult`. No raw transport error escapes a command boundary.

/// Failure kinds surfaced to callers of wallet commands
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum WalletError {
    /// Transport could not reach the service (node or key-custody daemon)
    #[error("Network error: {0}")]
    Network(String),

    /// The node accepted the request but returned a JSON-RPC error object
    #[error("Node reported error (code {code}): {message}")]
    NodeReported { code: i64, message: String },

    /// The key-custody daemon requires an unlock before signing
    #[error("Wallet is locked: {0}")]
    WalletLocked(String),

    /// The session has not been activated for signing operations
    #[error("Session is not activated")]
    SessionNotActivated,

    /// A key alias could not be resolved to a key held by the daemon
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Structural or semantic failure detected locally before transmission
    #[error("Validation error: {0}")]
    Validation(String),
}

impl WalletError {
    /// Whether this failure is a fixable precondition eligible for a
    /// single recovery attempt under the retry wrapper.
    ///
    /// Only locked-wallet and inactive-session failures qualify; network
    /// and node-reported failures are never auto-retried.
    pub fn is_fixable_precondition(&self) -> bool {
        matches!(
            self,
            WalletError::WalletLocked(_) | WalletError::SessionNotActivated
        )
    }

    /// Whether this is a node-reported duplicate-transaction rejection.
    ///
    /// Duplicate broadcasts are terminal: the original transaction was
    /// already accepted and the caller must not resubmit. The node
    /// reports every assert failure under the same JSON-RPC error code,
    /// so the message text is the only duplicate signal.
    pub fn is_duplicate_transaction(&self) -> bool {
        match self {
            WalletError::NodeReported { message, .. } => {
                let lower = message.to_lowercase();
                lower.contains("duplicate") || lower.contains("already known")
            }
            _ => false,
        }
    }
}
