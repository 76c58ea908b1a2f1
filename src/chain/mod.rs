//! Chain-level value types and canonical encoding
//!
//! Assets, operations and transactions, plus the deterministic byte
//! encoding used for signing digests and transaction ids.

pub mod asset;
pub mod encoding;
pub mod operation;
pub mod transaction;

pub use asset::{Asset, AssetError, Symbol};
pub use operation::{Operation, OperationError};
pub use transaction::{Transaction, TransactionId};
