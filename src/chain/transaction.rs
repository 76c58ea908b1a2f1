//! Transaction value type
//!
//! A transaction starts empty, gets TAPOS fields and an expiration from a
//! recent chain head ("built"), accumulates signatures ("signed" exactly
//! when `signatures` is non-empty), and is finally broadcast. The
//! canonical byte encoding drives both the signing digest and the
//! transaction id, so any structural mutation after signing shows up as
//! a changed id.

use crate::chain::encoding::ByteWriter;
use crate::chain::operation::Operation;
use crate::error::WalletError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of a chain, mixed into every signing digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainId([u8; 32]);

impl ChainId {
    pub fn from_hex(hex_str: &str) -> Result<Self, WalletError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| WalletError::Validation(format!("Invalid chain id hex: {}", e)))?;
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            WalletError::Validation("Chain id must be exactly 32 bytes".to_string())
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Transaction id: first 20 bytes of the SHA-256 of the canonical
/// encoding, hex-encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction as assembled by this wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,

    /// Wire format `YYYY-MM-DDTHH:MM:SS`; the epoch marks an unbuilt
    /// transaction
    #[serde(with = "chain_timestamp")]
    pub expiration: DateTime<Utc>,

    /// Order-significant; the canonical encoding preserves this order
    pub operations: Vec<Operation>,

    pub extensions: Vec<serde_json::Value>,

    /// Append-only; non-empty marks the transaction "signed"
    pub signatures: Vec<String>,
}

impl Transaction {
    /// Create an unbuilt transaction holding the given operations
    pub fn with_operations(operations: Vec<Operation>) -> Self {
        Self {
            ref_block_num: 0,
            ref_block_prefix: 0,
            expiration: Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
            operations,
            extensions: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Populate TAPOS fields and the expiration from a chain head
    ///
    /// `ref_block_num` is the low 16 bits of the head block number;
    /// `ref_block_prefix` is the little-endian u32 at bytes 4..8 of the
    /// head block id.
    pub fn apply_tapos(
        &mut self,
        head_block_number: u32,
        head_block_id: &str,
        expiration: DateTime<Utc>,
    ) -> Result<(), WalletError> {
        let id_bytes = hex::decode(head_block_id)
            .map_err(|e| WalletError::Validation(format!("Invalid head block id hex: {}", e)))?;
        if id_bytes.len() < 8 {
            return Err(WalletError::Validation(format!(
                "Head block id too short: {} bytes",
                id_bytes.len()
            )));
        }

        self.ref_block_num = (head_block_number & 0xffff) as u16;
        self.ref_block_prefix =
            u32::from_le_bytes([id_bytes[4], id_bytes[5], id_bytes[6], id_bytes[7]]);
        self.expiration = expiration;
        Ok(())
    }

    /// TAPOS and expiration have been populated
    pub fn is_built(&self) -> bool {
        !self.operations.is_empty() && self.expiration.timestamp() > 0
    }

    /// Signed exactly when at least one signature is attached
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Append a signature. Identical blobs are skipped so signing the
    /// same digest with the same key twice stays idempotent.
    pub fn add_signature(&mut self, signature: String) {
        if !self.signatures.contains(&signature) {
            self.signatures.push(signature);
        }
    }

    /// Canonical, order-sensitive byte encoding (signatures excluded)
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_u16(self.ref_block_num);
        writer.write_u32(self.ref_block_prefix);
        writer.write_timestamp(&self.expiration);
        writer.write_list(&self.operations, |w, op| op.write_canonical(w));
        // Extensions are unused by this wallet; encoded as an empty list
        writer.write_varint(self.extensions.len() as u64);
        writer.into_bytes()
    }

    /// Digest the key-custody daemon signs: SHA-256 over the chain id
    /// followed by the canonical encoding
    pub fn signing_digest(&self, chain_id: &ChainId) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(chain_id.as_bytes());
        hasher.update(self.to_canonical_bytes());
        hasher.finalize().into()
    }

    /// Pure function of the canonical encoding: unchanged transaction,
    /// same id; any operations mutation, different id
    pub fn transaction_id(&self) -> TransactionId {
        let digest: [u8; 32] = Sha256::digest(self.to_canonical_bytes()).into();
        TransactionId(hex::encode(&digest[..20]))
    }
}

/// Chain timestamps on the wire: `YYYY-MM-DDTHH:MM:SS`, implicitly UTC
pub(crate) mod chain_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }
}
