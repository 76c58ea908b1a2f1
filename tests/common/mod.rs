//! Common test utilities
//!
//! Provides a scripted in-memory `Transport` so the node and key-custody
//! clients can be exercised without any network, plus helpers for
//! building a session context around stub transports.

#![allow(dead_code)]

use hive_wallet::chain::asset::Asset;
use hive_wallet::chain::operation::{Operation, TransferOperation};
use hive_wallet::chain::transaction::ChainId;
use hive_wallet::config::TESTNET_CHAIN_ID;
use hive_wallet::context::SessionContext;
use hive_wallet::error::WalletError;
use hive_wallet::rpc::{BeekeeperClient, NodeClient, Transport};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Head block used by the scripted node responses
pub const HEAD_BLOCK_NUMBER: u32 = 1000;

/// 20-byte head block id; bytes 4..8 are aa bb cc dd
pub const HEAD_BLOCK_ID: &str = "000003e8aabbccdd000000000000000000000000";

/// Head time in the chain's wire format
pub const HEAD_TIME: &str = "2026-01-01T00:00:00";

/// Public key the test profile aliases as "owner"
pub const SIGNING_KEY: &str = "STM8LEvwhjWmQ8GdFSmDkSJyNVkpYkFTCHsHHluuDdbWVDuqFdKRZ";

pub const DGPO_METHOD: &str = "database_api.get_dynamic_global_properties";
pub const BROADCAST_METHOD: &str = "network_broadcast_api.broadcast_transaction";
pub const GET_PUBLIC_KEYS_METHOD: &str = "beekeeper_api.get_public_keys";
pub const SIGN_DIGEST_METHOD: &str = "beekeeper_api.sign_digest";
pub const UNLOCK_METHOD: &str = "beekeeper_api.unlock";

#[derive(Default)]
struct StubInner {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, WalletError>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

/// Scripted transport: responses are queued per wire method
///
/// The last queued response for a method repeats, so a single `respond`
/// covers commands that call the same method more than once. Clones
/// share state, letting a test keep a handle after the transport moves
/// into a client.
#[derive(Clone, Default)]
pub struct StubTransport {
    inner: Arc<StubInner>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response for a wire method
    pub fn respond(&self, method: &str, response: Result<Value, WalletError>) {
        self.inner
            .responses
            .lock()
            .expect("stub lock poisoned")
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// How many times a wire method was called
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .calls
            .lock()
            .expect("stub lock poisoned")
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    /// Parameter payloads sent to a wire method, in call order
    pub fn params_for(&self, method: &str) -> Vec<Value> {
        self.inner
            .calls
            .lock()
            .expect("stub lock poisoned")
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

impl Transport for StubTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.inner
            .calls
            .lock()
            .expect("stub lock poisoned")
            .push((method.to_string(), params));

        let mut responses = self.inner.responses.lock().expect("stub lock poisoned");
        match responses.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .expect("non-empty queue yielded no response"),
            Some(queue) if queue.len() == 1 => queue
                .front()
                .cloned()
                .expect("non-empty queue yielded no response"),
            _ => Err(WalletError::Network(format!(
                "No scripted response for {}",
                method
            ))),
        }
    }
}

/// Dynamic global properties the stub node reports
pub fn head_response() -> Value {
    json!({
        "head_block_number": HEAD_BLOCK_NUMBER,
        "head_block_id": HEAD_BLOCK_ID,
        "time": HEAD_TIME,
        "last_irreversible_block_num": HEAD_BLOCK_NUMBER - 20,
    })
}

/// get_public_keys response holding exactly the test signing key
pub fn held_keys_response() -> Value {
    json!({ "keys": [{ "public_key": SIGNING_KEY }] })
}

/// Session context around two stub transports, with "owner" aliased to
/// the test signing key
pub fn stub_context(
    node: StubTransport,
    beekeeper: StubTransport,
) -> SessionContext<StubTransport, StubTransport> {
    let mut aliases = BTreeMap::new();
    aliases.insert("owner".to_string(), SIGNING_KEY.to_string());

    SessionContext::new(
        NodeClient::new(node, "stub://node"),
        BeekeeperClient::new(beekeeper, "stub://beekeeper"),
        ChainId::from_hex(TESTNET_CHAIN_ID).expect("testnet chain id is valid"),
        "default",
        aliases,
    )
}

/// A valid 1.000 HIVE transfer between two well-formed accounts
pub fn transfer_operation() -> Operation {
    Operation::Transfer(TransferOperation {
        from: "alice".to_string(),
        to: "bob-account".to_string(),
        amount: Asset::hive(1000),
        memo: String::new(),
    })
}
