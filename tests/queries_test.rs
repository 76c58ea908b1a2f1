//! Node client and read-only query tests against stub transports

mod common;

use common::{head_response, stub_context, StubTransport, DGPO_METHOD, HEAD_BLOCK_NUMBER};
use hive_wallet::chain::asset::Asset;
use hive_wallet::command::Command;
use hive_wallet::error::WalletError;
use hive_wallet::queries::{
    RetrieveAccount, RetrieveDynamicGlobalProperties, RetrieveReputation,
    RetrieveTransactionStatus,
};
use serde_json::json;
use std::time::Duration;

const FIND_ACCOUNTS_METHOD: &str = "database_api.find_accounts";
const REPUTATIONS_METHOD: &str = "reputation_api.get_account_reputations";
const FIND_TRANSACTION_METHOD: &str = "transaction_status_api.find_transaction";
const SIGN_DIGEST_METHOD: &str = "beekeeper_api.sign_digest";

#[tokio::test]
async fn account_balances_decode_either_wire_notation() {
    let node = StubTransport::new();
    node.respond(
        FIND_ACCOUNTS_METHOD,
        Ok(json!({
            "accounts": [{
                "name": "alice",
                // Legacy string and NAI object side by side
                "balance": "12.000 HIVE",
                "hbd_balance": { "amount": "500", "precision": 3, "nai": "@@000000013" },
                "vesting_shares": "1.234567 VESTS",
            }]
        })),
    );
    let ctx = stub_context(node.clone(), StubTransport::new());

    let account = RetrieveAccount::new(&ctx, "alice")
        .run()
        .await
        .into_result()
        .unwrap();

    assert_eq!(account.name, "alice");
    assert_eq!(account.balance, Asset::hive(12_000));
    assert_eq!(account.hbd_balance, Asset::hbd(500));
    assert_eq!(account.vesting_shares, Asset::vests(1_234_567));
    assert_eq!(account.savings_balance, None);

    // The request carries the account name
    let params = node.params_for(FIND_ACCOUNTS_METHOD);
    assert_eq!(params, vec![json!({ "accounts": ["alice"] })]);
}

#[tokio::test]
async fn missing_account_is_a_validation_failure() {
    let node = StubTransport::new();
    node.respond(FIND_ACCOUNTS_METHOD, Ok(json!({ "accounts": [] })));
    let ctx = stub_context(node, StubTransport::new());

    let result = RetrieveAccount::new(&ctx, "nobody").run().await;
    match result.error() {
        Some(WalletError::Validation(message)) => assert!(message.contains("nobody")),
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn unexpected_response_shape_is_node_reported() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(json!({ "something": "else" })));
    let ctx = stub_context(node, StubTransport::new());

    let result = RetrieveDynamicGlobalProperties::new(&ctx).run().await;
    match result.error() {
        Some(WalletError::NodeReported { code, message }) => {
            assert_eq!(*code, -1);
            assert!(message.contains("get_dynamic_global_properties"));
        }
        other => panic!("expected node-reported failure, got {:?}", other),
    }
}

#[tokio::test]
async fn head_state_is_served_from_cache_within_max_age() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let ctx = stub_context(node.clone(), StubTransport::new());

    let first = ctx.node.head_state(Duration::from_secs(60)).await.unwrap();
    let second = ctx.node.head_state(Duration::from_secs(60)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.head_block_number, HEAD_BLOCK_NUMBER);
    assert_eq!(node.call_count(DGPO_METHOD), 1);

    // A zero tolerance always refreshes
    ctx.node.head_state(Duration::ZERO).await.unwrap();
    assert_eq!(node.call_count(DGPO_METHOD), 2);
}

#[tokio::test]
async fn reputation_matches_the_exact_account() {
    let node = StubTransport::new();
    // Lower-bound queries can return a later account when the asked-for
    // one has no entry
    node.respond(
        REPUTATIONS_METHOD,
        Ok(json!({
            "reputations": [{ "account": "alice", "reputation": 7_654_321 }]
        })),
    );
    let ctx = stub_context(node.clone(), StubTransport::new());

    let reputation = RetrieveReputation::new(&ctx, "alice")
        .run()
        .await
        .into_result()
        .unwrap();
    assert_eq!(reputation, 7_654_321);
}

#[tokio::test]
async fn reputation_rejects_a_lower_bound_mismatch() {
    let node = StubTransport::new();
    node.respond(
        REPUTATIONS_METHOD,
        Ok(json!({
            "reputations": [{ "account": "aliceb", "reputation": 1 }]
        })),
    );
    let ctx = stub_context(node, StubTransport::new());

    let result = RetrieveReputation::new(&ctx, "alice").run().await;
    assert!(matches!(result.error(), Some(WalletError::Validation(_))));
}

#[tokio::test]
async fn transaction_status_decodes_optional_block() {
    let node = StubTransport::new();
    node.respond(
        FIND_TRANSACTION_METHOD,
        Ok(json!({ "status": "within_reversible_block", "block_num": 12345 })),
    );
    let ctx = stub_context(node.clone(), StubTransport::new());

    let status = RetrieveTransactionStatus::new(&ctx, "abc123")
        .run()
        .await
        .into_result()
        .unwrap();
    assert_eq!(status.status, "within_reversible_block");
    assert_eq!(status.block_num, Some(12345));
}

#[tokio::test]
async fn transaction_status_tolerates_a_missing_block() {
    let node = StubTransport::new();
    node.respond(FIND_TRANSACTION_METHOD, Ok(json!({ "status": "unknown" })));
    let ctx = stub_context(node, StubTransport::new());

    let unknown = RetrieveTransactionStatus::new(&ctx, "abc123")
        .run()
        .await
        .into_result()
        .unwrap();
    assert_eq!(unknown.status, "unknown");
    assert_eq!(unknown.block_num, None);
}

#[tokio::test]
async fn daemon_lock_errors_map_to_wallet_locked() {
    let beekeeper = StubTransport::new();
    beekeeper.respond(
        SIGN_DIGEST_METHOD,
        Err(WalletError::NodeReported {
            code: -32003,
            message: "Assert Exception: Wallet is locked".to_string(),
        }),
    );
    let ctx = stub_context(StubTransport::new(), beekeeper.clone());

    let result = ctx.beekeeper.sign_digest(&[0u8; 32], "STM5Key").await;
    assert!(matches!(result, Err(WalletError::WalletLocked(_))));

    // The digest goes over the wire hex-encoded
    let params = beekeeper.params_for(SIGN_DIGEST_METHOD);
    assert_eq!(params[0]["sig_digest"], json!("0".repeat(64)));
}

#[tokio::test]
async fn daemon_unknown_key_errors_map_to_key_not_found() {
    let beekeeper = StubTransport::new();
    beekeeper.respond(
        SIGN_DIGEST_METHOD,
        Err(WalletError::NodeReported {
            code: -32003,
            message: "Assert Exception: Key not in wallet".to_string(),
        }),
    );
    let ctx = stub_context(StubTransport::new(), beekeeper);

    let result = ctx.beekeeper.sign_digest(&[0u8; 32], "STM5Key").await;
    assert!(matches!(result, Err(WalletError::KeyNotFound(_))));
}
