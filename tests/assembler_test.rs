//! Build -> sign -> broadcast pipeline tests against stub transports

mod common;

use chrono::NaiveDateTime;
use common::{
    head_response, held_keys_response, stub_context, transfer_operation, StubTransport,
    BROADCAST_METHOD, DGPO_METHOD, GET_PUBLIC_KEYS_METHOD, HEAD_BLOCK_NUMBER, SIGN_DIGEST_METHOD,
    UNLOCK_METHOD,
};
use hive_wallet::assembler::{self, SessionRecovery};
use hive_wallet::chain::asset::Asset;
use hive_wallet::chain::operation::{Operation, TransferOperation};
use hive_wallet::chain::transaction::Transaction;
use hive_wallet::command::NoRecovery;
use hive_wallet::error::WalletError;
use serde_json::json;

fn locked_error() -> WalletError {
    WalletError::NodeReported {
        code: -32003,
        message: "Assert Exception: wallet is locked".to_string(),
    }
}

fn expected_expiration_ts() -> i64 {
    // Head time plus the 30-minute expiration window
    NaiveDateTime::parse_from_str("2026-01-01T00:30:00", "%Y-%m-%dT%H:%M:%S")
        .unwrap()
        .and_utc()
        .timestamp()
}

#[tokio::test]
async fn build_populates_tapos_from_the_chain_head() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let ctx = stub_context(node.clone(), StubTransport::new());

    let tx = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();

    assert_eq!(tx.ref_block_num, (HEAD_BLOCK_NUMBER & 0xffff) as u16);
    assert_eq!(
        tx.ref_block_prefix,
        u32::from_le_bytes([0xaa, 0xbb, 0xcc, 0xdd])
    );
    assert_eq!(tx.expiration.timestamp(), expected_expiration_ts());
    assert!(tx.is_built());
    assert!(!tx.is_signed());
    assert_eq!(tx.operations, vec![transfer_operation()]);
    assert_eq!(node.call_count(DGPO_METHOD), 1);
}

#[tokio::test]
async fn build_preserves_operation_order() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let ctx = stub_context(node, StubTransport::new());

    let first = transfer_operation();
    let second = Operation::Transfer(TransferOperation {
        from: "bob-account".to_string(),
        to: "alice".to_string(),
        amount: Asset::hbd(250),
        memo: "rent".to_string(),
    });

    let tx = assembler::build(&ctx, vec![first.clone(), second.clone()])
        .await
        .into_result()
        .unwrap();
    assert_eq!(tx.operations, vec![first, second]);
}

#[tokio::test]
async fn build_rejects_an_empty_operation_list() {
    let node = StubTransport::new();
    let ctx = stub_context(node.clone(), StubTransport::new());

    let result = assembler::build(&ctx, vec![]).await;
    assert!(matches!(result.error(), Some(WalletError::Validation(_))));
    // Rejected before any node round-trip
    assert_eq!(node.call_count(DGPO_METHOD), 0);
}

#[tokio::test]
async fn build_rejects_invalid_operations_locally() {
    let node = StubTransport::new();
    let ctx = stub_context(node.clone(), StubTransport::new());

    let bad = Operation::Transfer(TransferOperation {
        from: "x".to_string(),
        to: "bob-account".to_string(),
        amount: Asset::hive(1),
        memo: String::new(),
    });

    let result = assembler::build(&ctx, vec![bad]).await;
    assert!(matches!(result.error(), Some(WalletError::Validation(_))));
    assert_eq!(node.call_count(DGPO_METHOD), 0);
}

#[tokio::test]
async fn build_surfaces_an_unreachable_node() {
    // No scripted response: the stub reports a network failure
    let ctx = stub_context(StubTransport::new(), StubTransport::new());

    let result = assembler::build(&ctx, vec![transfer_operation()]).await;
    assert!(matches!(result.error(), Some(WalletError::Network(_))));
}

#[tokio::test]
async fn sign_attaches_the_daemon_signature() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Ok(held_keys_response()));
    beekeeper.respond(SIGN_DIGEST_METHOD, Ok(json!({ "signature": "SIG1" })));

    let ctx = stub_context(node, beekeeper);
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let signed = assembler::sign(&ctx, built.clone(), "owner", &NoRecovery)
        .await
        .into_result()
        .unwrap();

    assert_eq!(signed.signatures, vec!["SIG1"]);
    assert!(signed.is_signed());
    // Signing never touches TAPOS or the operations
    assert_eq!(signed.transaction_id(), built.transaction_id());
}

#[tokio::test]
async fn sign_requires_an_activated_session() {
    let beekeeper = StubTransport::new();
    let ctx = stub_context(StubTransport::new(), beekeeper.clone());

    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let build_ctx = stub_context(node, StubTransport::new());
    let built = assembler::build(&build_ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();

    let result = assembler::sign(&ctx, built, "owner", &NoRecovery).await;
    assert_eq!(result.error(), Some(&WalletError::SessionNotActivated));
    assert_eq!(beekeeper.call_count(GET_PUBLIC_KEYS_METHOD), 0);
}

#[tokio::test]
async fn sign_refuses_an_unbuilt_transaction() {
    let ctx = stub_context(StubTransport::new(), StubTransport::new());
    ctx.activate();

    let unbuilt = Transaction::with_operations(vec![transfer_operation()]);
    let result = assembler::sign(&ctx, unbuilt, "owner", &NoRecovery).await;
    assert!(matches!(result.error(), Some(WalletError::Validation(_))));
}

#[tokio::test]
async fn sign_recovery_activates_an_inactive_session() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Ok(held_keys_response()));
    beekeeper.respond(SIGN_DIGEST_METHOD, Ok(json!({ "signature": "SIG1" })));

    let ctx = stub_context(node, beekeeper);
    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();

    let recovery = SessionRecovery::new(&ctx, "password");
    let signed = assembler::sign(&ctx, built, "owner", &recovery)
        .await
        .into_result()
        .unwrap();

    assert_eq!(signed.signatures, vec!["SIG1"]);
    assert!(ctx.is_active());
}

#[tokio::test]
async fn sign_recovery_unlocks_a_locked_wallet() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    // First key listing fails because the wallet is locked; after the
    // unlock the listing succeeds
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Err(locked_error()));
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Ok(held_keys_response()));
    beekeeper.respond(UNLOCK_METHOD, Ok(json!({})));
    beekeeper.respond(SIGN_DIGEST_METHOD, Ok(json!({ "signature": "SIG1" })));

    let ctx = stub_context(node, beekeeper.clone());
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let recovery = SessionRecovery::new(&ctx, "password");
    let signed = assembler::sign(&ctx, built, "owner", &recovery)
        .await
        .into_result()
        .unwrap();

    assert_eq!(signed.signatures, vec!["SIG1"]);
    assert_eq!(beekeeper.call_count(UNLOCK_METHOD), 1);
    assert_eq!(beekeeper.call_count(GET_PUBLIC_KEYS_METHOD), 2);
    assert_eq!(beekeeper.call_count(SIGN_DIGEST_METHOD), 1);
}

#[tokio::test]
async fn sign_surfaces_the_lock_when_unlock_fails() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Err(locked_error()));
    beekeeper.respond(
        UNLOCK_METHOD,
        Err(WalletError::NodeReported {
            code: -32003,
            message: "Invalid password for wallet".to_string(),
        }),
    );

    let ctx = stub_context(node, beekeeper.clone());
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let recovery = SessionRecovery::new(&ctx, "wrong-password");
    let result = assembler::sign(&ctx, built, "owner", &recovery).await;

    assert!(matches!(result.error(), Some(WalletError::WalletLocked(_))));
    // One failed attempt, one failed unlock, no re-invocation
    assert_eq!(beekeeper.call_count(GET_PUBLIC_KEYS_METHOD), 1);
    assert_eq!(beekeeper.call_count(UNLOCK_METHOD), 1);
}

#[tokio::test]
async fn sign_rejects_an_unknown_alias() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();

    let ctx = stub_context(node, beekeeper.clone());
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let result = assembler::sign(&ctx, built, "missing", &NoRecovery).await;

    assert!(matches!(result.error(), Some(WalletError::KeyNotFound(_))));
    // The alias failed locally; the daemon was never consulted
    assert_eq!(beekeeper.call_count(GET_PUBLIC_KEYS_METHOD), 0);
}

#[tokio::test]
async fn sign_rejects_a_key_the_daemon_does_not_hold() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    beekeeper.respond(
        GET_PUBLIC_KEYS_METHOD,
        Ok(json!({ "keys": [{ "public_key": "STM5SomeOtherKey" }] })),
    );

    let ctx = stub_context(node, beekeeper.clone());
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let result = assembler::sign(&ctx, built, "owner", &NoRecovery).await;

    assert!(matches!(result.error(), Some(WalletError::KeyNotFound(_))));
    assert_eq!(beekeeper.call_count(SIGN_DIGEST_METHOD), 0);
}

#[tokio::test]
async fn broadcast_returns_the_transaction_id() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    node.respond(BROADCAST_METHOD, Ok(json!({})));

    let ctx = stub_context(node.clone(), StubTransport::new());
    let mut tx = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    tx.add_signature("SIG1".to_string());

    let id = assembler::broadcast(&ctx, tx.clone())
        .await
        .into_result()
        .unwrap();
    assert_eq!(id, tx.transaction_id());
    assert_eq!(node.call_count(BROADCAST_METHOD), 1);
}

#[tokio::test]
async fn broadcast_requires_a_signature() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));

    let ctx = stub_context(node.clone(), StubTransport::new());
    let tx = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();

    let result = assembler::broadcast(&ctx, tx).await;
    assert!(matches!(result.error(), Some(WalletError::Validation(_))));
    assert_eq!(node.call_count(BROADCAST_METHOD), 0);
}

#[tokio::test]
async fn duplicate_broadcast_is_terminal() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    node.respond(
        BROADCAST_METHOD,
        Err(WalletError::NodeReported {
            code: -32000,
            message: "Duplicate transaction check failed".to_string(),
        }),
    );

    let ctx = stub_context(node.clone(), StubTransport::new());
    let mut tx = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    tx.add_signature("SIG1".to_string());

    let result = assembler::broadcast(&ctx, tx).await;
    let error = result.error().cloned().unwrap();
    assert!(error.is_duplicate_transaction());
    // Exactly one submission; duplicates are never retried
    assert_eq!(node.call_count(BROADCAST_METHOD), 1);
}

#[tokio::test]
async fn sign_and_broadcast_runs_the_full_pipeline() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    node.respond(BROADCAST_METHOD, Ok(json!({})));
    let beekeeper = StubTransport::new();
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Ok(held_keys_response()));
    beekeeper.respond(SIGN_DIGEST_METHOD, Ok(json!({ "signature": "SIG1" })));

    let ctx = stub_context(node.clone(), beekeeper.clone());
    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let expected_id = built.transaction_id();

    let recovery = SessionRecovery::new(&ctx, "password");
    let id = assembler::sign_and_broadcast(&ctx, built, "owner", &recovery)
        .await
        .into_result()
        .unwrap();

    assert_eq!(id, expected_id);
    assert_eq!(beekeeper.call_count(SIGN_DIGEST_METHOD), 1);
    assert_eq!(node.call_count(BROADCAST_METHOD), 1);
}

#[test]
fn pipeline_runs_on_a_current_thread_runtime() {
    // The CLI drives every command through a single-threaded runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    node.respond(BROADCAST_METHOD, Ok(json!({})));
    let beekeeper = StubTransport::new();
    beekeeper.respond(GET_PUBLIC_KEYS_METHOD, Ok(held_keys_response()));
    beekeeper.respond(SIGN_DIGEST_METHOD, Ok(json!({ "signature": "SIG1" })));

    let ctx = stub_context(node.clone(), beekeeper);
    let id = runtime.block_on(async {
        let built = assembler::build(&ctx, vec![transfer_operation()])
            .await
            .into_result()
            .unwrap();
        let recovery = SessionRecovery::new(&ctx, "password");
        assembler::sign_and_broadcast(&ctx, built, "owner", &recovery)
            .await
            .into_result()
            .unwrap()
    });

    assert_eq!(id.as_str().len(), 40);
    assert_eq!(node.call_count(BROADCAST_METHOD), 1);
}

#[tokio::test]
async fn sign_failure_stops_the_pipeline_before_broadcast() {
    let node = StubTransport::new();
    node.respond(DGPO_METHOD, Ok(head_response()));
    let beekeeper = StubTransport::new();
    beekeeper.respond(
        GET_PUBLIC_KEYS_METHOD,
        Err(WalletError::Network("daemon unreachable".to_string())),
    );

    let ctx = stub_context(node.clone(), beekeeper);
    ctx.activate();

    let built = assembler::build(&ctx, vec![transfer_operation()])
        .await
        .into_result()
        .unwrap();
    let result = assembler::sign_and_broadcast(&ctx, built, "owner", &NoRecovery).await;

    assert!(matches!(result.error(), Some(WalletError::Network(_))));
    assert_eq!(node.call_count(BROADCAST_METHOD), 0);
}
