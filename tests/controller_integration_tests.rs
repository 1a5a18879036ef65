//! Integration tests for the bridge workflow controller using fake gateways
//!
//! These tests drive the full workflow (connect → load → build → quote →
//! send → confirm) against scripted fakes, including the failure paths that
//! matter: absent capabilities, preflight reverts, session changes racing a
//! cached quote, and the no-quote/no-override send policy.

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use oft_rs::testing::{FakeOftBinder, FakeOftGateway, FakeWalletGateway};
use oft_rs::{
    BridgePhase, EndpointId, FeeQuote, OftBridge, OftError, RequestDraft, Session, SessionEvent,
    TxStatus,
};

const CONTRACT: &str = "0x9f3B8679c73C2Fef8b59B4f3444d4e156fb70AA5";

fn user() -> Address {
    Address::repeat_byte(0x11)
}

fn session() -> Session {
    Session {
        address: user(),
        chain_id: 1,
    }
}

fn draft(amount: &str) -> RequestDraft {
    RequestDraft::builder()
        .destination(EndpointId::Arbitrum)
        .amount(amount)
        .build()
}

type TestBridge = OftBridge<FakeWalletGateway, FakeOftBinder>;

/// Helper to create a connected controller with a loaded contract
async fn connected_bridge(gateway: FakeOftGateway) -> TestBridge {
    let wallet = FakeWalletGateway::with_session(session());
    let mut bridge = OftBridge::new(wallet, FakeOftBinder::new(gateway));
    bridge.connect().await.expect("connect should succeed");
    bridge
        .load_contract(CONTRACT)
        .await
        .expect("load should succeed");
    bridge
}

#[tokio::test]
async fn test_connect_stores_session_and_defaults_recipient() {
    let mut bridge = connected_bridge(FakeOftGateway::new()).await;

    assert_eq!(bridge.session(), Some(&session()));

    // A draft without a recipient falls back to the connected address
    let request = bridge.build_request(&draft("1.0")).unwrap();
    assert_eq!(request.recipient(), user());
    assert_eq!(bridge.phase(), BridgePhase::RequestBuilt);
}

#[tokio::test]
async fn test_connect_failures_surface_directly() {
    let wallet = FakeWalletGateway::default();
    wallet.fail_connect_unavailable();
    let mut bridge = OftBridge::new(wallet, FakeOftBinder::new(FakeOftGateway::new()));
    assert!(matches!(
        bridge.connect().await,
        Err(OftError::WalletUnavailable)
    ));

    let wallet = FakeWalletGateway::default();
    wallet.fail_connect_rejected();
    let mut bridge = OftBridge::new(wallet, FakeOftBinder::new(FakeOftGateway::new()));
    assert!(matches!(bridge.connect().await, Err(OftError::UserRejected)));
}

#[tokio::test]
async fn test_load_rejects_malformed_address_before_binding() {
    let binder = FakeOftBinder::new(FakeOftGateway::new());
    let wallet = FakeWalletGateway::with_session(session());
    let mut bridge = OftBridge::new(wallet, binder.clone());

    let err = bridge.load_contract("not-an-address").await.unwrap_err();
    assert!(matches!(err, OftError::InvalidAddress { .. }));
    assert!(binder.bound_addresses().is_empty());
}

#[tokio::test]
async fn test_metadata_probe_degrades_per_field() {
    let gateway = FakeOftGateway::new();
    gateway.fail_decimals();

    let bridge = connected_bridge(gateway).await;
    let contract = bridge.contract().unwrap();

    // decimals degrades to 18, the other probes still resolve
    assert_eq!(contract.metadata.decimals, 18);
    assert_eq!(contract.metadata.name, "Omni Token");
    assert_eq!(contract.metadata.symbol, "OMNI");
}

#[tokio::test]
async fn test_metadata_probe_degrades_all_fields() {
    let gateway = FakeOftGateway::new();
    gateway.fail_name();
    gateway.fail_symbol();
    gateway.fail_decimals();

    let bridge = connected_bridge(gateway).await;
    let contract = bridge.contract().unwrap();
    assert_eq!(contract.metadata.name, "");
    assert_eq!(contract.metadata.symbol, "");
    assert_eq!(contract.metadata.decimals, 18);
}

#[tokio::test]
async fn test_request_scaling_and_slippage() {
    let mut bridge = connected_bridge(FakeOftGateway::new()).await;

    let request = bridge
        .build_request(
            &RequestDraft::builder()
                .destination(EndpointId::Arbitrum)
                .amount("1.0")
                .slippage_bps(50)
                .build(),
        )
        .unwrap();

    assert_eq!(
        request.amount_ld(),
        "1000000000000000000".parse::<U256>().unwrap()
    );
    assert_eq!(
        request.min_amount_ld(),
        "995000000000000000".parse::<U256>().unwrap()
    );
}

#[tokio::test]
async fn test_request_validation_fails_before_any_network_call() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    let calls_after_load = gateway.quote_call_count();

    let err = bridge.build_request(&draft("0")).unwrap_err();
    assert!(matches!(err, OftError::InvalidRequest { .. }));

    let err = bridge
        .build_request(
            &RequestDraft::builder()
                .destination(EndpointId::Arbitrum)
                .recipient("0x1234")
                .amount("1.0")
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, OftError::InvalidAddress { .. }));

    assert_eq!(gateway.quote_call_count(), calls_after_load);
    assert_eq!(gateway.preflight_call_count(), 0);
}

#[tokio::test]
async fn test_quote_is_idempotent() {
    let gateway = FakeOftGateway::new();
    gateway.set_quote(FeeQuote::native(U256::from(4242u64)));
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    let first = bridge.quote().await.unwrap();
    let second = bridge.quote().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.native_fee, U256::from(4242u64));
    assert_eq!(bridge.phase(), BridgePhase::Quoted);
}

#[tokio::test]
async fn test_missing_capability_fails_without_network_call() {
    let gateway = FakeOftGateway::new();
    gateway.unsupported_quotes();

    let mut bridge = connected_bridge(gateway.clone()).await;
    let contract = bridge.contract().unwrap().clone();
    assert!(contract.variant.is_none());

    // Both probes ran at load; nothing after that
    let calls_after_load = gateway.quote_call_count();
    assert_eq!(calls_after_load, 2);

    bridge.build_request(&draft("1.0")).unwrap();
    let err = bridge.quote().await.unwrap_err();
    assert!(matches!(err, OftError::CapabilityUnavailable(_)));

    let err = bridge.send(None).await.unwrap_err();
    assert!(matches!(err, OftError::CapabilityUnavailable(_)));

    assert_eq!(gateway.quote_call_count(), calls_after_load);
    assert_eq!(gateway.preflight_call_count(), 0);
    assert!(gateway.submissions().is_empty());
}

#[tokio::test]
async fn test_quote_failure_is_expected_for_unrouted_peer() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    gateway.fail_quotes("LZ: no trusted remote configured");
    let err = bridge.quote().await.unwrap_err();
    assert!(matches!(err, OftError::QuoteFailed { .. }));
}

#[tokio::test]
async fn test_send_reuses_fresh_quote() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    bridge.quote().await.unwrap();
    let calls_after_quote = gateway.quote_call_count();

    let handle = bridge.send(None).await.unwrap();
    assert!(handle.is_pending());
    assert_eq!(bridge.phase(), BridgePhase::Submitted);

    // The cached quote was reused; no re-quote happened inside send
    assert_eq!(gateway.quote_call_count(), calls_after_quote);
    assert_eq!(gateway.submissions().len(), 1);
    assert_eq!(
        gateway.submissions()[0].value,
        Some(U256::from(1000u64)),
        "attached value must equal the quoted native fee"
    );
}

#[tokio::test]
async fn test_request_edit_invalidates_cached_quote() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;

    bridge.build_request(&draft("1.0")).unwrap();
    bridge.quote().await.unwrap();
    let calls_after_quote = gateway.quote_call_count();

    // Editing any field produces a different fingerprint
    bridge.build_request(&draft("2.0")).unwrap();
    bridge.send(None).await.unwrap();

    assert_eq!(
        gateway.quote_call_count(),
        calls_after_quote + 1,
        "send must re-quote after a request edit"
    );
}

#[tokio::test]
async fn test_send_without_quote_fetches_one_first() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    let calls_after_load = gateway.quote_call_count();

    bridge.send(None).await.unwrap();

    assert_eq!(gateway.quote_call_count(), calls_after_load + 1);
    assert_eq!(gateway.submissions()[0].value, Some(U256::from(1000u64)));
}

#[tokio::test]
async fn test_send_never_defaults_fee_to_zero() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    // No cached quote, no override, and the fresh quote fails
    gateway.fail_quotes("LZ: no trusted remote configured");
    let err = bridge.send(None).await.unwrap_err();
    assert!(matches!(err, OftError::QuoteFailed { .. }));
    assert!(gateway.submissions().is_empty());
    assert_eq!(gateway.preflight_call_count(), 0);
}

#[tokio::test]
async fn test_explicit_fee_override_is_honored() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    gateway.fail_quotes("LZ: no trusted remote configured");
    bridge.build_request(&draft("1.0")).unwrap();

    // An explicit override skips quoting entirely, even at zero
    let handle = bridge.send(Some(U256::ZERO)).await.unwrap();
    assert!(handle.is_pending());
    assert_eq!(gateway.submissions()[0].value, Some(U256::ZERO));
}

#[tokio::test]
async fn test_preflight_revert_aborts_without_submission() {
    let gateway = FakeOftGateway::new();
    gateway.revert_preflight("LZ: destination gas too low");
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.quote().await.unwrap();

    let err = bridge.send(None).await.unwrap_err();
    match err {
        OftError::PreflightReverted { reason } => {
            assert!(reason.contains("destination gas too low"))
        }
        other => panic!("expected PreflightReverted, got {other:?}"),
    }

    assert!(gateway.submissions().is_empty());
    assert_eq!(bridge.phase(), BridgePhase::Quoted);

    // A fixed contract state lets the same request go through afterwards
    gateway.pass_preflight(150_000);
    let handle = bridge.send(None).await.unwrap();
    assert!(handle.is_pending());
    assert_eq!(gateway.submissions().len(), 1);
}

#[tokio::test]
async fn test_submissions_never_exceed_successful_preflights() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    gateway.revert_preflight("revert one");
    assert!(bridge.send(None).await.is_err());
    gateway.pass_preflight(100_000);
    bridge.send(None).await.unwrap();

    let successful_preflights = gateway.preflight_call_count() - 1;
    assert!(gateway.submissions().len() as u32 <= successful_preflights);
}

#[tokio::test]
async fn test_submission_failure_is_distinct_from_preflight() {
    let gateway = FakeOftGateway::new();
    gateway.fail_submit("nonce too low");
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    let err = bridge.send(None).await.unwrap_err();
    assert!(matches!(err, OftError::SubmissionFailed { .. }));
    assert_eq!(bridge.phase(), BridgePhase::Failed);
    assert!(gateway.submissions().is_empty());
}

#[tokio::test]
async fn test_second_send_for_pending_request_is_rejected() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();

    bridge.send(None).await.unwrap();
    let err = bridge.send(None).await.unwrap_err();
    assert!(matches!(err, OftError::SendInFlight));
    assert_eq!(gateway.submissions().len(), 1);

    // Once confirmed, a fresh user-initiated send may proceed
    bridge.await_confirmation().await.unwrap();
    bridge.send(None).await.unwrap();
    assert_eq!(gateway.submissions().len(), 2);
}

#[tokio::test]
async fn test_confirmation_transitions_handle() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.send(None).await.unwrap();

    let handle = bridge.await_confirmation().await.unwrap();
    assert_eq!(handle.status, TxStatus::Confirmed);
    assert_eq!(bridge.phase(), BridgePhase::Confirmed);
}

#[tokio::test]
async fn test_failed_confirmation_is_final() {
    let gateway = FakeOftGateway::new();
    gateway.set_confirmation(TxStatus::Failed);
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.send(None).await.unwrap();

    let handle = bridge.await_confirmation().await.unwrap();
    assert_eq!(handle.status, TxStatus::Failed);
    assert_eq!(bridge.phase(), BridgePhase::Failed);
    // Nothing was resubmitted behind the caller's back
    assert_eq!(gateway.submissions().len(), 1);
}

#[tokio::test]
async fn test_account_change_mid_quote_discards_stale_quote() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.quote().await.unwrap();
    let calls_after_quote = gateway.quote_call_count();

    let new_account = Address::repeat_byte(0x22);
    bridge.handle_session_event(SessionEvent::AccountsChanged(Some(new_account)));

    let handle = bridge.send(None).await.unwrap();
    assert!(handle.is_pending());

    // The stale-session quote was not reused, and the transaction is
    // keyed to the new session's address
    assert_eq!(gateway.quote_call_count(), calls_after_quote + 1);
    assert_eq!(gateway.submissions()[0].from, Some(new_account));
}

#[tokio::test]
async fn test_disconnect_mid_flight_fails_cleanly() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.quote().await.unwrap();

    bridge.handle_session_event(SessionEvent::Disconnected);

    let err = bridge.send(None).await.unwrap_err();
    assert!(matches!(err, OftError::NotConnected));
    assert!(gateway.submissions().is_empty());
}

#[tokio::test]
async fn test_legacy_contract_flow() {
    let gateway = FakeOftGateway::new();
    gateway.as_v1(FeeQuote::native(U256::from(500u64)));

    let mut bridge = connected_bridge(gateway.clone()).await;
    let contract = bridge.contract().unwrap().clone();
    assert_eq!(contract.variant, Some(oft_rs::OftVariant::V1));

    bridge.build_request(&draft("1.0")).unwrap();
    let fee = bridge.quote().await.unwrap();
    assert_eq!(fee.native_fee, U256::from(500u64));

    bridge.send(None).await.unwrap();
    assert_eq!(gateway.submissions()[0].value, Some(U256::from(500u64)));
    assert_eq!(gateway.submissions()[0].from, Some(user()));
}

#[tokio::test]
async fn test_ensure_source_network_noop_when_already_there() {
    let wallet = FakeWalletGateway::with_session(session());
    let mut bridge = OftBridge::new(wallet.clone(), FakeOftBinder::new(FakeOftGateway::new()));
    bridge.connect().await.unwrap();

    bridge.ensure_source_network(NamedChain::Mainnet).await.unwrap();
    assert!(wallet.switch_calls().is_empty());
    assert!(wallet.added_networks().is_empty());
}

#[tokio::test]
async fn test_ensure_source_network_switches_known_chain() {
    let wallet = FakeWalletGateway::with_session(session());
    wallet.add_known_chain(8453);
    let mut bridge = OftBridge::new(wallet.clone(), FakeOftBinder::new(FakeOftGateway::new()));
    bridge.connect().await.unwrap();

    bridge.ensure_source_network(NamedChain::Base).await.unwrap();
    assert_eq!(wallet.switch_calls(), vec![8453]);
    assert!(wallet.added_networks().is_empty());
    assert_eq!(bridge.session().unwrap().chain_id, 8453);
}

#[tokio::test]
async fn test_ensure_source_network_adds_unknown_chain_from_preset() {
    let wallet = FakeWalletGateway::with_session(session());
    let mut bridge = OftBridge::new(wallet.clone(), FakeOftBinder::new(FakeOftGateway::new()));
    bridge.connect().await.unwrap();

    bridge.ensure_source_network(NamedChain::Base).await.unwrap();

    assert_eq!(wallet.switch_calls(), vec![8453]);
    let added = wallet.added_networks();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].chain_id, 8453);
    assert_eq!(added[0].chain_name, "Base");
    assert_eq!(bridge.session().unwrap().chain_id, 8453);
}

#[tokio::test]
async fn test_ensure_source_network_rejection_surfaces() {
    let wallet = FakeWalletGateway::with_session(session());
    wallet.reject_switch();
    let mut bridge = OftBridge::new(wallet, FakeOftBinder::new(FakeOftGateway::new()));
    bridge.connect().await.unwrap();

    let err = bridge
        .ensure_source_network(NamedChain::Base)
        .await
        .unwrap_err();
    assert!(matches!(err, OftError::NetworkSwitchRejected));
    assert_eq!(bridge.session().unwrap().chain_id, 1);
}

#[tokio::test]
async fn test_ensure_source_network_requires_preset() {
    let wallet = FakeWalletGateway::with_session(session());
    let mut bridge = OftBridge::new(wallet, FakeOftBinder::new(FakeOftGateway::new()));
    bridge.connect().await.unwrap();

    let err = bridge
        .ensure_source_network(NamedChain::Moonbeam)
        .await
        .unwrap_err();
    assert!(matches!(err, OftError::UnsupportedChain(_)));
}

#[tokio::test]
async fn test_loading_contract_resets_attempt_state() {
    let gateway = FakeOftGateway::new();
    let mut bridge = connected_bridge(gateway.clone()).await;
    bridge.build_request(&draft("1.0")).unwrap();
    bridge.quote().await.unwrap();

    bridge.load_contract(CONTRACT).await.unwrap();

    assert!(bridge.request().is_none());
    assert_eq!(bridge.phase(), BridgePhase::Idle);
    let err = bridge.quote().await.unwrap_err();
    assert!(matches!(err, OftError::InvalidRequest { .. }));
}
