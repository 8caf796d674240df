//! Full-pipeline tests: real keypairs signing real canonical messages,
//! driven through `Dispatcher::handle` exactly as an API layer would.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use ed25519_dalek::Signer as _;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use siggate_gateway::{Dispatcher, MemoryOrderStore, OrderStore};
use siggate_guard::MemoryNonceStore;
use siggate_types::{
    Action, ChainKind, GuardConfig, OrderBody, OrderId, OrderPayload, OrderStatus, SignedRequest,
    SiggateError, TonProof,
};
use siggate_verify::{canonical_message, evm, sui, ton};

type TestDispatcher = Dispatcher<MemoryNonceStore, MemoryOrderStore>;

fn dispatcher() -> TestDispatcher {
    Dispatcher::new(
        MemoryNonceStore::new(),
        MemoryOrderStore::new(),
        GuardConfig::default(),
    )
}

fn fresh_nonce() -> String {
    OrderId::new().to_string()
}

fn request(action: Action, order: serde_json::Value, chain: ChainKind, wallet: &str) -> SignedRequest {
    SignedRequest {
        action,
        order,
        signature: String::new(),
        timestamp: Utc::now().timestamp_millis(),
        nonce: fresh_nonce(),
        wallet_address: wallet.to_string(),
        chain_type: chain,
        payload: None,
        ton_proof: None,
    }
}

/// Rebuild the message the wallet would have been shown for this request.
fn message_for(req: &SignedRequest) -> String {
    let payload = OrderPayload::from_value(req.action, &req.order).unwrap();
    canonical_message(req.action, &payload, req.timestamp, &req.nonce).unwrap()
}

fn limit_order_json() -> serde_json::Value {
    serde_json::json!({
        "amount": "100", "fromSymbol": "USDC", "toSymbol": "ETH",
        "condition": "above", "targetPrice": "3000", "chainIndex": 1
    })
}

fn dca_order_json() -> serde_json::Value {
    serde_json::json!({
        "amountPerInterval": "50", "fromSymbol": "USDC", "toSymbol": "SOL",
        "frequency": "daily", "chainIndex": 501
    })
}

// --- EVM ---

fn evm_sign(key: &k256::ecdsa::SigningKey, message: &str) -> String {
    let prehash = evm::eip191_hash(message.as_bytes());
    let (sig, rid) = key.sign_prehash_recoverable(&prehash).unwrap();
    let mut raw = sig.to_bytes().to_vec();
    raw.push(rid.to_byte() + 27);
    format!("0x{}", hex::encode(raw))
}

fn signed_evm_request(
    key: &k256::ecdsa::SigningKey,
    action: Action,
    order: serde_json::Value,
) -> SignedRequest {
    let address = evm::address_of(key.verifying_key());
    let mut req = request(action, order, ChainKind::Evm, &address);
    req.signature = evm_sign(key, &message_for(&req));
    req
}

#[test]
fn evm_create_order_commits_with_recovered_owner() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let req = signed_evm_request(&key, Action::CreateOrder, limit_order_json());

    let response = gateway.handle(&req).unwrap();
    let order = response.order.unwrap();
    assert!(response.success);
    assert_eq!(order.owner, evm::address_of(key.verifying_key()));
    assert_eq!(order.status, OrderStatus::Active);
    assert!(matches!(order.body, OrderBody::Limit(_)));
}

#[test]
fn replayed_request_rejected_with_401() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let req = signed_evm_request(&key, Action::CreateOrder, limit_order_json());

    gateway.handle(&req).unwrap();
    let err = gateway.handle(&req).unwrap_err();
    assert!(matches!(err, SiggateError::NonceReused { .. }));
    assert_eq!(err.http_status(), 401);
}

#[test]
fn stale_timestamp_rejected_before_verification() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let address = evm::address_of(key.verifying_key());
    let mut req = request(Action::CreateOrder, limit_order_json(), ChainKind::Evm, &address);
    req.timestamp = Utc::now().timestamp_millis() - 600_000;
    req.signature = evm_sign(&key, &message_for(&req));

    let err = gateway.handle(&req).unwrap_err();
    assert!(matches!(err, SiggateError::SignatureExpired { .. }));
    assert_eq!(err.http_status(), 400);

    // The rejected request must not have burned its nonce.
    let mut retry = request(Action::CreateOrder, limit_order_json(), ChainKind::Evm, &address);
    retry.nonce = req.nonce.clone();
    retry.signature = evm_sign(&key, &message_for(&retry));
    gateway.handle(&retry).unwrap();
}

#[test]
fn tampered_payload_fails_signature_check() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let mut req = signed_evm_request(&key, Action::CreateOrder, limit_order_json());
    // Signed for 100, submitted as 1000.
    req.order["amount"] = serde_json::json!("1000");

    let err = gateway.handle(&req).unwrap_err();
    assert_eq!(err, SiggateError::SignatureInvalid);
    assert_eq!(err.http_status(), 401);
}

#[test]
fn mutation_by_non_owner_reads_as_not_found() {
    let gateway = dispatcher();
    let owner_key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let created = gateway
        .handle(&signed_evm_request(&owner_key, Action::CreateOrder, limit_order_json()))
        .unwrap()
        .order
        .unwrap();

    // A different wallet signs a perfectly valid cancel for the same id.
    let attacker_key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let cancel = signed_evm_request(
        &attacker_key,
        Action::CancelOrder,
        serde_json::json!({ "orderId": created.id.to_string() }),
    );
    let err = gateway.handle(&cancel).unwrap_err();
    assert_eq!(err, SiggateError::OrderNotOwned);
    assert_eq!(err.http_status(), 404);

    let untouched = gateway.orders().get(created.id).unwrap().unwrap();
    assert_eq!(untouched.status, OrderStatus::Active);
}

#[test]
fn cancel_order_cannot_target_dca() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let created = gateway
        .handle(&signed_evm_request(&key, Action::CreateDca, dca_order_json()))
        .unwrap()
        .order
        .unwrap();

    let cancel = signed_evm_request(
        &key,
        Action::CancelOrder,
        serde_json::json!({ "orderId": created.id.to_string() }),
    );
    let err = gateway.handle(&cancel).unwrap_err();
    assert!(matches!(err, SiggateError::InvalidOrder { .. }));
}

// --- Solana ---

fn signed_solana_request(
    key: &ed25519_dalek::SigningKey,
    action: Action,
    order: serde_json::Value,
) -> SignedRequest {
    let address = bs58::encode(key.verifying_key().to_bytes()).into_string();
    let mut req = request(action, order, ChainKind::Solana, &address);
    let sig = key.sign(message_for(&req).as_bytes());
    req.signature = bs58::encode(sig.to_bytes()).into_string();
    req
}

#[test]
fn solana_dca_lifecycle_pause_resume_cancel() {
    let gateway = dispatcher();
    let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    let created = gateway
        .handle(&signed_solana_request(&key, Action::CreateDca, dca_order_json()))
        .unwrap()
        .order
        .unwrap();
    let target = serde_json::json!({ "orderId": created.id.to_string() });

    let paused = gateway
        .handle(&signed_solana_request(&key, Action::PauseDca, target.clone()))
        .unwrap()
        .order
        .unwrap();
    assert_eq!(paused.status, OrderStatus::Paused);

    let resumed = gateway
        .handle(&signed_solana_request(&key, Action::ResumeDca, target.clone()))
        .unwrap()
        .order
        .unwrap();
    assert_eq!(resumed.status, OrderStatus::Active);

    let cancelled = gateway
        .handle(&signed_solana_request(&key, Action::CancelDca, target.clone()))
        .unwrap()
        .order
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // Cancelled is terminal.
    let err = gateway
        .handle(&signed_solana_request(&key, Action::PauseDca, target))
        .unwrap_err();
    assert!(matches!(err, SiggateError::InvalidTransition { .. }));
}

// --- Sui ---

fn sui_sign(key: &ed25519_dalek::SigningKey, message: &str) -> String {
    let digest = sui::intent_digest(message.as_bytes());
    let mut blob = vec![0x00];
    blob.extend_from_slice(&key.sign(&digest).to_bytes());
    blob.extend_from_slice(key.verifying_key().as_bytes());
    STANDARD.encode(blob)
}

fn signed_sui_request(
    key: &ed25519_dalek::SigningKey,
    action: Action,
    order: serde_json::Value,
) -> SignedRequest {
    let address = sui::address_of(&key.verifying_key());
    let mut req = request(action, order, ChainKind::Sui, &address);
    req.signature = sui_sign(key, &message_for(&req));
    req
}

#[test]
fn sui_bridge_intent_create_then_update() {
    let gateway = dispatcher();
    let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    let created = gateway
        .handle(&signed_sui_request(
            &key,
            Action::CreateBridgeIntent,
            serde_json::json!({
                "amountIn": "2.5", "amountOut": "2.495",
                "fromChainId": 1, "toChainId": 8453,
                "fromToken": "ETH", "toToken": "ETH"
            }),
        ))
        .unwrap()
        .order
        .unwrap();
    assert_eq!(created.owner, sui::address_of(&key.verifying_key()));

    let updated = gateway
        .handle(&signed_sui_request(
            &key,
            Action::UpdateBridgeIntent,
            serde_json::json!({
                "amountIn": "2.5", "amountOut": "2.48",
                "fromChainId": 1, "toChainId": 8453,
                "fromToken": "ETH", "toToken": "ETH",
                "provider": "across",
                "intentId": created.id.to_string()
            }),
        ))
        .unwrap()
        .order
        .unwrap();
    assert_eq!(updated.id, created.id);
    match updated.body {
        OrderBody::Bridge(intent) => {
            assert_eq!(intent.amount_out.to_string(), "2.48");
            assert_eq!(intent.provider.as_deref(), Some("across"));
        }
        other => panic!("expected bridge body, got {other:?}"),
    }
}

// --- Tron ---

fn tron_address(key: &k256::ecdsa::SigningKey) -> String {
    let evm_addr = evm::address_of(key.verifying_key());
    let mut raw = vec![0x41];
    raw.extend_from_slice(&hex::decode(&evm_addr[2..]).unwrap());
    bs58::encode(raw).with_check().into_string()
}

#[test]
fn tron_create_order_commits_base58_owner() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let address = tron_address(&key);
    let mut req = request(Action::CreateOrder, limit_order_json(), ChainKind::Tron, &address);
    req.signature = evm_sign(&key, &message_for(&req));

    let order = gateway.handle(&req).unwrap().order.unwrap();
    assert_eq!(order.owner, address);
    assert_eq!(order.chain, ChainKind::Tron);
}

// --- TON ---

fn ton_proof_for(key: &ed25519_dalek::SigningKey, address: &str, message: &str) -> TonProof {
    let (workchain, hash) = ton::parse_raw_address(address).unwrap();
    let domain = "app.example.com";
    let timestamp = Utc::now().timestamp();
    let mut m = Vec::new();
    m.extend_from_slice(b"ton-proof-item-v2/");
    m.extend_from_slice(&workchain.to_be_bytes());
    m.extend_from_slice(&hash);
    m.extend_from_slice(&(domain.len() as u32).to_le_bytes());
    m.extend_from_slice(domain.as_bytes());
    m.extend_from_slice(&(timestamp as u64).to_le_bytes());
    m.extend_from_slice(message.as_bytes());
    let mut outer = Sha256::new();
    outer.update([0xff, 0xff]);
    outer.update(b"ton-connect");
    outer.update(Sha256::digest(&m));
    let digest: [u8; 32] = outer.finalize().into();

    TonProof {
        timestamp,
        domain_length_bytes: domain.len() as u32,
        domain_value: domain.to_string(),
        signature: STANDARD.encode(key.sign(&digest).to_bytes()),
        payload: message.to_string(),
        state_init: None,
        public_key: hex::encode(key.verifying_key().as_bytes()),
    }
}

#[test]
fn ton_create_order_with_proof() {
    let gateway = dispatcher();
    let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    let address = format!("0:{}", hex::encode(Sha256::digest(key.verifying_key().as_bytes())));
    let mut req = request(Action::CreateOrder, limit_order_json(), ChainKind::Ton, &address);
    req.ton_proof = Some(ton_proof_for(&key, &address, &message_for(&req)));

    let order = gateway.handle(&req).unwrap().order.unwrap();
    assert_eq!(order.owner, address);
    assert_eq!(order.chain, ChainKind::Ton);
}

#[test]
fn ton_request_without_proof_is_400() {
    let gateway = dispatcher();
    let mut req = request(
        Action::CreateOrder,
        limit_order_json(),
        ChainKind::Ton,
        &format!("0:{}", "ab".repeat(32)),
    );
    req.signature = "unused".to_string();
    let err = gateway.handle(&req).unwrap_err();
    assert!(matches!(err, SiggateError::MissingField { .. }));
    assert_eq!(err.http_status(), 400);
}

#[test]
fn ton_mismatched_echo_payload_rejected() {
    let gateway = dispatcher();
    let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    let address = format!("0:{}", hex::encode(Sha256::digest(key.verifying_key().as_bytes())));
    let mut req = request(Action::CreateOrder, limit_order_json(), ChainKind::Ton, &address);
    req.ton_proof = Some(ton_proof_for(&key, &address, &message_for(&req)));
    req.payload = Some("something else".to_string());

    let err = gateway.handle(&req).unwrap_err();
    assert!(matches!(err, SiggateError::MalformedField { .. }));
}

#[test]
fn nonce_is_single_use_across_wallets() {
    let gateway = dispatcher();
    let key_a = k256::ecdsa::SigningKey::random(&mut OsRng);
    let key_b = k256::ecdsa::SigningKey::random(&mut OsRng);
    let shared_nonce = fresh_nonce();

    let mut req_a = request(
        Action::CreateOrder,
        limit_order_json(),
        ChainKind::Evm,
        &evm::address_of(key_a.verifying_key()),
    );
    req_a.nonce = shared_nonce.clone();
    req_a.signature = evm_sign(&key_a, &message_for(&req_a));

    // A second wallet validly signs its own message over the same nonce.
    let mut req_b = request(
        Action::CreateOrder,
        limit_order_json(),
        ChainKind::Evm,
        &evm::address_of(key_b.verifying_key()),
    );
    req_b.nonce = shared_nonce;
    req_b.signature = evm_sign(&key_b, &message_for(&req_b));

    gateway.handle(&req_a).unwrap();
    let err = gateway.handle(&req_b).unwrap_err();
    assert!(matches!(err, SiggateError::NonceReused { .. }));
    assert_eq!(err.http_status(), 401);
}

#[test]
fn purge_keeps_recently_consumed_nonces() {
    let gateway = dispatcher();
    let key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let req = signed_evm_request(&key, Action::CreateOrder, limit_order_json());
    gateway.handle(&req).unwrap();

    assert_eq!(gateway.guard().purge_expired().unwrap(), 0);
    let err = gateway.handle(&req).unwrap_err();
    assert!(matches!(err, SiggateError::NonceReused { .. }));
}
