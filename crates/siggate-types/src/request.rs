//! Wire shapes: the signed request envelope and API responses.

use serde::{Deserialize, Serialize};

use crate::{Action, ChainKind, OrderRecord, SiggateError};

/// A signed order request, as received from a client.
///
/// `order` stays untyped here; the gateway shapes it per-action during
/// structural validation. The fields mirror the public REST contract,
/// hence the camelCase wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedRequest {
    pub action: Action,
    /// Action-shaped order payload, untyped until validation.
    pub order: serde_json::Value,
    /// Chain-specific signature encoding (hex for EVM/Tron, base58 for
    /// Solana, base64 for Sui; unused for TON, which signs via `ton_proof`).
    pub signature: String,
    /// Client-asserted Unix timestamp, milliseconds.
    pub timestamp: i64,
    /// Client-generated single-use nonce.
    pub nonce: String,
    /// Claimed wallet address; verification binds the signature to it.
    pub wallet_address: String,
    pub chain_type: ChainKind,
    /// Optional opaque payload echoed into the TON proof message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// TON Connect proof, required when `chain_type` is [`ChainKind::Ton`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ton_proof: Option<TonProof>,
}

/// A `ton-proof-item-v2` proof as produced by TON Connect wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonProof {
    /// Unix timestamp of the proof, **seconds**.
    pub timestamp: i64,
    /// Declared byte length of `domain_value`; must match exactly.
    pub domain_length_bytes: u32,
    /// App domain the wallet signed for.
    pub domain_value: String,
    /// Ed25519 signature over the proof message, base64.
    pub signature: String,
    /// Payload string bound into the proof message.
    pub payload: String,
    /// Wallet state init, unused by verification but carried on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_init: Option<String>,
    /// Wallet Ed25519 public key, hex.
    pub public_key: String,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    /// The committed record, when the action produced or mutated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderRecord>,
}

impl ApiResponse {
    #[must_use]
    pub fn committed(order: OrderRecord) -> Self {
        Self {
            success: true,
            order: Some(order),
        }
    }
}

/// Error response body, paired with the error's HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl From<&SiggateError> for ErrorBody {
    fn from(err: &SiggateError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}
