//! Solana signature verification: Ed25519 over the raw message bytes.
//!
//! The wallet address **is** the base58-encoded public key, so there is no
//! separate recovery step: decode the claimed address, verify the
//! signature under it, and echo the address back on success.

use ed25519_dalek::{Signature, VerifyingKey};

use crate::Verification;

fn decode32(b58: &str) -> Option<[u8; 32]> {
    bs58::decode(b58).into_vec().ok()?.try_into().ok()
}

fn decode64(b58: &str) -> Option<[u8; 64]> {
    bs58::decode(b58).into_vec().ok()?.try_into().ok()
}

/// Verify a Solana wallet signature (both signature and address base58).
#[must_use]
pub fn verify(message: &str, signature_b58: &str, claimed_address: &str) -> Verification {
    let Some(key_bytes) = decode32(claimed_address) else {
        return Verification::fail();
    };
    let Some(sig_bytes) = decode64(signature_b58) else {
        return Verification::fail();
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return Verification::fail();
    };
    let signature = Signature::from_bytes(&sig_bytes);
    if key.verify_strict(message.as_bytes(), &signature).is_ok() {
        Verification::ok(claimed_address.to_string())
    } else {
        Verification::fail()
    }
}
