//! Sui signature verification: intent-wrapped Ed25519 over Blake2b-256.
//!
//! A Sui personal-message signature is a 97-byte base64 blob:
//! `scheme flag (0x00 = Ed25519) || signature (64) || public key (32)`.
//! The signed digest is Blake2b-256 over the personal-message intent
//! prefix `[3, 0, 0]` followed by the BCS encoding of the message bytes
//! (ULEB128 length prefix, then the bytes). The signer's address is
//! Blake2b-256 of `flag || public key`, 0x-hex.
//!
//! Only the Ed25519 scheme is accepted; any other flag fails closed.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signature, VerifyingKey};

use crate::Verification;

type Blake2b256 = Blake2b<U32>;

/// Ed25519 scheme flag.
const ED25519_FLAG: u8 = 0x00;

/// Personal-message intent: scope 3, version 0, app id 0.
const PERSONAL_MESSAGE_INTENT: [u8; 3] = [3, 0, 0];

fn uleb128(mut value: usize, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Blake2b-256 digest of the intent-wrapped personal message.
#[must_use]
pub fn intent_digest(message: &[u8]) -> [u8; 32] {
    let mut wrapped = Vec::with_capacity(3 + 5 + message.len());
    wrapped.extend_from_slice(&PERSONAL_MESSAGE_INTENT);
    uleb128(message.len(), &mut wrapped);
    wrapped.extend_from_slice(message);
    Blake2b256::digest(&wrapped).into()
}

/// Derive the 0x-prefixed Sui address for an Ed25519 public key.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(key.as_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}

/// Verify a Sui personal-message signature against a claimed address.
#[must_use]
pub fn verify(message: &str, signature_b64: &str, claimed_address: &str) -> Verification {
    use base64::Engine as _;
    let Ok(blob) = base64::engine::general_purpose::STANDARD.decode(signature_b64) else {
        return Verification::fail();
    };
    if blob.len() != 97 || blob[0] != ED25519_FLAG {
        return Verification::fail();
    }
    let Ok(sig_bytes) = <[u8; 64]>::try_from(&blob[1..65]) else {
        return Verification::fail();
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(&blob[65..97]) else {
        return Verification::fail();
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return Verification::fail();
    };
    let signature = Signature::from_bytes(&sig_bytes);
    let digest = intent_digest(message.as_bytes());
    if key.verify_strict(&digest, &signature).is_err() {
        return Verification::fail();
    }
    let address = address_of(&key);
    if address.eq_ignore_ascii_case(claimed_address) {
        Verification::ok(address)
    } else {
        Verification::fail()
    }
}
