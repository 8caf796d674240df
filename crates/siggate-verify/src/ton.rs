//! TON signature verification: the TON Connect `ton-proof-item-v2` scheme.
//!
//! The wallet signs a structured message binding its address, the app
//! domain, a timestamp and the request payload:
//!
//! ```text
//! message  = "ton-proof-item-v2/"
//!            ++ workchain (i32 BE) ++ address hash (32)
//!            ++ domain length (u32 LE) ++ domain
//!            ++ timestamp (u64 LE) ++ payload
//! digest   = sha256(0xffff ++ "ton-connect" ++ sha256(message))
//! ```
//!
//! The Ed25519 signature in the proof is over `digest` under the proof's
//! public key. Because the claimed address is bound into the signed bytes,
//! a valid signature proves the wallet authorized the payload for that
//! address. Addresses are accepted in raw form only: `workchain:hex64`.

use ed25519_dalek::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};
use siggate_types::TonProof;

use crate::Verification;

const PROOF_PREFIX: &[u8] = b"ton-proof-item-v2/";
const VERIFY_PREFIX: &[u8] = b"ton-connect";

/// Parse a raw TON address (`workchain:hex64`) into its parts.
#[must_use]
pub fn parse_raw_address(address: &str) -> Option<(i32, [u8; 32])> {
    let (wc, hash_hex) = address.split_once(':')?;
    let workchain: i32 = wc.parse().ok()?;
    let hash: [u8; 32] = hex::decode(hash_hex).ok()?.try_into().ok()?;
    Some((workchain, hash))
}

fn proof_digest(workchain: i32, address_hash: &[u8; 32], proof: &TonProof, payload: &str) -> [u8; 32] {
    let mut message = Vec::with_capacity(
        PROOF_PREFIX.len() + 4 + 32 + 4 + proof.domain_value.len() + 8 + payload.len(),
    );
    message.extend_from_slice(PROOF_PREFIX);
    message.extend_from_slice(&workchain.to_be_bytes());
    message.extend_from_slice(address_hash);
    message.extend_from_slice(&proof.domain_length_bytes.to_le_bytes());
    message.extend_from_slice(proof.domain_value.as_bytes());
    #[allow(clippy::cast_sign_loss)]
    message.extend_from_slice(&(proof.timestamp as u64).to_le_bytes());
    message.extend_from_slice(payload.as_bytes());

    let mut outer = Sha256::new();
    outer.update([0xff, 0xff]);
    outer.update(VERIFY_PREFIX);
    outer.update(Sha256::digest(&message));
    outer.finalize().into()
}

/// Verify a `ton-proof-item-v2` proof binding `payload` to the claimed
/// raw address. `now_secs` is the server clock; proofs older than
/// `max_age_secs` (or timestamped in the future) fail.
#[must_use]
pub fn verify(
    payload: &str,
    proof: &TonProof,
    claimed_address: &str,
    max_age_secs: i64,
    now_secs: i64,
) -> Verification {
    let Some((workchain, address_hash)) = parse_raw_address(claimed_address) else {
        return Verification::fail();
    };
    if proof.domain_length_bytes as usize != proof.domain_value.len() {
        return Verification::fail();
    }
    if proof.timestamp < 0 || proof.timestamp > now_secs || now_secs - proof.timestamp > max_age_secs
    {
        return Verification::fail();
    }
    if proof.payload != payload {
        return Verification::fail();
    }
    use base64::Engine as _;
    let Ok(sig_raw) = base64::engine::general_purpose::STANDARD.decode(&proof.signature) else {
        return Verification::fail();
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(sig_raw.as_slice()) else {
        return Verification::fail();
    };
    let Ok(key_raw) = hex::decode(&proof.public_key) else {
        return Verification::fail();
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_raw.as_slice()) else {
        return Verification::fail();
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return Verification::fail();
    };
    let digest = proof_digest(workchain, &address_hash, proof, payload);
    let signature = Signature::from_bytes(&sig_bytes);
    if key.verify_strict(&digest, &signature).is_ok() {
        Verification::ok(claimed_address.to_string())
    } else {
        Verification::fail()
    }
}
