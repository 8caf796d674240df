//! EVM signature verification: EIP-191 personal-sign with public key
//! recovery.
//!
//! The signature is the usual 65-byte `r || s || v` blob, hex encoded. We
//! recover the signer's public key from the prehash and compare the
//! derived address against the claimed one, case-insensitively.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};

use crate::Verification;

/// Keccak-256 digest of the EIP-191 envelope around `message`.
#[must_use]
pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()));
    hasher.update(message);
    hasher.finalize().into()
}

/// Derive the 0x-prefixed lowercase address from a recovered key.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    // Uncompressed SEC1 encoding is 0x04 || X || Y; the address hashes X || Y.
    let digest = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&digest[12..]))
}

/// Recover the signing address from an EIP-191 signature over `message`.
///
/// Returns `None` on any malformed input: bad hex, wrong length,
/// unrecognized recovery id, or an unrecoverable signature.
#[must_use]
pub fn recover_address(message: &str, signature_hex: &str) -> Option<String> {
    let raw = hex::decode(signature_hex.strip_prefix("0x").unwrap_or(signature_hex)).ok()?;
    if raw.len() != 65 {
        return None;
    }
    // Wallets emit v as 27/28; raw recovery ids are 0/1.
    let v = match raw[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(v)?;
    let signature = Signature::from_slice(&raw[..64]).ok()?;
    let prehash = eip191_hash(message.as_bytes());
    let key = VerifyingKey::recover_from_prehash(&prehash, &signature, recovery_id).ok()?;
    Some(address_of(&key))
}

/// Verify an EVM personal-sign signature against a claimed address.
#[must_use]
pub fn verify(message: &str, signature_hex: &str, claimed_address: &str) -> Verification {
    match recover_address(message, signature_hex) {
        Some(recovered) if recovered.eq_ignore_ascii_case(claimed_address) => {
            Verification::ok(recovered)
        }
        _ => Verification::fail(),
    }
}
