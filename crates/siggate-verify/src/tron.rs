//! Tron signature verification.
//!
//! Tron wallets sign exactly like EVM wallets (EIP-191 envelope, secp256k1
//! recovery); only the address encoding differs. A Tron base58-check
//! address decodes to 21 bytes: a `0x41` version byte followed by the
//! 20-byte EVM-style address. We recover the EVM address from the
//! signature and compare it to the decoded claimed address, then report
//! the claimed base58 form as the owner identity on success.

use crate::{Verification, evm};

/// Tron address version byte.
const TRON_PREFIX: u8 = 0x41;

/// Decode a base58-check Tron address to its 20-byte EVM-style core.
#[must_use]
pub fn decode_address(address: &str) -> Option<[u8; 20]> {
    let raw = bs58::decode(address).with_check(None).into_vec().ok()?;
    if raw.len() != 21 || raw[0] != TRON_PREFIX {
        return None;
    }
    raw[1..].try_into().ok()
}

/// Verify a Tron wallet signature against a base58-check address.
#[must_use]
pub fn verify(message: &str, signature_hex: &str, claimed_address: &str) -> Verification {
    let Some(claimed_core) = decode_address(claimed_address) else {
        return Verification::fail();
    };
    let Some(recovered) = evm::recover_address(message, signature_hex) else {
        return Verification::fail();
    };
    // recover_address yields "0x" + 40 lowercase hex chars.
    if recovered[2..].eq_ignore_ascii_case(&hex::encode(claimed_core)) {
        Verification::ok(claimed_address.to_string())
    } else {
        Verification::fail()
    }
}
