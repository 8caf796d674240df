//! Canonical message construction and per-chain signature verification.
//!
//! This crate owns the two cryptographic halves of the gateway:
//!
//! - [`canonical::canonical_message`] rebuilds the exact text a wallet was
//!   asked to sign from validated payload fields, and
//! - [`verify_signature`] checks a chain-specific signature over that text
//!   and yields the verified signer identity.
//!
//! Verification is total: every malformed input is a plain `valid = false`
//! outcome, never an error or a panic, so the caller cannot accidentally
//! map a crypto failure to anything but 401.

pub mod canonical;
pub mod evm;
pub mod solana;
pub mod sui;
pub mod ton;
pub mod tron;

pub use canonical::canonical_message;
use siggate_types::{ChainKind, TonProof};

/// Outcome of signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    /// Verified signer identity, in the chain's canonical address form.
    /// `Some` exactly when `valid`.
    pub recovered_address: Option<String>,
}

impl Verification {
    #[must_use]
    pub fn ok(recovered_address: String) -> Self {
        Self {
            valid: true,
            recovered_address: Some(recovered_address),
        }
    }

    #[must_use]
    pub fn fail() -> Self {
        Self {
            valid: false,
            recovered_address: None,
        }
    }
}

/// Extra inputs TON verification needs beyond the shared ones.
#[derive(Debug, Clone, Copy)]
pub struct TonContext<'a> {
    pub proof: &'a TonProof,
    pub max_age_secs: i64,
    /// Server clock, Unix seconds.
    pub now_secs: i64,
}

/// Verify `signature` over `message` for the given chain.
///
/// `signature` is ignored for TON, where the proof carries its own; a TON
/// request without a proof fails closed.
#[must_use]
pub fn verify_signature(
    chain: ChainKind,
    message: &str,
    signature: &str,
    claimed_address: &str,
    ton: Option<TonContext<'_>>,
) -> Verification {
    match chain {
        ChainKind::Evm => evm::verify(message, signature, claimed_address),
        ChainKind::Solana => solana::verify(message, signature, claimed_address),
        ChainKind::Tron => tron::verify(message, signature, claimed_address),
        ChainKind::Sui => sui::verify(message, signature, claimed_address),
        ChainKind::Ton => match ton {
            Some(ctx) => ton::verify(
                message,
                ctx.proof,
                claimed_address,
                ctx.max_age_secs,
                ctx.now_secs,
            ),
            None => Verification::fail(),
        },
    }
}
