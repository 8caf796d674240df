//! Runtime configuration for the replay guard and freshness checks.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_SKEW_MS, DEFAULT_MIN_NONCE_LEN, DEFAULT_NONCE_RETENTION_MS,
    DEFAULT_TON_PROOF_MAX_AGE_SECS,
};

/// Tunables governing replay protection and timestamp freshness.
///
/// All fields have production defaults; embedders override individual
/// fields via struct update syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Accepted deviation between request timestamp and server time, ms.
    pub max_skew_ms: i64,
    /// How long consumed nonces are retained before purge, ms.
    pub nonce_retention_ms: i64,
    /// Maximum age of a TON proof timestamp, seconds.
    pub ton_proof_max_age_secs: i64,
    /// Minimum nonce length, characters.
    pub min_nonce_len: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_skew_ms: DEFAULT_MAX_SKEW_MS,
            nonce_retention_ms: DEFAULT_NONCE_RETENTION_MS,
            ton_proof_max_age_secs: DEFAULT_TON_PROOF_MAX_AGE_SECS,
            min_nonce_len: DEFAULT_MIN_NONCE_LEN,
        }
    }
}
