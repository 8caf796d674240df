//! Consumed-nonce record kept by the replay guard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Action;

/// A nonce that has been consumed by a verified request.
///
/// The nonce string alone is the unique key: once any wallet consumes a
/// nonce, no wallet may use it again. The wallet and action are recorded
/// for audit, not for scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedNonce {
    pub nonce: String,
    /// Wallet the nonce was consumed for, as recovered from the signature.
    pub wallet_address: String,
    /// Action the request performed, kept for audit.
    pub action: Action,
    pub created_at: DateTime<Utc>,
}

impl ConsumedNonce {
    #[must_use]
    pub fn new(nonce: String, wallet_address: String, action: Action) -> Self {
        Self {
            nonce,
            wallet_address,
            action,
            created_at: Utc::now(),
        }
    }

    /// Key under which the guard stores this record.
    #[must_use]
    pub fn key(&self) -> String {
        self.nonce.clone()
    }
}
