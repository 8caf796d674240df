//! The replay guard: freshness window + single-use nonce consumption.
//!
//! Ordering contract with the dispatcher: freshness is checked **before**
//! signature verification (it is cheap and needs no crypto), but the nonce
//! is consumed only **after** the signature verifies. An attacker must not
//! be able to burn a victim's nonce by replaying an unsigned or badly
//! signed request.

use chrono::{Duration, Utc};
use siggate_types::{Action, ConsumedNonce, GuardConfig, Result, SiggateError};
use tracing::debug;

use crate::store::NonceStore;

/// Freshness window and nonce bookkeeping over a [`NonceStore`].
#[derive(Debug)]
pub struct ReplayGuard<N> {
    store: N,
    config: GuardConfig,
}

impl<N: NonceStore> ReplayGuard<N> {
    #[must_use]
    pub fn new(store: N, config: GuardConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check the request timestamp against the freshness window.
    ///
    /// # Errors
    /// [`SiggateError::SignatureExpired`] when `timestamp_ms` deviates
    /// from `now_ms` by more than the configured skew, in either
    /// direction.
    pub fn check_fresh(&self, timestamp_ms: i64, now_ms: i64) -> Result<()> {
        let skew = (now_ms - timestamp_ms).abs();
        if skew > self.config.max_skew_ms {
            debug!(timestamp_ms, now_ms, skew, "request outside freshness window");
            return Err(SiggateError::SignatureExpired {
                skew_ms: self.config.max_skew_ms,
            });
        }
        Ok(())
    }

    /// Atomically consume the nonce for the verified wallet.
    ///
    /// # Errors
    /// [`SiggateError::NonceReused`] when the nonce has already been
    /// consumed by any wallet; storage errors pass through.
    pub fn consume(&self, nonce: &str, wallet_address: &str, action: Action) -> Result<()> {
        self.store.consume(ConsumedNonce::new(
            nonce.to_string(),
            wallet_address.to_string(),
            action,
        ))
    }

    /// Drop nonces past the retention horizon. Returns how many were
    /// removed; callers run this on a timer.
    pub fn purge_expired(&self) -> Result<usize> {
        let cutoff = Utc::now() - Duration::milliseconds(self.config.nonce_retention_ms);
        let removed = self.store.purge_older_than(cutoff)?;
        if removed > 0 {
            debug!(removed, "purged expired nonces");
        }
        Ok(removed)
    }
}
