//! Nonce persistence behind a trait so the gateway can swap the in-memory
//! store for a database-backed one without touching guard logic.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use siggate_types::{ConsumedNonce, Result, SiggateError};

/// Storage for consumed nonces, keyed by the nonce string alone. Once any
/// wallet consumes a nonce, no wallet may use it again.
///
/// `consume` must be atomic: under concurrent calls with the same nonce,
/// exactly one succeeds and the rest observe [`SiggateError::NonceReused`].
pub trait NonceStore: Send + Sync {
    /// Record the nonce, failing if it is already present.
    fn consume(&self, record: ConsumedNonce) -> Result<()>;

    /// Drop records created before `cutoff`; returns how many were removed.
    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

/// In-process store over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryNonceStore {
    inner: Mutex<HashMap<String, ConsumedNonce>>,
}

impl MemoryNonceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, ConsumedNonce>>> {
        self.inner.lock().map_err(|_| SiggateError::Storage {
            reason: "nonce store lock poisoned".to_string(),
        })
    }
}

impl NonceStore for MemoryNonceStore {
    fn consume(&self, record: ConsumedNonce) -> Result<()> {
        let mut map = self.lock()?;
        match map.entry(record.key()) {
            Entry::Occupied(_) => Err(SiggateError::NonceReused {
                nonce: record.nonce,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let mut map = self.lock()?;
        let before = map.len();
        map.retain(|_, record| record.created_at >= cutoff);
        Ok(before - map.len())
    }
}
