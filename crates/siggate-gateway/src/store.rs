//! Order persistence behind a trait, with the mutation path enforcing
//! ownership inside the store so no caller can forget the check.

use std::collections::HashMap;
use std::sync::Mutex;

use siggate_types::{OrderId, OrderRecord, Result, SiggateError};

/// Storage for committed orders.
///
/// Mutations take the **verified** owner address and fail with
/// [`SiggateError::OrderNotOwned`] when the record is missing or owned by
/// someone else; the two cases are indistinguishable to the caller.
pub trait OrderStore: Send + Sync {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord>;

    fn get(&self, id: OrderId) -> Result<Option<OrderRecord>>;

    /// Mutate the order in place, checking ownership first. `apply`
    /// carries the action-specific kind check and status transition.
    fn update(
        &self,
        id: OrderId,
        owner: &str,
        apply: &dyn Fn(&mut OrderRecord) -> Result<()>,
    ) -> Result<OrderRecord>;
}

/// In-process store over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    inner: Mutex<HashMap<OrderId, OrderRecord>>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<OrderId, OrderRecord>>> {
        self.inner.lock().map_err(|_| SiggateError::Storage {
            reason: "order store lock poisoned".to_string(),
        })
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord> {
        let mut map = self.lock()?;
        map.insert(record.id, record.clone());
        Ok(record)
    }

    fn get(&self, id: OrderId) -> Result<Option<OrderRecord>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn update(
        &self,
        id: OrderId,
        owner: &str,
        apply: &dyn Fn(&mut OrderRecord) -> Result<()>,
    ) -> Result<OrderRecord> {
        let mut map = self.lock()?;
        let Some(record) = map.get_mut(&id) else {
            return Err(SiggateError::OrderNotOwned);
        };
        if record.owner != owner {
            return Err(SiggateError::OrderNotOwned);
        }
        apply(record)?;
        Ok(record.clone())
    }
}
