use std::collections::BTreeMap;
use std::sync::RwLock;

use booking_core::Entity;

use super::{Repository, StoreError};

/// In-memory repository for tests/dev.
///
/// Ids come from a per-repository sequence starting at 1 and are never
/// reused after deletion.
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    inner: RwLock<Table<T>>,
}

#[derive(Debug)]
struct Table<T: Entity> {
    next_id: i64,
    rows: BTreeMap<T::Id, T>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(collection: &str) -> StoreError {
    StoreError::Unavailable(format!("{collection} table lock poisoned"))
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned(T::COLLECTION))?;
        Ok(table.rows.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned(T::COLLECTION))?;
        Ok(table.rows.values().cloned().collect())
    }

    fn insert(&self, mut value: T) -> Result<T, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned(T::COLLECTION))?;
        let id = <T::Id as From<i64>>::from(table.next_id);
        table.next_id += 1;
        value.set_id(id);
        table.rows.insert(id, value.clone());
        Ok(value)
    }

    fn replace(&self, value: T) -> Result<bool, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned(T::COLLECTION))?;
        match table.rows.get_mut(&value.id()) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned(T::COLLECTION))?;
        Ok(table.rows.remove(&id))
    }
}
