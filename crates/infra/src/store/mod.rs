//! Entity repositories.

pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use booking_core::Entity;

pub use in_memory::InMemoryRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("record encoding failed: {0}")]
    Encoding(String),
}

/// Keyed storage for one entity type.
///
/// Identifiers are assigned by the repository on insert; the id carried by
/// the inserted value is ignored.
pub trait Repository<T: Entity>: Send + Sync {
    fn get(&self, id: T::Id) -> Result<Option<T>, StoreError>;
    fn list(&self) -> Result<Vec<T>, StoreError>;
    fn insert(&self, value: T) -> Result<T, StoreError>;
    /// Replace the stored value with the same id. `false` when absent.
    fn replace(&self, value: T) -> Result<bool, StoreError>;
    fn delete(&self, id: T::Id) -> Result<Option<T>, StoreError>;
}

impl<T, S> Repository<T> for Arc<S>
where
    T: Entity,
    S: Repository<T> + ?Sized,
{
    fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        (**self).list()
    }

    fn insert(&self, value: T) -> Result<T, StoreError> {
        (**self).insert(value)
    }

    fn replace(&self, value: T) -> Result<bool, StoreError> {
        (**self).replace(value)
    }

    fn delete(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        (**self).delete(id)
    }
}
