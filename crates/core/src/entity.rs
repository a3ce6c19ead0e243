//! Entity trait: identity + continuity across state changes.

use serde::Serialize;

/// Entity stored in a named collection.
///
/// Identifiers are integers assigned by the owning repository on insert.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + From<i64> + Into<i64> + Send + Sync;

    /// Collection name used by access policies and the repository registry.
    const COLLECTION: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Overwrite the identifier (repository-assigned).
    fn set_id(&mut self, id: Self::Id);
}
