//! Infrastructure layer: repositories and the named-collection registry.

pub mod registry;
pub mod seed;
pub mod store;

pub use registry::RepositoryRegistry;
pub use store::{InMemoryRepository, Repository, StoreError};
