//! Handler → policy registration table.
//!
//! Policies are declared once at startup, keyed by a static handler name, and
//! checked against the set of collections the store actually serves so that a
//! typo in a resource name fails before the server accepts traffic.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ResourcePolicy;

/// Stable name of a guarded handler, e.g. `"events.update"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(&'static str);

impl HandlerId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("handler '{0}' already has a policy")]
    DuplicateHandler(HandlerId),

    #[error("handler '{handler}' references unknown resource '{resource}'")]
    UnknownResource { handler: HandlerId, resource: String },
}

#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<HandlerId, ResourcePolicy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `policy` to `handler`. A handler carries at most one policy.
    pub fn register(&mut self, handler: HandlerId, policy: ResourcePolicy) -> Result<&mut Self, RegistryError> {
        if self.policies.contains_key(&handler) {
            return Err(RegistryError::DuplicateHandler(handler));
        }
        self.policies.insert(handler, policy);
        Ok(self)
    }

    /// Policy for `handler`; `None` means the handler is unguarded.
    pub fn get(&self, handler: HandlerId) -> Option<&ResourcePolicy> {
        self.policies.get(&handler)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HandlerId, &ResourcePolicy)> {
        self.policies.iter().map(|(h, p)| (*h, p))
    }

    /// Fail on the first policy whose resource is not served.
    pub fn validate<F>(&self, is_known_resource: F) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> bool,
    {
        for (handler, policy) in self.iter() {
            if !is_known_resource(policy.resource_name()) {
                return Err(RegistryError::UnknownResource {
                    handler,
                    resource: policy.resource_name().to_string(),
                });
            }
        }
        Ok(())
    }
}
