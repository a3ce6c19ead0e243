//! Resource ownership check.
//!
//! Decides, per request, whether a principal may act on one specific record:
//! administrators always may, everyone else only on records whose owner field
//! equals their id.

use std::borrow::Cow;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use booking_core::LookupId;

use crate::Principal;

/// Owner field used when a policy does not name one.
pub const DEFAULT_USER_ID_FIELD: &str = "userId";

/// Ownership rule attached to one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePolicy {
    resource_name: Cow<'static, str>,
    user_id_field: Cow<'static, str>,
}

impl ResourcePolicy {
    /// Policy on `resource_name`, owned through the default `userId` field.
    pub fn new(resource_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            resource_name: resource_name.into(),
            user_id_field: Cow::Borrowed(DEFAULT_USER_ID_FIELD),
        }
    }

    /// Use a different owner field (e.g. `id` for the user collection itself).
    pub fn owned_by(mut self, user_id_field: impl Into<Cow<'static, str>>) -> Self {
        self.user_id_field = user_id_field.into();
        self
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn user_id_field(&self) -> &str {
        &self.user_id_field
    }
}

/// A fetched record, viewed as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Serialize an entity into its record form. Non-object values yield an
    /// empty record, which owns nothing.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Ok(Self::default()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Strict ownership test: the field must exist and be JSON-equal to the
    /// principal id. `7` and `"7"` are different values.
    pub fn is_owned_by(&self, field: &str, principal: &Principal) -> bool {
        self.field(field) == Some(&principal.id.to_json())
    }
}

/// Read-only access to named collections.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find a record by collection name and id. `Ok(None)` when absent.
    async fn find(&self, collection: &str, id: LookupId) -> Result<Option<ResourceRecord>, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Record missing, or owned by someone else.
    AccessDenied,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AccessDenied => "Access denied",
        }
    }
}

impl core::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AccessDenied => f.write_str("access denied"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Evaluate the ownership rule for one request.
///
/// - No policy: allow.
/// - `ADMIN` principal: allow without touching the store.
/// - Otherwise: exactly one `find`, allow iff the record exists and its owner
///   field strictly equals the principal id.
///
/// Lookup failures are returned as `Err` untouched; they are never turned
/// into a denial.
pub async fn evaluate<L>(
    policy: Option<&ResourcePolicy>,
    principal: &Principal,
    requested: LookupId,
    lookup: &L,
) -> Result<AccessDecision, L::Error>
where
    L: ResourceLookup + ?Sized,
{
    let Some(policy) = policy else {
        return Ok(AccessDecision::Allow);
    };

    if principal.is_admin() {
        return Ok(AccessDecision::Allow);
    }

    let record = lookup.find(policy.resource_name(), requested).await?;

    match record {
        Some(record) if record.is_owned_by(policy.user_id_field(), principal) => Ok(AccessDecision::Allow),
        _ => Ok(AccessDecision::Deny(DenyReason::AccessDenied)),
    }
}
