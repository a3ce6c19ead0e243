use thiserror::Error;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: requires role '{0}'")]
    Forbidden(String),
}

/// Require an exact role on the principal.
///
/// - No IO
/// - No panics
pub fn require_role(principal: &Principal, required: &Role) -> Result<(), AuthzError> {
    if &principal.role == required {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
