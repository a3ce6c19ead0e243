use booking_auth::{Principal, PrincipalId, Role};
use booking_core::UserId;

/// Principal context for a request (authenticated identity + role).
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn id(&self) -> &PrincipalId {
        &self.principal.id
    }

    pub fn role(&self) -> &Role {
        &self.principal.role
    }

    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }

    /// Backing user account, for numeric subjects.
    pub fn user_id(&self) -> Option<UserId> {
        self.principal.id.as_user_id()
    }
}
