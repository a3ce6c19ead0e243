use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role carried by a principal.
///
/// Roles are opaque strings: tokens may carry any value, and only an exact
/// (case-sensitive) match on [`Role::ADMIN`] grants the administrative
/// override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    pub const USER: Role = Role(Cow::Borrowed("USER"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str() == "ADMIN"
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_admin_is_admin() {
        assert!(Role::ADMIN.is_admin());
        assert!(Role::new("ADMIN").is_admin());
        assert!(!Role::new("admin").is_admin());
        assert!(!Role::new("Admin").is_admin());
        assert!(!Role::new(" ADMIN").is_admin());
        assert!(!Role::USER.is_admin());
    }
}
