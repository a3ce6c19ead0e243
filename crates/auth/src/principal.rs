use serde::{Deserialize, Serialize};
use serde_json::Value;

use booking_core::UserId;

use crate::Role;

/// Identity of an authenticated principal.
///
/// Tokens may carry either a numeric or an opaque string subject. The two
/// forms are never coerced into one another: `Numeric(7)` and
/// `Opaque("7")` are different principals as far as ownership goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrincipalId {
    Numeric(i64),
    Opaque(String),
}

impl PrincipalId {
    /// JSON form used when comparing against a record's owner field.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Numeric(n) => Value::from(*n),
            Self::Opaque(s) => Value::String(s.clone()),
        }
    }

    /// The user account this principal maps to, when the subject is numeric.
    pub fn as_user_id(&self) -> Option<UserId> {
        match self {
            Self::Numeric(n) => Some(UserId::new(*n)),
            Self::Opaque(_) => None,
        }
    }
}

impl From<UserId> for PrincipalId {
    fn from(value: UserId) -> Self {
        Self::Numeric(value.get())
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Numeric(n) => core::fmt::Display::fmt(n, f),
            Self::Opaque(s) => f.write_str(s),
        }
    }
}

/// The authenticated caller, resolved from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>, role: Role) -> Self {
        Self { id: id.into(), role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_forms_deserialize_untagged() {
        let numeric: PrincipalId = serde_json::from_str("12").unwrap();
        let opaque: PrincipalId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(numeric, PrincipalId::Numeric(12));
        assert_eq!(opaque, PrincipalId::Opaque("12".to_string()));
        assert_ne!(numeric.to_json(), opaque.to_json());
    }

    #[test]
    fn only_numeric_subjects_map_to_users() {
        assert_eq!(PrincipalId::Numeric(3).as_user_id(), Some(UserId::new(3)));
        assert_eq!(PrincipalId::Opaque("3".into()).as_user_id(), None);
    }
}
