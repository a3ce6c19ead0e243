//! User accounts.

use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, UserId};

/// A registered account.
///
/// `role` is kept as the raw string carried in tokens; only the exact value
/// `ADMIN` is privileged anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Entity for User {
    type Id = UserId;

    const COLLECTION: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "USER".to_string()
}

impl NewUser {
    pub fn into_user(self) -> DomainResult<User> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        Ok(User {
            id: UserId::new(0),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            role: self.role,
        })
    }
}

/// Partial update of a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserChanges {
    pub fn changes_role(&self) -> bool {
        self.role.is_some()
    }

    pub fn apply_to(self, user: &mut User) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(DomainError::validation("invalid email"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        NewUser {
            name: "Alice".to_string(),
            email: "Alice@Example.com".to_string(),
            role: default_role(),
        }
        .into_user()
        .unwrap()
    }

    #[test]
    fn new_user_is_normalized() {
        let user = alice();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, "USER");
    }

    #[test]
    fn invalid_email_is_rejected() {
        let result = NewUser {
            name: "Bob".to_string(),
            email: "bob-at-example".to_string(),
            role: default_role(),
        }
        .into_user();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn failed_update_leaves_user_untouched() {
        let mut user = alice();
        let changes = UserChanges {
            name: Some("Alicia".to_string()),
            email: Some("nope".to_string()),
            role: None,
        };
        assert!(changes.apply_to(&mut user).is_err());
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn owner_field_serializes_as_id() {
        let mut user = alice();
        user.set_id(UserId::new(9));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], serde_json::json!(9));
    }
}
