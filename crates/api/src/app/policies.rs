//! Ownership policies for every guarded handler.
//!
//! Handlers on `/:id` routes carry the guard layer with one of these ids;
//! an id without an entry here is unguarded.

use booking_auth::{HandlerId, PolicyRegistry, RegistryError, ResourcePolicy};
use booking_infra::RepositoryRegistry;

pub const USERS_GET: HandlerId = HandlerId::new("users.get");
pub const USERS_UPDATE: HandlerId = HandlerId::new("users.update");
pub const USERS_DELETE: HandlerId = HandlerId::new("users.delete");

pub const EVENTS_GET: HandlerId = HandlerId::new("events.get");
pub const EVENTS_UPDATE: HandlerId = HandlerId::new("events.update");
pub const EVENTS_DELETE: HandlerId = HandlerId::new("events.delete");

pub const RESERVATIONS_GET: HandlerId = HandlerId::new("reservations.get");
pub const RESERVATIONS_DELETE: HandlerId = HandlerId::new("reservations.delete");

/// Build the policy table and check it against the served collections.
pub fn policy_table() -> Result<PolicyRegistry, RegistryError> {
    let mut policies = PolicyRegistry::new();
    policies
        .register(USERS_GET, ResourcePolicy::new("user").owned_by("id"))?
        .register(USERS_UPDATE, ResourcePolicy::new("user").owned_by("id"))?
        .register(USERS_DELETE, ResourcePolicy::new("user").owned_by("id"))?
        .register(EVENTS_UPDATE, ResourcePolicy::new("event"))?
        .register(EVENTS_DELETE, ResourcePolicy::new("event"))?
        .register(RESERVATIONS_GET, ResourcePolicy::new("reservation"))?
        .register(RESERVATIONS_DELETE, ResourcePolicy::new("reservation"))?;

    policies.validate(RepositoryRegistry::serves)?;
    Ok(policies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_valid() {
        let policies = policy_table().unwrap();
        assert_eq!(policies.len(), 7);
    }

    #[test]
    fn event_reads_are_public_to_authenticated_users() {
        let policies = policy_table().unwrap();
        assert!(policies.get(EVENTS_GET).is_none());
    }

    #[test]
    fn user_records_are_owned_through_their_id() {
        let policies = policy_table().unwrap();
        for handler in [USERS_GET, USERS_UPDATE, USERS_DELETE] {
            let policy = policies.get(handler).unwrap();
            assert_eq!(policy.resource_name(), "user");
            assert_eq!(policy.user_id_field(), "id");
        }
    }

    #[test]
    fn every_policy_names_a_served_collection() {
        let policies = policy_table().unwrap();
        assert!(policies.iter().all(|(_, p)| RepositoryRegistry::serves(p.resource_name())));
    }
}
