//! Development seed data.

use chrono::{DateTime, Duration, Utc};

use booking_core::{EventId, NewEvent, NewReservation, NewUser, UserId};

use crate::registry::{BookingError, RepositoryRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub events: usize,
    pub reservations: usize,
}

/// Populate an empty registry with one admin, two regular users, a few
/// events and reservations. Ids are deterministic on an empty store:
/// user 1 is the admin, users 2 and 3 are regular accounts.
pub fn seed_demo_data(registry: &RepositoryRegistry, now: DateTime<Utc>) -> Result<SeedSummary, BookingError> {
    let accounts = [
        ("Admin", "admin@booking.local", "ADMIN"),
        ("Yasmine", "yasmine@booking.local", "USER"),
        ("Louis", "louis@booking.local", "USER"),
    ];
    let mut users: Vec<UserId> = Vec::with_capacity(accounts.len());
    for (name, email, role) in accounts {
        let user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
        .into_user()?;
        users.push(registry.users().insert(user)?.id);
    }

    let catalogue = [
        ("Gnaoua Night", "Essaouira", 7, 200, 15_000, users[1]),
        ("Jazz au Chellah", "Rabat", 14, 120, 9_000, users[1]),
        ("Tech Meetup", "Casablanca", 2, 40, 0, users[2]),
    ];
    let mut events: Vec<EventId> = Vec::with_capacity(catalogue.len());
    for (title, location, in_days, capacity, price_cents, organizer) in catalogue {
        let event = NewEvent {
            title: title.to_string(),
            description: String::new(),
            location: location.to_string(),
            starts_at: now + Duration::days(in_days),
            capacity,
            price_cents,
        }
        .into_event(organizer)?;
        events.push(registry.events().insert(event)?.id);
    }

    let bookings = [(events[0], users[2], 2), (events[2], users[1], 1)];
    for (event_id, holder, seats) in bookings {
        registry.reserve(NewReservation { event_id, seats }, holder, now)?;
    }

    let summary = SeedSummary {
        users: users.len(),
        events: events.len(),
        reservations: bookings.len(),
    };
    tracing::info!(
        users = summary.users,
        events = summary.events,
        reservations = summary.reservations,
        "seeded demo data"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_an_empty_registry() {
        let registry = RepositoryRegistry::in_memory();
        let summary = seed_demo_data(&registry, Utc::now()).unwrap();

        assert_eq!(summary, SeedSummary { users: 3, events: 3, reservations: 2 });
        let admin = registry.users().get(UserId::new(1)).unwrap().unwrap();
        assert_eq!(admin.role, "ADMIN");
        assert_eq!(registry.seats_taken(EventId::new(1)).unwrap(), 2);
    }
}
