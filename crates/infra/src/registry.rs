//! Named collections behind one registry.
//!
//! Access policies name collections by string; this registry is the only
//! place those names are resolved to typed repositories.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use booking_auth::{ResourceLookup, ResourceRecord};
use booking_core::{
    DomainError, Entity, Event, EventChanges, EventId, LookupId, NewReservation, Reservation, User, UserId,
};

use crate::store::{InMemoryRepository, Repository, StoreError};

/// Collections served by the registry, by policy name.
pub const COLLECTIONS: [&str; 3] = [User::COLLECTION, Event::COLLECTION, Reservation::COLLECTION];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct RepositoryRegistry {
    users: Arc<dyn Repository<User>>,
    events: Arc<dyn Repository<Event>>,
    reservations: Arc<dyn Repository<Reservation>>,
    // Serializes capacity checks with the inserts/deletes they depend on.
    booking: Mutex<()>,
}

impl RepositoryRegistry {
    pub fn new(
        users: Arc<dyn Repository<User>>,
        events: Arc<dyn Repository<Event>>,
        reservations: Arc<dyn Repository<Reservation>>,
    ) -> Self {
        Self {
            users,
            events,
            reservations,
            booking: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Event>::new()),
            Arc::new(InMemoryRepository::<Reservation>::new()),
        )
    }

    /// Whether `name` resolves to a collection.
    pub fn serves(name: &str) -> bool {
        COLLECTIONS.contains(&name)
    }

    pub fn users(&self) -> &dyn Repository<User> {
        self.users.as_ref()
    }

    pub fn events(&self) -> &dyn Repository<Event> {
        self.events.as_ref()
    }

    pub fn reservations(&self) -> &dyn Repository<Reservation> {
        self.reservations.as_ref()
    }

    /// Seats already reserved on `event_id`.
    pub fn seats_taken(&self, event_id: EventId) -> Result<u32, StoreError> {
        Ok(self
            .reservations
            .list()?
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| r.seats)
            .sum())
    }

    /// Book seats on an event for `holder`, enforcing remaining capacity.
    pub fn reserve(
        &self,
        request: NewReservation,
        holder: UserId,
        now: DateTime<Utc>,
    ) -> Result<Reservation, BookingError> {
        let _guard = self
            .booking
            .lock()
            .map_err(|_| StoreError::Unavailable("booking lock poisoned".to_string()))?;

        let event = self.events.get(request.event_id)?.ok_or(DomainError::NotFound)?;
        let taken = self.seats_taken(event.id)?;
        let reservation = request.into_reservation(holder, event.capacity, taken, now)?;
        Ok(self.reservations.insert(reservation)?)
    }

    /// Apply `changes` to an event. Capacity may not drop below the seats
    /// already reserved.
    pub fn update_event(&self, id: EventId, changes: EventChanges) -> Result<Option<Event>, BookingError> {
        let _guard = self
            .booking
            .lock()
            .map_err(|_| StoreError::Unavailable("booking lock poisoned".to_string()))?;

        let Some(mut event) = self.events.get(id)? else {
            return Ok(None);
        };
        changes.apply_to(&mut event)?;
        let taken = self.seats_taken(id)?;
        if event.capacity < taken {
            return Err(DomainError::conflict(format!(
                "capacity {} is below the {taken} seats already reserved",
                event.capacity
            ))
            .into());
        }
        if !self.events.replace(event.clone())? {
            return Ok(None);
        }
        Ok(Some(event))
    }

    /// Delete an event together with its reservations.
    pub fn delete_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let _guard = self
            .booking
            .lock()
            .map_err(|_| StoreError::Unavailable("booking lock poisoned".to_string()))?;

        let Some(event) = self.events.delete(id)? else {
            return Ok(None);
        };
        let orphaned = self
            .reservations
            .list()?
            .into_iter()
            .filter(|r| r.event_id == id);
        let mut removed = 0usize;
        for reservation in orphaned {
            self.reservations.delete(reservation.id)?;
            removed += 1;
        }
        tracing::debug!(event_id = %id, reservations = removed, "event deleted");
        Ok(Some(event))
    }

    /// Delete a user together with the reservations they hold.
    ///
    /// Events the user organizes are kept.
    pub fn delete_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let _guard = self
            .booking
            .lock()
            .map_err(|_| StoreError::Unavailable("booking lock poisoned".to_string()))?;

        let Some(user) = self.users.delete(id)? else {
            return Ok(None);
        };
        for reservation in self.reservations.list()?.into_iter().filter(|r| r.user_id == id) {
            self.reservations.delete(reservation.id)?;
        }
        Ok(Some(user))
    }
}

fn find_in<T: Entity>(repo: &dyn Repository<T>, id: LookupId) -> Result<Option<ResourceRecord>, StoreError> {
    let Some(raw) = id.as_i64() else {
        return Ok(None);
    };
    repo.get(<T::Id as From<i64>>::from(raw))?
        .map(|value| ResourceRecord::from_serialize(&value).map_err(|e| StoreError::Encoding(e.to_string())))
        .transpose()
}

#[async_trait]
impl ResourceLookup for RepositoryRegistry {
    type Error = StoreError;

    async fn find(&self, collection: &str, id: LookupId) -> Result<Option<ResourceRecord>, StoreError> {
        match collection {
            name if name == User::COLLECTION => find_in(self.users(), id),
            name if name == Event::COLLECTION => find_in(self.events(), id),
            name if name == Reservation::COLLECTION => find_in(self.reservations(), id),
            other => Err(StoreError::UnknownCollection(other.to_string())),
        }
    }
}
