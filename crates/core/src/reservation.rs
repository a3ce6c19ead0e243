//! Seat reservations for events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, EventId, ReservationId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub seats: u32,
    pub created_at: DateTime<Utc>,
}

impl Entity for Reservation {
    type Id = ReservationId;

    const COLLECTION: &'static str = "reservation";

    fn id(&self) -> ReservationId {
        self.id
    }

    fn set_id(&mut self, id: ReservationId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub event_id: EventId,
    #[serde(default = "one_seat")]
    pub seats: u32,
}

fn one_seat() -> u32 {
    1
}

impl NewReservation {
    /// Build a reservation for `holder`, given the seats already taken on the
    /// event and its capacity.
    pub fn into_reservation(
        self,
        holder: UserId,
        capacity: u32,
        seats_taken: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        if self.seats == 0 {
            return Err(DomainError::validation("seats must be positive"));
        }
        let remaining = capacity.saturating_sub(seats_taken);
        if self.seats > remaining {
            return Err(DomainError::conflict(format!(
                "only {remaining} seat(s) left for event {}",
                self.event_id
            )));
        }
        Ok(Reservation {
            id: ReservationId::new(0),
            event_id: self.event_id,
            user_id: holder,
            seats: self.seats,
            created_at: now,
        })
    }
}
