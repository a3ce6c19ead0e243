//! `booking-core` — domain foundation for the booking backend.
//!
//! This crate contains **pure domain** types (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod reservation;
pub mod user;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::{Event, EventChanges, NewEvent};
pub use id::{EventId, LookupId, ReservationId, UserId};
pub use reservation::{NewReservation, Reservation};
pub use user::{NewUser, User, UserChanges};
