//! Bookable events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, EventId, UserId};

/// An event that users can reserve seats for.
///
/// `user_id` is the organizer who created it (serialized as `userId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub capacity: u32,
    pub price_cents: i64,
    pub user_id: UserId,
}

impl Entity for Event {
    type Id = EventId;

    const COLLECTION: &'static str = "event";

    fn id(&self) -> EventId {
        self.id
    }

    fn set_id(&mut self, id: EventId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub capacity: u32,
    #[serde(default)]
    pub price_cents: i64,
}

impl NewEvent {
    /// Build an event organized by `owner`.
    pub fn into_event(self, owner: UserId) -> DomainResult<Event> {
        validate_title(&self.title)?;
        validate_capacity(self.capacity)?;
        validate_price(self.price_cents)?;
        Ok(Event {
            id: EventId::new(0),
            title: self.title.trim().to_string(),
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            capacity: self.capacity,
            price_cents: self.price_cents,
            user_id: owner,
        })
    }
}

/// Partial update of an event. The organizer cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub price_cents: Option<i64>,
}

impl EventChanges {
    pub fn apply_to(self, event: &mut Event) -> DomainResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        if let Some(price) = self.price_cents {
            validate_price(price)?;
        }

        if let Some(title) = self.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(starts_at) = self.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(price) = self.price_cents {
            event.price_cents = price;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title must not be empty"));
    }
    Ok(())
}

fn validate_capacity(capacity: u32) -> DomainResult<()> {
    if capacity == 0 {
        return Err(DomainError::validation("capacity must be positive"));
    }
    Ok(())
}

fn validate_price(price_cents: i64) -> DomainResult<()> {
    if price_cents < 0 {
        return Err(DomainError::validation("price must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concert() -> NewEvent {
        NewEvent {
            title: "  Concert ".to_string(),
            description: String::new(),
            location: "Rabat".to_string(),
            starts_at: Utc::now(),
            capacity: 100,
            price_cents: 2500,
        }
    }

    #[test]
    fn new_event_records_organizer() {
        let event = concert().into_event(UserId::new(3)).unwrap();
        assert_eq!(event.user_id, UserId::new(3));
        assert_eq!(event.title, "Concert");
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut new = concert();
        new.capacity = 0;
        assert!(new.into_event(UserId::new(1)).is_err());
    }

    #[test]
    fn owner_field_is_camel_cased() {
        let event = concert().into_event(UserId::new(3)).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["userId"], serde_json::json!(3));
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn changes_are_all_or_nothing() {
        let mut event = concert().into_event(UserId::new(3)).unwrap();
        let changes = EventChanges {
            title: Some("Gala".to_string()),
            price_cents: Some(-1),
            ..Default::default()
        };
        assert!(changes.apply_to(&mut event).is_err());
        assert_eq!(event.title, "Concert");
    }
}
