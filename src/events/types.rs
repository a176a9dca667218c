// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ShowId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a movie is added to (or replaced in) the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub duration_minutes: i64,
}

impl MovieRegistered {
    pub fn new(title: String, duration_minutes: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
            duration_minutes,
        }
    }
}

domain_event!(MovieRegistered);

/// Emitted when a room is added to (or replaced in) the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub name: String,
    pub capacity: u32,
}

impl RoomRegistered {
    pub fn new(name: String, capacity: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            name,
            capacity,
        }
    }
}

domain_event!(RoomRegistered);

// ============================================================================
// SHOW EVENTS
// ============================================================================

/// Emitted when a show has been validated and stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowScheduled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub show_id: ShowId,
    pub movie_title: String,
    pub room_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub price: Decimal,
}

impl ShowScheduled {
    pub fn new(
        show_id: ShowId,
        movie_title: String,
        room_name: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        price: Decimal,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            show_id,
            movie_title,
            room_name,
            start,
            end,
            price,
        }
    }
}

domain_event!(ShowScheduled);

// ============================================================================
// BOOKING EVENTS
// ============================================================================

/// Emitted after every requested seat was committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatsBooked {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub show_id: ShowId,
    pub seats: Vec<u32>,
    pub booked_total: u32,
    pub capacity: u32,
}

impl SeatsBooked {
    pub fn new(show_id: ShowId, seats: Vec<u32>, booked_total: u32, capacity: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            show_id,
            seats,
            booked_total,
            capacity,
        }
    }
}

domain_event!(SeatsBooked);

/// Emitted when a booking request was refused; nothing was committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub show_id: ShowId,
    pub seats: Vec<u32>,
    pub reason: String,
}

impl BookingRejected {
    pub fn new(show_id: ShowId, seats: Vec<u32>, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            show_id,
            seats,
            reason,
        }
    }
}

domain_event!(BookingRejected);

// ============================================================================
// PLANNING EVENTS
// ============================================================================

/// Emitted after a marathon plan was computed for a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarathonPlanned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub candidate_count: usize,
    pub show_ids: Vec<ShowId>,
    pub total_minutes: i64,
    pub total_price: Decimal,
}

impl MarathonPlanned {
    pub fn new(
        date: NaiveDate,
        candidate_count: usize,
        show_ids: Vec<ShowId>,
        total_minutes: i64,
        total_price: Decimal,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            date,
            candidate_count,
            show_ids,
            total_minutes,
            total_price,
        }
    }
}

domain_event!(MarathonPlanned);
