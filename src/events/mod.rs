// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: Subscriber is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Booking
    BookingRejected,
    // Planning
    MarathonPlanned,
    // Catalog
    MovieRegistered,
    RoomRegistered,
    SeatsBooked,
    // Shows
    ShowScheduled,
};

pub use bus::{EmittedEvent, EventBus};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
