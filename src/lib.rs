// src/lib.rs
// Cinema Scheduler - show scheduling, seat booking and marathon planning
//
// Architecture:
// - Domain-centric: invariants live on Movie, Room and Show
// - Repositories are swappable traits (in-memory implementations provided)
// - Event-driven: the service publishes every state change on the event bus
// - Explicit: typed results, no hidden global state

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_movie,
    validate_price,
    validate_room,
    validate_show,
    BookingRejection,
    DomainError,
    DomainResult,
    // Catalog
    Movie,
    Room,
    // Show
    Show,
    ShowId,
    ShowSummary,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::CinemaConfig;

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BookingRejected,
    DomainEvent,
    EmittedEvent,
    EventBus,
    MarathonPlanned,
    MovieRegistered,
    RoomRegistered,
    SeatsBooked,
    ShowScheduled,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{CatalogRepository, InMemoryCatalogRepository, InMemoryShowStore, ShowStore};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    BookSeatsRequest,
    CinemaService,
    CreateShowRequest,
    GreedyMarathonPlanner,
    MarathonPlan,
    MarathonPlanner,
    MarathonRules,
    MAX_BREAK_MINUTES,
};
