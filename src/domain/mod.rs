// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod show;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog Domain (movies and rooms)
pub use catalog::{validate_movie, validate_room, Movie, Room};

// Show Domain
pub use show::{validate_price, validate_show, BookingRejection, Show, ShowId, ShowSummary};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Construction-time input was rejected (empty title, negative price, ...)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An already-constructed entity no longer satisfies its invariants
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
