use chrono::Duration;

use super::entity::{Movie, Room};
use crate::domain::{DomainError, DomainResult};

/// Validates all Movie invariants
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_non_empty("Movie title", movie.title())?;
    validate_duration(movie.duration())?;
    Ok(())
}

/// Validates all Room invariants
pub fn validate_room(room: &Room) -> DomainResult<()> {
    validate_non_empty("Room name", room.name())?;
    if room.capacity() == 0 {
        return Err(DomainError::validation("Capacity must be greater than zero"));
    }
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn validate_duration(duration: Duration) -> DomainResult<()> {
    if duration <= Duration::zero() {
        return Err(DomainError::validation(format!(
            "Duration must be greater than zero, got {}s",
            duration.num_seconds()
        )));
    }
    Ok(())
}

/// Catalog Invariants:
///
/// 1. Movie title and Room name are never blank
/// 2. Movie duration is strictly positive
/// 3. Room capacity is at least one seat
/// 4. Both are immutable after construction
