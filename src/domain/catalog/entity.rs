use chrono::Duration;

use super::invariants::{validate_movie, validate_room};
use crate::domain::DomainResult;

/// A film that can be screened
/// Immutable once constructed; shared by every Show that screens it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    title: String,
    duration: Duration,
}

/// A screening room
/// Capacity bounds the seat numbers of every Show held in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    capacity: u32,
}

impl Movie {
    /// Create a new Movie
    /// Fails with `DomainError::Validation` on an empty title or a non-positive duration
    pub fn new(title: impl Into<String>, duration: Duration) -> DomainResult<Self> {
        let movie = Self {
            title: title.into(),
            duration,
        };
        validate_movie(&movie)?;
        Ok(movie)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Running time in whole minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }
}

impl Room {
    /// Create a new Room
    /// Fails with `DomainError::Validation` on an empty name or zero capacity
    pub fn new(name: impl Into<String>, capacity: u32) -> DomainResult<Self> {
        let room = Self {
            name: name.into(),
            capacity,
        };
        validate_room(&room)?;
        Ok(room)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether `seat` is a valid seat number in this room (1-based)
    pub fn contains_seat(&self, seat: u32) -> bool {
        (1..=self.capacity).contains(&seat)
    }
}

/// Formats a duration as `HH:MM`
pub(crate) fn format_hh_mm(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Duration: {})", self.title, format_hh_mm(self.duration))
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Capacity: {})", self.name, self.capacity)
    }
}
