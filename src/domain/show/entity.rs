use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::booking::BookingRejection;
use super::invariants::validate_price;
use crate::domain::{DomainError, DomainResult, Movie, Room};

/// Identifier of a Show
/// Handed out by the show store, never by the entity itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(u64);

impl ShowId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ShowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single screening of a Movie in a Room
///
/// Everything but the booked-seat set is fixed at construction. The end time
/// is always derived from `start + movie.duration` and never stored.
///
/// Seat booking goes through a per-show lock, so a `Show` is shared as
/// `Arc<Show>` between the store, the planner and concurrent bookers.
#[derive(Debug)]
pub struct Show {
    id: ShowId,
    movie: Arc<Movie>,
    room: Arc<Room>,
    start: NaiveDateTime,
    price: Decimal,
    booked_seats: Mutex<BTreeSet<u32>>,
}

/// Serializable point-in-time view of a Show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: ShowId,
    pub movie_title: String,
    pub room_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub price: Decimal,
    pub capacity: u32,
    pub booked_seats: Vec<u32>,
}

impl Show {
    /// Create a new Show with no booked seats
    ///
    /// `id` MUST come from the owning store (see `ShowStore::next_id`).
    /// Fails on a negative price, or when the end time is not representable.
    pub fn new(
        id: ShowId,
        movie: Arc<Movie>,
        room: Arc<Room>,
        start: NaiveDateTime,
        price: Decimal,
    ) -> DomainResult<Self> {
        validate_price(price)?;

        if start.checked_add_signed(movie.duration()).is_none() {
            return Err(DomainError::validation(format!(
                "Show starting at {} ends outside the supported time range",
                start
            )));
        }

        Ok(Self {
            id,
            movie,
            room,
            start,
            price,
            booked_seats: Mutex::new(BTreeSet::new()),
        })
    }

    pub fn id(&self) -> ShowId {
        self.id
    }

    pub fn movie(&self) -> &Arc<Movie> {
        &self.movie
    }

    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// `start + movie.duration`; checked once in `new`
    pub fn end(&self) -> NaiveDateTime {
        self.start + self.movie.duration()
    }

    /// Calendar date the show starts on
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Book every seat in `seats`, or none of them
    ///
    /// All seats are checked against the state before the call: each must be
    /// within `1..=capacity` and not yet booked. Repeating a seat inside one
    /// request is tolerated. The lock is held across check and commit, so
    /// concurrent requests for the same seat cannot both succeed.
    pub fn book(&self, seats: &[u32]) -> Result<(), BookingRejection> {
        if seats.is_empty() {
            return Err(BookingRejection::EmptyRequest);
        }

        let capacity = self.room.capacity();
        let mut booked = self.booked_seats.lock();

        for &seat in seats {
            if !self.room.contains_seat(seat) {
                return Err(BookingRejection::SeatOutOfRange { seat, capacity });
            }
            if booked.contains(&seat) {
                return Err(BookingRejection::SeatAlreadyBooked { seat });
            }
        }

        booked.extend(seats.iter().copied());
        Ok(())
    }

    /// Boolean form of [`Show::book`]
    pub fn try_book(&self, seats: &[u32]) -> bool {
        self.book(seats).is_ok()
    }

    /// Snapshot of the booked seats in ascending order
    pub fn booked_seats(&self) -> BTreeSet<u32> {
        self.booked_seats.lock().clone()
    }

    pub fn booked_count(&self) -> u32 {
        self.booked_seats.lock().len() as u32
    }

    pub fn available_seats(&self) -> u32 {
        self.room.capacity() - self.booked_count()
    }

    pub fn is_sold_out(&self) -> bool {
        self.available_seats() == 0
    }

    pub fn is_booked(&self, seat: u32) -> bool {
        self.booked_seats.lock().contains(&seat)
    }

    /// Whether the two shows share any instant; touching end/start is not overlap
    pub fn overlaps(&self, other: &Show) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    pub fn summary(&self) -> ShowSummary {
        ShowSummary {
            id: self.id,
            movie_title: self.movie.title().to_string(),
            room_name: self.room.name().to_string(),
            start: self.start,
            end: self.end(),
            duration_minutes: self.movie.duration_minutes(),
            price: self.price,
            capacity: self.room.capacity(),
            booked_seats: self.booked_seats().into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Show {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} | {} | {} | ${:.2} | Seats: {}/{}",
            self.id,
            self.movie.title(),
            self.room.name(),
            self.start.format("%Y-%m-%d %H:%M"),
            self.price,
            self.booked_count(),
            self.room.capacity()
        )
    }
}
