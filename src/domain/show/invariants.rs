use rust_decimal::Decimal;

use super::entity::Show;
use crate::domain::{DomainError, DomainResult};

/// Validates all Show invariants
pub fn validate_show(show: &Show) -> DomainResult<()> {
    validate_price(show.price())?;
    validate_end(show)?;
    validate_booked_seats(show)?;
    Ok(())
}

/// Price cannot be negative (free screenings are allowed)
pub fn validate_price(price: Decimal) -> DomainResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::validation(format!(
            "Price cannot be negative, got {}",
            price
        )));
    }
    Ok(())
}

fn validate_end(show: &Show) -> DomainResult<()> {
    if show.end() - show.start() != show.movie().duration() {
        return Err(DomainError::InvariantViolation(format!(
            "Show {} end {} does not match start plus duration",
            show.id(),
            show.end()
        )));
    }
    Ok(())
}

/// Every booked seat lies in 1..=capacity
fn validate_booked_seats(show: &Show) -> DomainResult<()> {
    let room = show.room();
    if let Some(seat) = show
        .booked_seats()
        .into_iter()
        .find(|seat| !room.contains_seat(*seat))
    {
        return Err(DomainError::InvariantViolation(format!(
            "Show {} has seat {} booked outside 1-{}",
            show.id(),
            seat,
            room.capacity()
        )));
    }
    Ok(())
}

/// Critical Show Invariants:
///
/// 1. end == start + movie.duration for the whole lifetime of the show
/// 2. Every booked seat lies in 1..=room.capacity
/// 3. Booked seats form a set and only grow (no unbooking)
/// 4. Ids are unique per store; contiguity is not guaranteed
/// 5. A rejected booking leaves the seat set untouched
