use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a seat booking was refused
///
/// Always refers to the first offending seat in request order. A rejected
/// booking leaves the show's seat set exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BookingRejection {
    #[error("No seats requested")]
    EmptyRequest,

    #[error("Seat {seat} is invalid. Valid range: 1-{capacity}")]
    SeatOutOfRange { seat: u32, capacity: u32 },

    #[error("Seat {seat} is already booked")]
    SeatAlreadyBooked { seat: u32 },
}

impl BookingRejection {
    /// The seat that caused the rejection, if any
    pub fn seat(&self) -> Option<u32> {
        match self {
            BookingRejection::EmptyRequest => None,
            BookingRejection::SeatOutOfRange { seat, .. } => Some(*seat),
            BookingRejection::SeatAlreadyBooked { seat } => Some(*seat),
        }
    }
}
