pub mod booking;
pub mod entity;
pub mod invariants;

pub use booking::BookingRejection;
pub use entity::{Show, ShowId, ShowSummary};
pub use invariants::{validate_price, validate_show};
