pub mod entity;
pub mod invariants;

pub use entity::{Movie, Room};
pub use invariants::{validate_movie, validate_room};
