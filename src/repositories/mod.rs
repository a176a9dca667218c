// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB collections
// - NO business logic
// - NO event emission
// - NO cross-repository calls
// - Entity invariants are enforced by the domain, not here

pub mod catalog_repository;
pub mod show_repository;

pub use catalog_repository::{CatalogRepository, InMemoryCatalogRepository};
pub use show_repository::{InMemoryShowStore, ShowStore};

#[cfg(test)]
pub use show_repository::MockShowStore;
