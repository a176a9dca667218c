// src/error/types.rs
use crate::domain::{BookingRejection, DomainError, ShowId};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Booking conflict: {0}")]
    BookingConflict(#[from] BookingRejection),

    #[error("Show id {0} is already stored")]
    DuplicateShow(ShowId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Expected, caller-recoverable outcomes (as opposed to internal faults)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Domain(_) | AppError::NotFound { .. } | AppError::BookingConflict(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
