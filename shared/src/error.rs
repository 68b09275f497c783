//! Domain error type for the advisory core

use thiserror::Error;

/// Errors raised while interpreting farmer input against the domain model
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown crop type: {0}")]
    UnknownCropType(String),

    #[error("Unknown soil type: {0}")]
    UnknownSoilType(String),

    #[error("Invalid sowing date: {0}")]
    InvalidSowingDate(String),

    #[error("Sowing date {0} is in the future")]
    SowingDateInFuture(chrono::NaiveDate),

    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),
}

pub type DomainResult<T> = Result<T, DomainError>;
