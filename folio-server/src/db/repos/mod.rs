//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One table per repository, no joins
//! - Deletes report missing rows via `DbError::NotFound` (no check-then-delete)
//! - Writes that must be atomic run on a caller-provided transaction

pub mod contacts;
pub mod portfolio;
pub mod blog;

pub use contacts::{ContactRepo, NewContactMessage};
pub use portfolio::PortfolioRepo;
pub use blog::BlogRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
