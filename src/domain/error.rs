//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate course rejected: {0}")]
    DuplicateCourse(String),
}
