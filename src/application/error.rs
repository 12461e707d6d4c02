//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: source, lookup and configuration failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("unable to open course source: {0}")]
    SourceNotFound(PathBuf),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
