//! Error types produced by the catalog services.
//!
//! Two layers:
//!
//! - [`StoreError`] classifies a raw SQLite failure by its result code, so a
//!   uniqueness violation can be recognised without looking at the message.
//! - [`CatalogError`] is what every service operation returns. Its `Display`
//!   output is the exact message clients see in the `{"error": ...}`
//!   envelope; the HTTP layer only chooses the status code.
//!
//! # HTTP Status Code Mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | [`Validation`](CatalogError::Validation) | 400 |
//! | [`NotFound`](CatalogError::NotFound) | 404 |
//! | [`ContentNotFound`](CatalogError::ContentNotFound) | 400 |
//! | [`DuplicateAwardName`](CatalogError::DuplicateAwardName) | 404 |
//! | [`AwardAlreadyAssigned`](CatalogError::AwardAlreadyAssigned) | 400 |
//! | [`Storage`](CatalogError::Storage) | 400 |
//! | [`Connection`](CatalogError::Connection) | 500 |

use rusqlite::ffi;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A SQLite failure, classified by result code.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A `UNIQUE` constraint rejected the write.
    #[error("{0}")]
    UniqueViolation(#[source] rusqlite::Error),

    /// Any other constraint (`NOT NULL`, `CHECK`, `PRIMARY KEY`, ...).
    #[error("{0}")]
    Constraint(#[source] rusqlite::Error),

    #[error("{0}")]
    Sqlite(#[source] rusqlite::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::UniqueViolation(err)
            }
            rusqlite::Error::SqliteFailure(code, _)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(err)
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

/// Errors returned by catalog service operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing, malformed or non-numeric request parameter.
    #[error("{0}")]
    Validation(String),

    /// A mutation matched zero rows.
    #[error("{0}")]
    NotFound(String),

    /// A lookup by `content_id` matched nothing. Reported as a client error,
    /// not as a not-found.
    #[error("Content not found")]
    ContentNotFound,

    #[error("Award name already exists")]
    DuplicateAwardName,

    #[error("Content already has an award assigned.")]
    AwardAlreadyAssigned,

    /// A statement failed. `context` names the operation, e.g.
    /// `"Failed to create award"`.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Database connection failed: {0}")]
    Connection(#[source] rusqlite::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    /// Wraps a storage failure with the operation it interrupted and logs it.
    pub(crate) fn storage(context: &'static str, err: impl Into<StoreError>) -> Self {
        let source = err.into();
        tracing::error!(error = %source, "{context}");
        CatalogError::Storage { context, source }
    }

    /// `true` for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Connection(_))
    }
}
