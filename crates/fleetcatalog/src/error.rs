//! Error types for fleetcatalog.
//!
//! Misuse errors (an unknown variant name, a malformed numeric attribute) are
//! returned to the caller. Storage errors are absorbed by the fail-soft
//! repository surface, which logs them and degrades to an empty or failed
//! result.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fleetcatalog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Catalog Errors ===
    /// The variant factory was given a name outside the supported set.
    #[error("unknown aircraft variant: '{name}'")]
    UnknownVariant {
        /// The name that failed to match.
        name: String,
    },

    /// A numeric attribute was NaN, infinite or out of range.
    #[error("invalid value for {field}: {value}")]
    InvalidAttribute {
        /// Name of the offending attribute.
        field: &'static str,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// A sort key name matched no sortable field.
    #[error("unknown sort key: '{name}'")]
    UnknownSortKey {
        /// The name that failed to match.
        name: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// A stored row could not be turned back into an aircraft.
    #[error("malformed aircraft row {id}: {message}")]
    MalformedRow {
        /// Row id of the offending record.
        id: i64,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for fleetcatalog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown variant error.
    #[must_use]
    pub fn unknown_variant(name: impl Into<String>) -> Self {
        Self::UnknownVariant { name: name.into() }
    }

    /// Create an invalid attribute error.
    #[must_use]
    pub fn invalid_attribute(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidAttribute {
            field,
            value: value.to_string(),
        }
    }

    /// Create a malformed row error.
    #[must_use]
    pub fn malformed_row(id: i64, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            id,
            message: message.into(),
        }
    }

    /// Check if this error came from the storage substrate.
    ///
    /// These are the errors the repository absorbs rather than returning.
    #[must_use]
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::MalformedRow { .. }
                | Self::DirectoryCreate { .. }
        )
    }

    /// Check if this error reports caller misuse.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::UnknownVariant { .. }
                | Self::InvalidAttribute { .. }
                | Self::UnknownSortKey { .. }
        )
    }
}
