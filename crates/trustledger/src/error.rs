//! Error types for trustledger.
//!
//! This module defines every error the registry can report. Domain errors are
//! the tagged failures the screens branch on; infrastructure errors only ever
//! surface from storage setup, configuration, or the persistence primitives.

use std::path::PathBuf;
use thiserror::Error;

use crate::view::Screen;

/// The main error type for trustledger operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Registry Errors ===
    /// A create-path registration reused an id that is already registered.
    #[error("member id {id} is already registered")]
    DuplicateId {
        /// The colliding member id.
        id: String,
    },

    /// No member with the given id exists.
    #[error("member {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A member record failed validation.
    #[error("invalid member record: {message}")]
    InvalidMember {
        /// Description of the validation failure.
        message: String,
    },

    /// A donation or scheme amount was zero.
    #[error("{entry} amount must be greater than zero")]
    InvalidAmount {
        /// The kind of ledger entry.
        entry: &'static str,
    },

    /// An edit tried to change a field that is fixed once set.
    #[error("field '{field}' of member {id} cannot be changed")]
    ImmutableField {
        /// The member being edited.
        id: String,
        /// Name of the immutable field.
        field: &'static str,
    },

    /// An edit dropped or reordered entries of an append-only history.
    #[error("{history} history of member {id} is append-only")]
    HistoryRewritten {
        /// The member being edited.
        id: String,
        /// Which history was rewritten.
        history: &'static str,
    },

    /// No free member id was found within the allowed attempts.
    #[error("no free member id found after {attempts} attempts")]
    IdSpaceExhausted {
        /// How many candidate ids were tried.
        attempts: u32,
    },

    // === Navigation Errors ===
    /// The requested screen is not reachable from the current one.
    #[error("cannot navigate from {from} to {to}")]
    InvalidTransition {
        /// The active screen.
        from: Screen,
        /// The requested screen.
        to: Screen,
    },

    /// The action is not offered by the active screen.
    #[error("action '{action}' is not available on the {screen} screen")]
    ActionNotAvailable {
        /// Name of the rejected action.
        action: &'static str,
        /// The active screen.
        screen: Screen,
    },

    // === Persistence Errors ===
    /// The durable snapshot could not be read or written.
    #[error("persistence unavailable: {message}")]
    PersistenceUnavailable {
        /// Description of what went wrong.
        message: String,
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

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
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
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for trustledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate id error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a member not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an invalid member error.
    #[must_use]
    pub fn invalid_member(message: impl Into<String>) -> Self {
        Self::InvalidMember {
            message: message.into(),
        }
    }

    /// Create a persistence unavailable error.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            message: message.into(),
        }
    }

    /// Check if this error is a duplicate id rejection.
    #[must_use]
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::DuplicateId { .. })
    }

    /// Check if this error is a missing member.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from navigation rather than a mutation.
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::ActionNotAvailable { .. }
        )
    }
}
