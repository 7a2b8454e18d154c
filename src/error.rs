//! Error types shared across the crate.
//!
//! The taxonomy is deliberately small: storage failures propagate to the
//! caller, validation failures are user-facing messages produced by the
//! controllers, and navigation failures abort a single route dispatch.
//! Absence of a record is not an error anywhere: `ClienteStore::get`
//! returns `Ok(None)` and callers decide what to tell the user.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for Record Store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the Record Store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite database file could not be opened.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Path of the database file.
        path: PathBuf,
        /// Underlying engine error.
        #[source]
        source: rusqlite::Error,
    },

    /// Creating the data directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The Cliente table could not be created.
    #[error("failed to create Cliente table")]
    Schema(#[source] rusqlite::Error),

    /// A row violated a database constraint (for Cliente this means a
    /// required column was missing, which validation should have caught).
    #[error("a Cliente row violated a database constraint")]
    Constraint(#[source] rusqlite::Error),

    /// Any other SQL preparation or execution failure.
    #[error("SQL execution failed")]
    Sql(#[from] rusqlite::Error),

    /// The default database location could not be resolved.
    #[error("could not locate home directory for the database path")]
    NoHomeDir,
}

/// Business-rule violations detected by controllers before anything reaches
/// the store. The messages are the user-facing text the application shows,
/// so `Display` doubles as the notification body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The name field is empty or whitespace.
    #[error("O campo Nome não pode ser vazio.")]
    EmptyName,

    /// The last-name field is empty or whitespace.
    #[error("O campo Sobrenome não pode ser vazio.")]
    EmptyLastName,

    /// The age field is missing, not an integer, or not positive.
    #[error("A idade deve ser um número inteiro maior que zero.")]
    InvalidAge,

    /// The address field is empty or whitespace.
    #[error("O campo Endereço não pode ser vazio.")]
    EmptyAddress,
}

/// Failures while resolving or presenting a destination.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The destination controller failed to initialize; the navigation
    /// attempt is abandoned and the context is left unchanged.
    #[error("controller for route '{route}' failed to initialize")]
    Controller {
        /// Route key that was being presented.
        route: String,
        /// The storage failure that aborted initialization.
        #[source]
        source: StorageError,
    },
}
