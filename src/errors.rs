//! Unified error types for `GroceryBuddy`.
//!
//! Two broad families matter to callers: transport failures (the remote store
//! call itself failed, surfaced as [`Error::Database`]) and validation
//! failures (bad input caught before any write is attempted). Transport
//! failures are logged and reported to the user; nothing retries, and no error
//! is fatal to the process.

use thiserror::Error;

/// Unified error type for all fallible operations in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or validation error with a human-readable message
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what was invalid
        message: String,
    },

    /// Remote store call failed (the transport-error family)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error, typically from reading config files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Referenced item does not exist (or is archived)
    #[error("Item not found: {name}")]
    ItemNotFound {
        /// Name or id of the item that was looked up
        name: String,
    },

    /// Referenced category does not exist
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Name of the category that was looked up
        name: String,
    },

    /// Purchase interval must be a positive number of days
    #[error("Invalid purchase interval: {days} days")]
    InvalidInterval {
        /// The rejected interval value
        days: i64,
    },

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
