//! Error types for countrydeck.
//!
//! This module defines the centralized error type [`CountryDeckError`] and a type
//! alias [`Result`] used throughout the crate. The `Display` output of every
//! variant is the human-readable message the store records in its `error` field,
//! so messages are written for end users rather than for logs.

use thiserror::Error;

/// The main error type for store and gateway operations.
///
/// Remote failures keep the server's own message verbatim; local failures
/// (missing records, duplicate ids, configuration) carry a short description.
///
/// # Examples
///
/// ```
/// use countrydeck::domain::CountryDeckError;
///
/// let err = CountryDeckError::Remote {
///     status: 409,
///     message: "duplicate key value violates unique constraint".to_string(),
/// };
/// assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
/// ```
#[derive(Debug, Error)]
pub enum CountryDeckError {
    /// The remote record store answered with a non-success status.
    ///
    /// `message` is the server-provided message, or the HTTP status text when
    /// the body carried none.
    #[error("{message}")]
    Remote {
        /// HTTP status code of the failed response.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, bad body).
    #[error("network error: {0}")]
    Transport(String),

    /// No record with the given id exists.
    #[error("country not found: {0}")]
    NotFound(String),

    /// A record with the given id already exists in the store.
    #[error("country already exists: {0}")]
    DuplicateId(String),

    /// Configuration is invalid or missing.
    ///
    /// Missing endpoint credentials surface through this variant on every
    /// remote call instead of failing at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Local file-backed storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CountryDeckError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A specialized `Result` type for countrydeck operations.
pub type Result<T> = std::result::Result<T, CountryDeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_server_message_verbatim() {
        let err = CountryDeckError::Remote {
            status: 404,
            message: "relation \"public.countries\" does not exist".to_string(),
        };
        assert_eq!(err.to_string(), "relation \"public.countries\" does not exist");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/countrydeck.json")?)
        }
        assert!(matches!(read(), Err(CountryDeckError::Io(_))));
    }
}
