// errors.rs
use std::fmt;

/// Errors originating from the lead core (validation, status machine,
/// store) or from the server layer (routing, missing resources).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// Malformed input at a capture/form boundary. Blocks before the
    /// store is ever touched.
    Validation(String),
    /// Status string outside the fixed five-value set. Not reachable
    /// through the intended UI.
    InvalidStatus(String),
    /// The caller's version of the lead is stale; re-fetch and retry.
    Conflict(String),
    /// The lead store could not be reached at all. In-memory state is
    /// left as it was.
    StoreUnavailable(String),
    DbError(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            ServerError::InvalidStatus(msg) => write!(f, "Invalid lead status: {msg}"),
            ServerError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            ServerError::StoreUnavailable(msg) => write!(f, "Store unavailable: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
