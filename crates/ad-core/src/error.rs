//! Unified error type for resource operations.
//!
//! Every store and service failure is reported as one of three kinds. Callers
//! binding the services to a transport can derive a status from
//! [`Error::http_status`] or [`Error::code`] without matching on variants.

use std::fmt;

/// Error taxonomy shared by all resource kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed input: a missing required field, a malformed resource name,
    /// or an unsupported MIME type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of resource (e.g. "event", "image").
        entity: String,
        /// The name that was looked up.
        id: String,
    },

    /// Decode/encode failure in the preview pipeline or a broken invariant.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidArgument(_) => 400,
            Error::NotFound { .. } => 404,
            Error::Internal(_) => 500,
        }
    }

    /// Canonical RPC status code name for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL",
        }
    }

    /// Convenience constructor for [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
