//! Routing errors.

use thiserror::Error;

/// Errors returned by route registration and lookup.
///
/// None of these are fatal; the HTTP layer maps them to a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The pattern places a wildcard anywhere but a trailing `/*`, or is
    /// otherwise malformed.
    #[error("invalid route pattern: {0}")]
    InvalidPattern(String),

    /// The method has no routing tree.
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),

    /// Nothing is registered for this method and path.
    #[error("no route found for {method} {path}")]
    NotFound { method: String, path: String },
}

impl RouterError {
    pub(crate) fn not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        RouterError::NotFound {
            method: method.into(),
            path: path.into(),
        }
    }
}
