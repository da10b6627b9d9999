//! # Stevedore Errors
//!
//! Error taxonomy shared by the Stevedore service clients.
//!
//! Uses `thiserror` for structured error definitions. Transport failures
//! from the underlying HTTP layer are carried unchanged inside the `Http`
//! variants; neither client retries or falls back internally.

use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Identity-service client errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No usable credential material was present in the request context.
    #[error("identity service connection failed: no admin flag, token info or token found")]
    AuthorizationFailure,

    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },
}

/// Catalog-service client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Zero eligible catalog records matched the given identifier.
    #[error("Image not found: {image}")]
    ImageNotFound { image: String },

    /// More than one eligible catalog record matched a free-text identifier.
    #[error("{message}")]
    Conflict { message: String },

    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API error: {status} - {message}")]
    Api { status: u16, message: String },
}
