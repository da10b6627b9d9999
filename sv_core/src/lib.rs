//! # Stevedore Core
//!
//! Shared types for the Stevedore service clients.
//!
//! This crate provides the request context carried through every client
//! call, plus the opaque identifier newtypes the services exchange.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{ProjectId, RequestContext, UserId};
