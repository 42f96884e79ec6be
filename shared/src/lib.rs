//! Shared types for the knowledge-base admin client
//!
//! Wire DTOs exchanged with the REST backend plus the backend's error body.
//! Kept free of any transport so the console and tests can reuse them.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiErrorBody, FieldError};
pub use serde::{Deserialize, Serialize};
