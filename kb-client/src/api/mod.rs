//! Typed REST services
//!
//! One service per backend resource, each generic over the
//! [`HttpClient`](crate::HttpClient)
//! so tests can point it at a mock backend. Form checks run before any
//! request and fail with [`ClientError::Precondition`](crate::ClientError).

pub mod articles;
pub mod auth;
pub mod categories;
pub mod profile;
pub mod roles;
pub mod users;

pub use articles::ArticlesApi;
pub use auth::AuthApi;
pub use categories::{CategoriesApi, CategoryForm};
pub use profile::ProfileApi;
pub use roles::RolesApi;
pub use users::{NewUser, UserListSource, UsersApi};

use crate::{ClientError, ClientResult};

/// Trimmed value, or a precondition error if it is blank
pub(crate) fn required(value: &str, message: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        tracing::warn!(message, "Precondition failed");
        return Err(ClientError::precondition(message));
    }
    Ok(trimmed.to_string())
}

/// Log and build a precondition error
pub(crate) fn refuse(message: impl Into<String>) -> ClientError {
    let message = message.into();
    tracing::warn!(%message, "Precondition failed");
    ClientError::Precondition(message)
}
