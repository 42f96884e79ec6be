//! Data models
//!
//! Mirrors of the backend's JSON resources. IDs are `i64`.

pub mod article;
pub mod category;
pub mod permission;
pub mod role;
pub mod user;

// Re-exports
pub use article::*;
pub use category::*;
pub use permission::*;
pub use role::*;
pub use user::*;
