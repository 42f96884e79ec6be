//! KB Client - admin client for the knowledge-base REST API
//!
//! Session handling, client-side permission gating and typed services for
//! users, roles, categories, profiles and articles.

pub mod access;
pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod icon;
pub mod list;
pub mod search;
pub mod session;
pub mod storage;

pub use access::{AccessControl, Gate, Menu, PermissionMatrix, Route};
pub use client::KbClient;
pub use config::ClientConfig;
pub use context::{AppContext, Language, Theme};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::{HttpClient, NetworkHttpClient};
pub use icon::{HexColor, IconDescriptor};
pub use list::{ListSource, RefreshingList};
pub use search::SearchSequencer;
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
