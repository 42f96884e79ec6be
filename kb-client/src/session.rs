//! Session persistence
//!
//! A session is created at login, read by every outbound request and
//! destroyed at logout or when the backend rejects the token. There is no
//! client-side expiry handling.

use std::sync::Arc;

use shared::client::{LoginResponse, UserInfo};
use shared::models::RolePermission;

use crate::storage::{Storage, keys};
use crate::ClientResult;

/// Logged-in session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub user: UserInfo,
}

/// Reads and writes the session keys of a [`Storage`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Persist a fresh token bundle
    pub fn save(&self, login: &LoginResponse) -> ClientResult<Session> {
        let s = &self.storage;
        s.set(keys::ACCESS_TOKEN, &login.access_token)?;
        match &login.refresh_token {
            Some(refresh) => s.set(keys::REFRESH_TOKEN, refresh)?,
            None => s.remove(keys::REFRESH_TOKEN)?,
        }
        s.set(keys::TOKEN_TYPE, &login.token_type)?;
        s.set(keys::USER, &serde_json::to_string(&login.user)?)?;
        s.set(keys::USER_ID, &login.user.id.to_string())?;
        s.set(keys::USERNAME, &login.user.username)?;
        match login.user.role_id {
            Some(role_id) => s.set(keys::USER_ROLE, &role_id.to_string())?,
            None => s.remove(keys::USER_ROLE)?,
        }
        s.set(keys::IS_VERIFIED, &login.user.is_verified.to_string())?;

        tracing::info!(username = %login.user.username, "Session stored");
        Ok(Session {
            access_token: login.access_token.clone(),
            refresh_token: login.refresh_token.clone(),
            token_type: login.token_type.clone(),
            user: login.user.clone(),
        })
    }

    /// Current session, if a token and a readable user are stored
    pub fn load(&self) -> Option<Session> {
        let access_token = self.access_token()?;
        let user = self
            .storage
            .get(keys::USER)
            .and_then(|json| serde_json::from_str::<UserInfo>(&json).ok())?;
        Some(Session {
            access_token,
            refresh_token: self.storage.get(keys::REFRESH_TOKEN),
            token_type: self
                .storage
                .get(keys::TOKEN_TYPE)
                .unwrap_or_else(|| "bearer".to_string()),
            user,
        })
    }

    /// Bearer token attached to outbound requests
    pub fn access_token(&self) -> Option<String> {
        self.storage.get(keys::ACCESS_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Cache the grants fetched after login
    pub fn cache_permissions(&self, grants: &[RolePermission]) -> ClientResult<()> {
        self.storage
            .set(keys::USER_PERMISSIONS, &serde_json::to_string(grants)?)
    }

    /// Drop every session key; preferences are kept
    pub fn clear(&self) -> ClientResult<()> {
        for key in keys::SESSION_KEYS {
            self.storage.remove(key)?;
        }
        tracing::info!("Session cleared");
        Ok(())
    }
}
