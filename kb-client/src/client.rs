// kb-client/src/client.rs
// KbClient - one handle over storage, session, preferences and every API

use std::sync::Arc;

use shared::models::User;

use crate::access::AccessControl;
use crate::api::{
    ArticlesApi, AuthApi, CategoriesApi, ProfileApi, RolesApi, UserListSource, UsersApi,
};
use crate::context::AppContext;
use crate::list::RefreshingList;
use crate::search::{SearchSequencer, USER_SEARCH_DEBOUNCE};
use crate::session::{Session, SessionStore};
use crate::storage::{FileStorage, Storage};
use crate::{ClientConfig, ClientError, ClientResult, NetworkHttpClient};

/// Knowledge-base admin client
///
/// Cheap to clone; clones share storage, session and preference channels.
#[derive(Debug, Clone)]
pub struct KbClient {
    config: ClientConfig,
    session: SessionStore,
    http: NetworkHttpClient,
    anonymous: NetworkHttpClient,
    context: AppContext,
    user_search: SearchSequencer,
}

impl KbClient {
    /// Client persisting to `config.storage_dir`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let storage = Arc::new(FileStorage::open(&config.storage_dir));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: ClientConfig, storage: Arc<dyn Storage>) -> ClientResult<Self> {
        let session = SessionStore::new(storage.clone());
        let http = NetworkHttpClient::new(&config, session.clone())?;
        let anonymous = NetworkHttpClient::anonymous(&config)?;
        Ok(Self {
            context: AppContext::load(storage),
            config,
            session,
            http,
            anonymous,
            user_search: SearchSequencer::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Capabilities from the permission cache, read at call time
    pub fn access(&self) -> AccessControl {
        AccessControl::from_storage(self.session.storage().as_ref())
    }

    /// Stored session or [`ClientError::Unauthorized`]
    pub fn require_session(&self) -> ClientResult<Session> {
        self.session.load().ok_or(ClientError::Unauthorized)
    }

    pub fn auth(&self) -> AuthApi<NetworkHttpClient> {
        AuthApi::new(self.http.clone(), self.anonymous.clone())
    }

    pub fn users(&self) -> UsersApi<NetworkHttpClient> {
        UsersApi::new(self.http.clone())
    }

    pub fn roles(&self) -> RolesApi<NetworkHttpClient> {
        RolesApi::new(self.http.clone())
    }

    pub fn categories(&self) -> CategoriesApi<NetworkHttpClient> {
        CategoriesApi::new(self.http.clone())
    }

    pub fn profile(&self) -> ProfileApi<NetworkHttpClient> {
        ProfileApi::new(self.http.clone())
    }

    pub fn articles(&self) -> ArticlesApi<NetworkHttpClient> {
        ArticlesApi::new(self.http.clone())
    }

    /// Log in, persist the session and cache the role's grants
    ///
    /// A failed grant fetch leaves an empty cache, so every gated view is
    /// denied until the next login.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let response = self.auth().login(username, password).await?;
        if response.access_token.trim().is_empty() {
            return Err(ClientError::InvalidResponse(
                "login succeeded without an access token".into(),
            ));
        }
        let session = self.session.save(&response)?;

        let grants = match session.user.role_id {
            Some(role_id) => match self.roles().role_permissions(role_id).await {
                Ok(grants) => grants,
                Err(e) => {
                    tracing::warn!(role_id, error = %e, "Could not load permissions");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.session.cache_permissions(&grants)?;
        tracing::info!(
            username = %session.user.username,
            grants = grants.len(),
            "Logged in"
        );
        Ok(session)
    }

    /// Tell the backend, then drop the session whatever it answered
    pub async fn logout(&self) -> ClientResult<()> {
        if self.session.is_logged_in() {
            if let Err(e) = self.auth().logout().await {
                tracing::warn!(error = %e, "Logout request failed, clearing session anyway");
            }
        }
        self.session.clear()
    }

    /// Exchange the stored refresh token for a new bundle
    pub async fn refresh(&self) -> ClientResult<Session> {
        let current = self.require_session()?;
        let refresh_token = current
            .refresh_token
            .ok_or_else(|| ClientError::precondition("No refresh token stored"))?;
        let response = self.auth().refresh(&refresh_token).await?;
        self.session.save(&response)
    }

    /// Debounced user search; `None` when a newer search superseded this one
    pub async fn search_users(&self, term: &str) -> ClientResult<Option<Vec<User>>> {
        let users = self.users();
        self.user_search
            .debounced(USER_SEARCH_DEBOUNCE, users.list(term))
            .await
            .transpose()
    }

    pub fn category_list(&self) -> RefreshingList<CategoriesApi<NetworkHttpClient>> {
        RefreshingList::new(self.categories())
    }

    pub fn user_list(&self) -> RefreshingList<UserListSource<NetworkHttpClient>> {
        RefreshingList::new(UserListSource::new(self.users()))
    }

    pub fn role_list(&self) -> RefreshingList<RolesApi<NetworkHttpClient>> {
        RefreshingList::new(self.roles())
    }
}
