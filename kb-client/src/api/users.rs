//! User administration endpoints

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{
    ProfileFields, Role, RoleAssignment, User, UserCreate, UserUpdate, VerificationUpdate,
};
use validator::Validate;

use super::refuse;
use crate::list::ListSource;
use crate::{ClientResult, HttpClient};

/// Page size of the user list
pub const PAGE_LIMIT: u32 = 100;

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 8;

/// Create-user form as typed in, with the role picked by name
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub profile: ProfileFields,
}

impl NewUser {
    /// Check the form and resolve the role name against `roles`
    pub fn into_request(self, roles: &[Role]) -> ClientResult<UserCreate> {
        let username = self.username.trim();
        let email = self.email.trim();
        let role = self.role.trim();
        if username.is_empty() || email.is_empty() || role.is_empty() {
            return Err(refuse("Please fill in all required fields"));
        }
        let password = self.password.trim();
        if password.is_empty() {
            return Err(refuse("Password is required for new users"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(refuse("Password must be at least 8 characters long"));
        }
        let Some(role_id) = roles.iter().find(|r| r.name == role).map(|r| r.id) else {
            return Err(refuse(format!("Role \"{role}\" not found")));
        };
        let req = UserCreate {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role_id: Some(role_id),
            is_verified: false,
            profile: Some(self.profile.normalized()),
        };
        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Clone)]
pub struct UsersApi<H> {
    http: H,
}

impl<H: HttpClient> UsersApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// `GET /users/`, filtered by username when `search` is non-empty
    pub async fn list(&self, search: &str) -> ClientResult<Vec<User>> {
        let mut query = vec![
            ("skip", "0".to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        if !search.is_empty() {
            query.push(("search", search.to_string()));
        }
        self.http.get_query("/users/", &query).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<User> {
        self.http.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, form: NewUser, roles: &[Role]) -> ClientResult<User> {
        let req = form.into_request(roles)?;
        tracing::info!(username = %req.username, "Creating user");
        self.http.post("/users/create", &req).await
    }

    /// `PUT /users/{id}`; refused while `current` is active
    pub async fn update(&self, current: &User, changes: &UserUpdate) -> ClientResult<User> {
        if current.is_active() {
            return Err(refuse(format!(
                "User \"{}\" is active. Deactivate the user before editing",
                current.username
            )));
        }
        self.http.put(&format!("/users/{}", current.id), changes).await
    }

    /// `DELETE /users/{id}`; refused while `current` is active
    pub async fn delete(&self, current: &User) -> ClientResult<Value> {
        if current.is_active() {
            return Err(refuse(format!(
                "User \"{}\" is active. Deactivate the user before deleting",
                current.username
            )));
        }
        tracing::info!(user_id = current.id, "Deleting user");
        self.http.delete(&format!("/users/{}", current.id)).await
    }

    pub async fn set_role(&self, id: i64, role_id: i64) -> ClientResult<Value> {
        self.http
            .put(&format!("/users/{id}/role"), &RoleAssignment { role_id })
            .await
    }

    /// Toggle the active flag; deactivation is what unlocks edit and delete
    pub async fn set_verified(&self, id: i64, is_verified: bool) -> ClientResult<Value> {
        self.http
            .put(
                &format!("/users/{id}/verify"),
                &VerificationUpdate { is_verified },
            )
            .await
    }
}

/// User list with the search term currently typed in
#[derive(Debug, Clone)]
pub struct UserListSource<H> {
    api: UsersApi<H>,
    pub search: String,
}

impl<H> UserListSource<H> {
    pub fn new(api: UsersApi<H>) -> Self {
        Self {
            api,
            search: String::new(),
        }
    }

    pub fn api(&self) -> &UsersApi<H> {
        &self.api
    }
}

#[async_trait]
impl<H: HttpClient> ListSource for UserListSource<H> {
    type Item = User;

    async fn fetch(&self) -> ClientResult<Vec<User>> {
        self.api.list(&self.search).await
    }
}
