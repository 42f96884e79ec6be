//! Authentication endpoints

use serde_json::Value;
use shared::client::{ChangePasswordRequest, LoginRequest, LoginResponse, RefreshTokenRequest};
use shared::models::User;
use validator::Validate;

use super::{refuse, required};
use crate::{ClientResult, HttpClient};

/// Login and change-password go through `anonymous`, so no stored token is
/// attached and their 401s never touch the session
#[derive(Debug, Clone)]
pub struct AuthApi<H> {
    http: H,
    anonymous: H,
}

impl<H: HttpClient> AuthApi<H> {
    pub fn new(http: H, anonymous: H) -> Self {
        Self { http, anonymous }
    }

    /// `POST /auth/login`; the caller persists the returned tokens
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let username = required(username, "Please enter username and password")?;
        if password.is_empty() {
            return Err(refuse("Please enter username and password"));
        }
        let req = LoginRequest {
            username,
            password: password.to_string(),
        };
        self.anonymous.post("/auth/login", &req).await
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.http.get("/auth/me").await
    }

    /// `POST /auth/refresh`; never called automatically
    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<LoginResponse> {
        let req = RefreshTokenRequest {
            refresh_token: required(refresh_token, "No refresh token stored")?,
        };
        self.http.post("/auth/refresh", &req).await
    }

    pub async fn logout(&self) -> ClientResult<Value> {
        self.http.post_empty("/auth/logout").await
    }

    /// `POST /users/change-password`
    ///
    /// Every field must be filled in and the new password must match its
    /// confirmation. Nothing is sent otherwise.
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ClientResult<Value> {
        if [username, old_password, new_password, confirm_password]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(refuse("Please fill out all fields"));
        }
        if new_password != confirm_password {
            return Err(refuse("New passwords do not match"));
        }
        let req = ChangePasswordRequest {
            username: username.to_string(),
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        req.validate()?;
        self.anonymous.post("/users/change-password", &req).await
    }
}
