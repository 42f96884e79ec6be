//! Own profile

use shared::models::{ProfileFields, UserProfile};

use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone)]
pub struct ProfileApi<H> {
    http: H,
}

impl<H: HttpClient> ProfileApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.http.get("/profiles/me").await
    }

    /// Blank fields are sent as `null`
    pub async fn update_me(&self, fields: ProfileFields) -> ClientResult<UserProfile> {
        self.http.put("/profiles/me", &fields.normalized()).await
    }
}
