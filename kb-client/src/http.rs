// kb-client/src/http.rs
// HTTP client - bearer-token JSON over REST

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

use crate::session::SessionStore;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Network HTTP client
///
/// The token is read from the session store on every request, so a login or
/// logout elsewhere takes effect on the next call.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Option<SessionStore>,
}

impl NetworkHttpClient {
    /// Authenticated client
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        let mut client = Self::anonymous(config)?;
        client.session = Some(session);
        Ok(client)
    }

    /// Client that never attaches a token
    pub fn anonymous(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API base URL must start with http:// or https://: {base_url:?}"
            )));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, bool) {
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        let token = self.session.as_ref().and_then(SessionStore::access_token);
        let authenticated = token.is_some();
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        (req, authenticated)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
        authenticated: bool,
    ) -> ClientResult<T> {
        tracing::debug!(%method, path, "API request");
        let result = match req.send().await {
            Ok(response) => self.handle_response(response, authenticated).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = &result {
            tracing::error!(%method, path, error = %e, "API request failed");
        }
        result
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        authenticated: bool,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED && authenticated {
                // Token no longer accepted
                if let Some(session) = &self.session {
                    session.clear()?;
                }
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::parse(&text).message(),
            });
        }
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let (req, auth) = self.request(Method::GET, path);
        self.send(Method::GET, path, req, auth).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let (req, auth) = self.request(Method::GET, path);
        self.send(Method::GET, path, req.query(query), auth).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let (req, auth) = self.request(Method::POST, path);
        self.send(Method::POST, path, req.json(body), auth).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let (req, auth) = self.request(Method::POST, path);
        self.send(Method::POST, path, req, auth).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let (req, auth) = self.request(Method::PUT, path);
        self.send(Method::PUT, path, req.json(body), auth).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let (req, auth) = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, req, auth).await
    }
}
