//! Client configuration

use std::path::PathBuf;

/// Default backend address when `KB_API_BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration for talking to the knowledge-base API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | KB_API_BASE_URL | http://localhost:8000 | REST API root |
/// | KB_REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
/// | KB_STORAGE_DIR | .kb-console | Where session and preferences persist |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted client state
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            storage_dir: PathBuf::from(".kb-console"),
        }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("KB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        if let Some(timeout) = std::env::var("KB_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(dir) = std::env::var("KB_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
