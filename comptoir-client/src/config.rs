//! Client configuration

/// Configuration for a network client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the data API (e.g. "https://pos.example.com")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional bearer token attached to every request
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            bearer_token: None,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}
