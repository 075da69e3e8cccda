//! Unified client implementation
//!
//! Typed wrappers over the backend data API: catalog, promotions, tax
//! rate, sale submission and caisse sessions. Two transports implement the
//! same [`PosApi`] trait: [`NetworkClient`] over HTTP and, behind the
//! `in-process` feature, [`InProcessClient`] driving an axum `Router`
//! directly (used by the test suite's mock backend).
//!
//! No retries anywhere: failures are user-input or business-rule problems
//! surfaced to the operator, not transient conditions worth hiding.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;
use shared::error::ApiResponse;
use shared::models::{
    CaisseSession, Product, Promotion, SaleDraft, SaleTransaction, SessionCloseRequest,
    SessionOpen, SessionStatistics,
};

// ============================================================================
// PosApi Trait
// ============================================================================

/// Typed surface of the backend data API
#[async_trait]
pub trait PosApi: Send + Sync {
    /// Fetch the product catalog snapshot
    async fn fetch_products(&self) -> ClientResult<Vec<Product>>;

    /// Fetch promotions currently inside their validity window
    async fn fetch_active_promotions(&self) -> ClientResult<Vec<Promotion>>;

    /// Fetch the configured tax rate (decimal fraction, e.g. 0.08)
    async fn fetch_tax_rate(&self) -> ClientResult<f64>;

    /// Submit a finalized sale draft; returns the persisted record
    async fn submit_sale(&self, draft: &SaleDraft) -> ClientResult<SaleTransaction>;

    /// Open a caisse session
    async fn open_session(&self, payload: &SessionOpen) -> ClientResult<CaisseSession>;

    /// Fetch the currently active caisse session, if any
    async fn current_session(&self) -> ClientResult<Option<CaisseSession>>;

    /// List past and present caisse sessions
    async fn list_sessions(&self, limit: i32, offset: i32) -> ClientResult<Vec<CaisseSession>>;

    /// Close a caisse session against a counted drawer
    async fn close_session(
        &self,
        id: i64,
        payload: &SessionCloseRequest,
    ) -> ClientResult<CaisseSession>;

    /// Fetch aggregated sales figures for a session
    async fn session_statistics(&self, id: i64) -> ClientResult<SessionStatistics>;
}

// ============================================================================
// Shared response handling
// ============================================================================

/// Map a non-success HTTP response to a client error
///
/// Prefers the backend's `ApiResponse` envelope for the code and message;
/// falls back to the raw body text when the envelope is not decodable.
fn error_from_status(status: StatusCode, body: &str) -> ClientError {
    let (code, message) = match serde_json::from_str::<ApiResponse<()>>(body) {
        Ok(envelope) => (envelope.code.unwrap_or(0), envelope.message),
        Err(_) => (0, body.to_string()),
    };

    tracing::warn!(status = %status, code, "API request failed");

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::PAYMENT_REQUIRED => {
            ClientError::Validation(message)
        }
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ if code != 0 => ClientError::Api { code, message },
        _ => ClientError::Internal(message),
    }
}

/// Unwrap the `data` field of a success envelope
fn unwrap_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
}

// ============================================================================
// ComptoirClient Factory
// ============================================================================

/// Client factory
pub struct ComptoirClient;

impl ComptoirClient {
    /// Create a network client for a base URL with default configuration
    pub fn network(base_url: &str) -> NetworkClient {
        NetworkClient::new(ClientConfig::new(base_url))
    }

    /// Create a network client from explicit configuration
    pub fn from_config(config: ClientConfig) -> NetworkClient {
        NetworkClient::new(config)
    }

    /// Create an in-process client driving an axum Router directly
    #[cfg(feature = "in-process")]
    pub fn in_process(router: axum::Router) -> InProcessClient {
        InProcessClient::new(router)
    }
}

// ============================================================================
// NetworkClient - HTTP transport
// ============================================================================

/// Network client (HTTP)
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkClient {
    /// Create a new network client
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.bearer_token,
        }
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.put(&url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_from_status(status, &text));
        }

        resp.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl PosApi for NetworkClient {
    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let resp: ApiResponse<Vec<Product>> = self.get("/api/products").await?;
        unwrap_data(resp, "product")
    }

    async fn fetch_active_promotions(&self) -> ClientResult<Vec<Promotion>> {
        let resp: ApiResponse<Vec<Promotion>> = self.get("/api/promotions/active").await?;
        unwrap_data(resp, "promotion")
    }

    async fn fetch_tax_rate(&self) -> ClientResult<f64> {
        let resp: ApiResponse<f64> = self.get("/api/settings/tax-rate").await?;
        unwrap_data(resp, "tax rate")
    }

    async fn submit_sale(&self, draft: &SaleDraft) -> ClientResult<SaleTransaction> {
        let resp: ApiResponse<SaleTransaction> = self.post("/api/sales", draft).await?;
        unwrap_data(resp, "sale")
    }

    async fn open_session(&self, payload: &SessionOpen) -> ClientResult<CaisseSession> {
        let resp: ApiResponse<CaisseSession> = self.post("/api/caisse-sessions", payload).await?;
        unwrap_data(resp, "session")
    }

    async fn current_session(&self) -> ClientResult<Option<CaisseSession>> {
        let resp: ApiResponse<Option<CaisseSession>> =
            self.get("/api/caisse-sessions/current").await?;
        Ok(resp.data.flatten())
    }

    async fn list_sessions(&self, limit: i32, offset: i32) -> ClientResult<Vec<CaisseSession>> {
        let resp: ApiResponse<Vec<CaisseSession>> = self
            .get(&format!(
                "/api/caisse-sessions?limit={}&offset={}",
                limit, offset
            ))
            .await?;
        unwrap_data(resp, "session list")
    }

    async fn close_session(
        &self,
        id: i64,
        payload: &SessionCloseRequest,
    ) -> ClientResult<CaisseSession> {
        let resp: ApiResponse<CaisseSession> = self
            .put(&format!("/api/caisse-sessions/{}/close", id), payload)
            .await?;
        unwrap_data(resp, "session")
    }

    async fn session_statistics(&self, id: i64) -> ClientResult<SessionStatistics> {
        let resp: ApiResponse<SessionStatistics> = self
            .get(&format!("/api/caisse-sessions/{}/statistics", id))
            .await?;
        unwrap_data(resp, "statistics")
    }
}

// ============================================================================
// InProcessClient - axum Router transport (tower oneshot)
// ============================================================================

/// In-process client (calls a Router directly, zero network overhead)
#[cfg(feature = "in-process")]
#[derive(Clone)]
pub struct InProcessClient {
    router: axum::Router,
    token: Option<String>,
}

#[cfg(feature = "in-process")]
impl InProcessClient {
    /// Create an in-process client
    pub fn new(router: axum::Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<T> {
        use axum::body::Body;
        use tower::ServiceExt;

        let mut builder = http::Request::builder().method(method).uri(path);

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }

        let req = builder
            .body(Body::from(body.unwrap_or_default()))
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            return Err(error_from_status(status, &text));
        }

        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(http::Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        self.request(http::Method::POST, path, Some(bytes)).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        self.request(http::Method::PUT, path, Some(bytes)).await
    }
}

#[cfg(feature = "in-process")]
#[async_trait]
impl PosApi for InProcessClient {
    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let resp: ApiResponse<Vec<Product>> = self.get("/api/products").await?;
        unwrap_data(resp, "product")
    }

    async fn fetch_active_promotions(&self) -> ClientResult<Vec<Promotion>> {
        let resp: ApiResponse<Vec<Promotion>> = self.get("/api/promotions/active").await?;
        unwrap_data(resp, "promotion")
    }

    async fn fetch_tax_rate(&self) -> ClientResult<f64> {
        let resp: ApiResponse<f64> = self.get("/api/settings/tax-rate").await?;
        unwrap_data(resp, "tax rate")
    }

    async fn submit_sale(&self, draft: &SaleDraft) -> ClientResult<SaleTransaction> {
        let resp: ApiResponse<SaleTransaction> = self.post("/api/sales", draft).await?;
        unwrap_data(resp, "sale")
    }

    async fn open_session(&self, payload: &SessionOpen) -> ClientResult<CaisseSession> {
        let resp: ApiResponse<CaisseSession> = self.post("/api/caisse-sessions", payload).await?;
        unwrap_data(resp, "session")
    }

    async fn current_session(&self) -> ClientResult<Option<CaisseSession>> {
        let resp: ApiResponse<Option<CaisseSession>> =
            self.get("/api/caisse-sessions/current").await?;
        Ok(resp.data.flatten())
    }

    async fn list_sessions(&self, limit: i32, offset: i32) -> ClientResult<Vec<CaisseSession>> {
        let resp: ApiResponse<Vec<CaisseSession>> = self
            .get(&format!(
                "/api/caisse-sessions?limit={}&offset={}",
                limit, offset
            ))
            .await?;
        unwrap_data(resp, "session list")
    }

    async fn close_session(
        &self,
        id: i64,
        payload: &SessionCloseRequest,
    ) -> ClientResult<CaisseSession> {
        let resp: ApiResponse<CaisseSession> = self
            .put(&format!("/api/caisse-sessions/{}/close", id), payload)
            .await?;
        unwrap_data(resp, "session")
    }

    async fn session_statistics(&self, id: i64) -> ClientResult<SessionStatistics> {
        let resp: ApiResponse<SessionStatistics> = self
            .get(&format!("/api/caisse-sessions/{}/statistics", id))
            .await?;
        unwrap_data(resp, "statistics")
    }
}
