//! Authenticated HTTP client.
//!
//! Every outbound call goes through [`ApiClient`]. It injects the bearer
//! token, encodes bodies, turns non-2xx responses into [`PortalError::Api`],
//! and performs at most one refresh-and-retry cycle when a call is rejected
//! with 401 while a refresh token is held.

use std::sync::Arc;

use async_trait::async_trait;
use ownabee_core::auth::{AuthTokens, RefreshRequest};
use ownabee_core::config::PortalConfig;
use ownabee_core::error::{GENERIC_ERROR_MESSAGE, PortalError, Result};
use ownabee_core::http::{
    HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody, Transport,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::transport::ReqwestTransport;

pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

/// Receives token lifecycle events from the client.
///
/// The session store registers itself here so that refreshed tokens are
/// persisted and a failed refresh tears the session down.
#[async_trait]
pub trait AuthEventHandler: Send + Sync {
    /// Both tokens were replaced by a successful refresh.
    async fn on_tokens_changed(&self, tokens: AuthTokens);

    /// Refresh failed; the client has already dropped its tokens.
    async fn on_auth_error(&self);
}

/// Per-call options: verb, query string and body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn json<B: Serialize + ?Sized>(method: HttpMethod, body: &B) -> Result<Self> {
        Ok(Self {
            body: RequestBody::Json(serde_json::to_value(body)?),
            ..Self::new(method)
        })
    }

    pub fn post_json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Self::json(HttpMethod::Post, body)
    }

    pub fn put_json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Self::json(HttpMethod::Put, body)
    }

    pub fn multipart(method: HttpMethod, form: MultipartForm) -> Self {
        Self {
            body: RequestBody::Multipart(form),
            ..Self::new(method)
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Accepts both `{ accessToken, refreshToken }` and `{ tokens: {...} }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshResponse {
    Wrapped { tokens: AuthTokens },
    Flat(AuthTokens),
}

impl RefreshResponse {
    fn into_tokens(self) -> AuthTokens {
        match self {
            RefreshResponse::Wrapped { tokens } | RefreshResponse::Flat(tokens) => tokens,
        }
    }
}

pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    /// In-memory token pair. Never persisted by the client itself.
    tokens: RwLock<Option<AuthTokens>>,
    /// Serializes refresh cycles so concurrent 401s share one refresh.
    refresh_gate: Mutex<()>,
    handler: RwLock<Option<Arc<dyn AuthEventHandler>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            handler: RwLock::new(None),
        }
    }

    /// Client backed by reqwest, configured from `config`.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout_secs)?;
        Ok(Self::new(config.normalized_base_url(), Arc::new(transport)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn set_event_handler(&self, handler: Arc<dyn AuthEventHandler>) {
        *self.handler.write().await = Some(handler);
    }

    /// Replaces the held token pair (from login or hydration).
    pub async fn set_tokens(&self, tokens: Option<AuthTokens>) {
        *self.tokens.write().await = tokens;
    }

    pub async fn clear_tokens(&self) {
        self.set_tokens(None).await;
    }

    pub async fn tokens(&self) -> Option<AuthTokens> {
        self.tokens.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Issues a call and decodes the JSON response into `T`.
    ///
    /// A 204 (or an empty success body) decodes `T` from JSON `null`, so
    /// `()` and `Option<_>` resolve to "no value".
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.execute(endpoint, &options, None).await?;
        decode_response(&response)
    }

    /// Like [`request`](Self::request), but resolves to
    /// [`PortalError::Cancelled`] once `cancel` fires.
    ///
    /// Only the sends race the token. A refresh cycle that has started runs
    /// to completion so the held tokens and the event handler stay in step;
    /// the retry is then skipped if the token fired meanwhile.
    pub async fn request_cancellable<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let response = self.execute(endpoint, &options, Some(cancel)).await?;
        decode_response(&response)
    }

    async fn execute(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse> {
        let sent_with = self.access_token().await;
        let response = self
            .send_unless_cancelled(endpoint, options, sent_with.as_deref(), cancel)
            .await?;

        if response.status != 401 {
            return ensure_success(response);
        }

        if self.tokens.read().await.is_none() {
            return Err(error_from_response(&response));
        }

        tracing::info!(
            "[ApiClient] {} {} returned 401, refreshing session",
            options.method,
            endpoint
        );
        let fresh = self.refresh_after_unauthorized(sent_with.as_deref()).await?;

        // Single retry; a second 401 is surfaced as-is.
        let retried = self
            .send_unless_cancelled(endpoint, options, Some(&fresh.access_token), cancel)
            .await?;
        if retried.status == 401 {
            tracing::warn!(
                "[ApiClient] {} {} still unauthorized after refresh",
                options.method,
                endpoint
            );
        }
        ensure_success(retried)
    }

    async fn send_unless_cancelled(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        access_token: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse> {
        let Some(cancel) = cancel else {
            return self.send(endpoint, options, access_token).await;
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("[ApiClient] {} {} cancelled", options.method, endpoint);
                Err(PortalError::Cancelled)
            }
            result = self.send(endpoint, options, access_token) => result,
        }
    }

    /// Runs (or joins) a refresh cycle for a call that was rejected while
    /// carrying `stale_access`.
    async fn refresh_after_unauthorized(&self, stale_access: Option<&str>) -> Result<AuthTokens> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.tokens.read().await.clone();
        let Some(current) = current else {
            // Torn down by a refresh that failed while we waited.
            return Err(PortalError::SessionExpired);
        };

        if stale_access != Some(current.access_token.as_str()) {
            tracing::debug!("[ApiClient] Tokens already refreshed by a concurrent call");
            return Ok(current);
        }

        match self.call_refresh(&current.refresh_token).await {
            Ok(tokens) => {
                *self.tokens.write().await = Some(tokens.clone());
                tracing::info!("[ApiClient] Session refreshed");
                if let Some(handler) = self.handler().await {
                    handler.on_tokens_changed(tokens.clone()).await;
                }
                Ok(tokens)
            }
            Err(e) => {
                tracing::warn!("[ApiClient] Token refresh failed: {}", e);
                *self.tokens.write().await = None;
                if let Some(handler) = self.handler().await {
                    handler.on_auth_error().await;
                }
                Err(PortalError::SessionExpired)
            }
        }
    }

    async fn call_refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let options = RequestOptions::post_json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let response = self.send(REFRESH_ENDPOINT, &options, None).await?;
        let response = ensure_success(response)?;
        Ok(response.json::<RefreshResponse>()?.into_tokens())
    }

    async fn handler(&self) -> Option<Arc<dyn AuthEventHandler>> {
        self.handler.read().await.clone()
    }

    async fn send(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        access_token: Option<&str>,
    ) -> Result<HttpResponse> {
        let url = self.build_url(endpoint, &options.query)?;
        let mut request = HttpRequest::new(options.method, url);
        request.set_header("Accept", "application/json");

        if let Some(token) = access_token {
            request.set_header("Authorization", format!("Bearer {}", token));
        }

        // Multipart bodies carry no explicit content type so the transport
        // can set the boundary.
        if let RequestBody::Json(_) = options.body {
            request.set_header("Content-Type", "application/json");
        }
        request.body = options.body.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!("[ApiClient] {} {} failed: {}", options.method, endpoint, e);
            e
        })?;

        tracing::debug!(
            "[ApiClient] {} {} -> {}",
            options.method,
            endpoint,
            response.status
        );
        Ok(response)
    }

    fn build_url(&self, endpoint: &str, query: &[(String, String)]) -> Result<String> {
        let raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        };

        if query.is_empty() {
            return Ok(raw);
        }

        reqwest::Url::parse_with_params(&raw, query)
            .map(String::from)
            .map_err(|e| PortalError::validation(format!("Invalid request URL {}: {}", raw, e)))
    }
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(error_from_response(&response))
    }
}

/// Builds the `{ message, status }` error for a failed response.
///
/// Prefers the body's `message`, then its `error` field, then the status
/// text, then a generic message.
pub fn error_from_response(response: &HttpResponse) -> PortalError {
    let from_body = serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["message", "error"].iter().find_map(|key| {
                body.get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            })
        });

    let message = from_body
        .or_else(|| {
            let text = response.status_text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| format!("{} with status {}", GENERIC_ERROR_MESSAGE, response.status));

    PortalError::api(response.status, message)
}

fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    if response.is_no_content() {
        return Ok(T::deserialize(serde_json::Value::Null)?);
    }
    response.json()
}
