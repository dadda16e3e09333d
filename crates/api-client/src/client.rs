//! Transport adapter
//!
//! [`ApiClient`] wraps the underlying HTTP client with the fixed per-process
//! configuration (base endpoint, timeout, credential mode) and exposes
//! verb-specific call methods that resolve directly to the decoded payload.
//! Every call flows through the interceptor chain on the way out and the
//! response classifier on the way back; the adapter itself adds no policy of
//! its own — no retries, no caching, no deduplication.

use crate::classify::{Outcome, ResponseClassifier, TransportFailure};
use crate::interceptor::{HttpMethod, InterceptorChain, OutgoingRequest};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default API root prefixed to every relative path
pub const DEFAULT_API_ROOT: &str = "/api/v1";

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced to feature modules by the pipeline
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server understood the request but rejected it semantically
    #[error("business error {code}: {message}")]
    Business {
        /// The envelope's status token
        code: String,
        /// The server's user-facing message
        message: String,
    },

    /// The session is no longer authenticated; navigation to the login view
    /// has already been triggered
    #[error("session expired: {message}")]
    SessionExpired {
        /// The server's message
        message: String,
    },

    /// HTTP-level failure, or no response at all
    #[error("transport error: {0}")]
    Transport(TransportFailure),

    /// The payload did not match the requested type
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The path was not a relative path below the base endpoint
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// The underlying HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;

// =============================================================================
// Configuration
// =============================================================================

/// Immutable client configuration, created once at process start
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Full URL prefix for every call, origin plus API root
    pub base_endpoint: String,
    /// Per-call timeout; expiry is classified like an offline failure
    pub timeout: Duration,
    /// Whether cross-origin calls carry credentials (a cookie store here)
    pub credentialed: bool,
}

impl ApiClientConfig {
    /// Configuration for a backend origin, with the default API root,
    /// timeout, and credential mode
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            base_endpoint: format!("{}{}", origin.trim_end_matches('/'), DEFAULT_API_ROOT),
            timeout: DEFAULT_TIMEOUT,
            credentialed: false,
        }
    }

    /// Override the full base endpoint, including the API root
    pub fn with_base_endpoint(mut self, base_endpoint: impl Into<String>) -> Self {
        self.base_endpoint = base_endpoint.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable the credential mode
    pub fn with_credentialed(mut self, credentialed: bool) -> Self {
        self.credentialed = credentialed;
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// The shared transport adapter all feature modules call through
///
/// Owns the underlying HTTP client and the immutable configuration; feature
/// modules hold only a reference to the adapter. Concurrent calls are
/// independent and share nothing mutable.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
    interceptors: InterceptorChain,
    classifier: Arc<ResponseClassifier>,
}

impl ApiClient {
    /// Build a client over a configuration and a response classifier
    pub fn new(config: ApiClientConfig, classifier: Arc<ResponseClassifier>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(config.credentialed)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            config,
            interceptors: InterceptorChain::new(),
            classifier,
        })
    }

    /// Replace the interceptor chain, builder-style
    pub fn with_interceptors(mut self, interceptors: InterceptorChain) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// The client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// GET a payload; `params` are serialized as the query string
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let request = Self::with_params(OutgoingRequest::new(HttpMethod::Get, path), params);
        self.resolve(self.execute(request).await?)
    }

    /// POST a JSON body and decode the payload
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let request =
            OutgoingRequest::new(HttpMethod::Post, path).json_body(serde_json::to_value(body)?);
        self.resolve(self.execute(request).await?)
    }

    /// PUT a JSON body and decode the payload
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let request =
            OutgoingRequest::new(HttpMethod::Put, path).json_body(serde_json::to_value(body)?);
        self.resolve(self.execute(request).await?)
    }

    /// DELETE a resource; `params` are serialized as the query string
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = Self::with_params(OutgoingRequest::new(HttpMethod::Delete, path), params);
        self.resolve(self.execute(request).await?)
    }

    /// GET a raw body (downloads and other non-envelope responses)
    pub async fn get_bytes(&self, path: &str, params: &[(&str, &str)]) -> Result<Bytes> {
        let request = Self::with_params(OutgoingRequest::new(HttpMethod::Get, path), params);
        match self.execute(request).await? {
            Outcome::Raw(bytes) => Ok(bytes),
            // An enveloped success still resolves, as its serialized payload.
            Outcome::Success(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            other => Err(Self::rejection(other)),
        }
    }

    fn with_params(mut request: OutgoingRequest, params: &[(&str, &str)]) -> OutgoingRequest {
        for (key, value) in params {
            request = request.query_param(*key, *value);
        }
        request
    }

    /// Run one call through interceptors, transport, and classifier
    async fn execute(&self, request: OutgoingRequest) -> Result<Outcome> {
        Self::check_path(&request.path)?;
        let request = self.interceptors.run(request);

        let url = format!("{}{}", self.config.base_endpoint, request.path);
        debug!(method = request.method.as_str(), %url, "dispatching request");

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            // No server response: unreachable host, connection reset, or the
            // configured timeout elapsed.
            Err(_) => return Ok(self.classifier.classify_send_failure()),
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(_) => return Ok(self.classifier.classify_send_failure()),
        };

        Ok(self.classifier.classify_response(status, &body))
    }

    /// Map a classified outcome onto the typed result the caller asked for
    fn resolve<T: DeserializeOwned>(&self, outcome: Outcome) -> Result<T> {
        match outcome {
            Outcome::Success(value) => Ok(serde_json::from_value(value)?),
            Outcome::Raw(bytes) => Ok(serde_json::from_slice(&bytes)?),
            other => Err(Self::rejection(other)),
        }
    }

    fn rejection(outcome: Outcome) -> ApiError {
        match outcome {
            Outcome::BusinessError(envelope) => ApiError::Business {
                code: envelope.code.as_str().to_string(),
                message: envelope.message,
            },
            Outcome::SessionExpired(envelope) => ApiError::SessionExpired {
                message: envelope.message,
            },
            Outcome::Transport(failure) => ApiError::Transport(failure),
            // Success/Raw are handled by the callers before reaching here.
            Outcome::Success(_) | Outcome::Raw(_) => {
                ApiError::Transport(TransportFailure::Offline)
            }
        }
    }

    fn check_path(path: &str) -> Result<()> {
        if !path.starts_with('/') || path.contains("://") {
            return Err(ApiError::InvalidPath(path.to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
