//! Request interceptor chain
//!
//! Interceptors run synchronously, in registration order, against every
//! outgoing call before it is handed to the transport. The contract is
//! narrow: an interceptor may add or overwrite headers, but must not change
//! the method, path, query, or body, and must not fail. The chain is the
//! extension point for credential injection; today its only stock member is
//! [`AuthTokenInterceptor`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// =============================================================================
// Outgoing Requests
// =============================================================================

/// HTTP verb for an outgoing call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request (query-string parameters)
    Get,
    /// POST request (JSON body)
    Post,
    /// PUT request (JSON body)
    Put,
    /// DELETE request (query-string parameters)
    Delete,
}

impl HttpMethod {
    /// The verb as a wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// The mutable configuration of one outgoing call
///
/// Built by the transport adapter per call, threaded through the interceptor
/// chain, then converted into the underlying transport request.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// HTTP verb
    pub method: HttpMethod,
    /// Relative path below the base endpoint (e.g. `/schedule/page`)
    pub path: String,
    /// Query parameters (GET/DELETE verb convention)
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// JSON body (POST/PUT verb convention)
    pub body: Option<serde_json::Value>,
}

impl OutgoingRequest {
    /// Create a new outgoing request for a verb and relative path
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a query parameter
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

// =============================================================================
// Interceptors
// =============================================================================

/// A synchronous pre-send transform over the outgoing call configuration
///
/// Implementations may decorate the request with headers; they must leave
/// method, path, query, and body untouched.
pub trait RequestInterceptor: Send + Sync {
    /// Transform the outgoing request
    fn apply(&self, request: OutgoingRequest) -> OutgoingRequest;
}

/// Ordered list of interceptors applied before every send
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create an empty chain (a pass-through)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; it runs after every interceptor added before it
    pub fn push(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Append an interceptor, builder-style
    pub fn with(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.push(interceptor);
        self
    }

    /// Run the chain over an outgoing request
    pub fn run(&self, request: OutgoingRequest) -> OutgoingRequest {
        self.interceptors
            .iter()
            .fold(request, |req, interceptor| interceptor.apply(req))
    }

    /// Number of registered interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain is a pass-through
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

/// Attaches the session token as an `x-access-token` header when present
///
/// The token cell is shared with whatever owns the login flow; clearing it
/// turns this interceptor back into a no-op.
#[derive(Clone, Default)]
pub struct AuthTokenInterceptor {
    token: Arc<RwLock<Option<String>>>,
}

/// Header carrying the session token
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

impl AuthTokenInterceptor {
    /// Create an interceptor with no token set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the token cell
    pub fn token_cell(&self) -> Arc<RwLock<Option<String>>> {
        Arc::clone(&self.token)
    }

    /// Set or clear the token
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut cell) = self.token.write() {
            *cell = token;
        }
    }
}

impl RequestInterceptor for AuthTokenInterceptor {
    fn apply(&self, mut request: OutgoingRequest) -> OutgoingRequest {
        let token = self.token.read().ok().and_then(|cell| cell.clone());
        if let Some(token) = token {
            request
                .headers
                .insert(ACCESS_TOKEN_HEADER.to_string(), token);
        }
        request
    }
}

// =============================================================================
// Tests
// =============================================================================
