//! HTTP API client for the Opsdeck admin console
//!
//! This crate implements the shared request/response pipeline every feature
//! module goes through: a transport adapter over `reqwest`, an ordered
//! request-interceptor chain, the response envelope codec, and the response
//! classifier that turns HTTP/envelope outcomes into typed results plus
//! notification and navigation side effects.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod classify;
pub mod client;
pub mod envelope;
pub mod interceptor;
pub mod test_utils;

pub use classify::{
    ConnectivityProbe, MessageLookup, Navigator, NavigationTarget, Notifier, Outcome,
    ResponseClassifier, Severity, TransportFailure,
};
pub use client::{ApiClient, ApiClientConfig, ApiError};
pub use envelope::{Envelope, Pager, ResponseCode};
pub use interceptor::{AuthTokenInterceptor, InterceptorChain, OutgoingRequest, RequestInterceptor};

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;
