//! Response classification
//!
//! The classifier is the decision core of the pipeline. After every
//! completed or failed call it maps the outcome onto one of four kinds —
//! success, business error, session expired, transport error — and performs
//! the associated side effect: return the payload, surface the server's
//! message, force navigation back to the login view, or surface a
//! connectivity error.
//!
//! All side-effecting collaborators (navigation, notification, message
//! lookup, connectivity) are injected as trait objects so the classifier can
//! be exercised in isolation.

use crate::envelope::{decode_body, DecodedBody, Envelope, ResponseCode};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

/// Path of the login view the classifier redirects to on session expiry
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the caller's location across re-authentication
pub const REDIRECT_PARAM: &str = "redirectURL";

/// Translation keys for every message the classifier emits
pub mod keys {
    /// Session expired, please log in (envelope-based detection)
    pub const NEED_LOGIN: &str = "needLogin";
    /// Raw HTTP 401, session invalid
    pub const SESSION_INVALID: &str = "sessionInvalid";
    /// Generic non-2xx failure
    pub const REQUEST_FAILED: &str = "requestFailed";
    /// Transport failure while the connectivity probe reports offline
    pub const NETWORK_OFFLINE: &str = "networkOffline";
    /// Transport failure while the connectivity probe reports online
    pub const NETWORK_ERROR: &str = "networkError";
}

// =============================================================================
// Collaborators
// =============================================================================

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable condition, e.g. a session that can be re-established
    Warning,
    /// Failed request
    Error,
}

/// Where a forced navigation should land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Destination path
    pub path: String,
    /// Query parameters to append
    pub query: Vec<(String, String)>,
}

impl NavigationTarget {
    /// The login view, carrying the caller's current location so the user
    /// returns there after re-authenticating
    pub fn login_with_redirect(current_path: impl Into<String>) -> Self {
        Self {
            path: LOGIN_PATH.to_string(),
            query: vec![(REDIRECT_PARAM.to_string(), current_path.into())],
        }
    }
}

/// Navigation surface the classifier redirects through on session expiry
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Full path (including query) the user is currently on
    fn current_path(&self) -> String;
    /// Replace the current history entry; never pushes
    fn replace(&self, target: NavigationTarget);
}

/// User-notification surface
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show one notification
    fn notify(&self, severity: Severity, message: &str);
}

/// Locale-aware message lookup; the classifier passes keys, never text
#[cfg_attr(test, mockall::automock)]
pub trait MessageLookup: Send + Sync {
    /// Resolve a translation key in the active locale
    fn message(&self, key: &str) -> String;
}

/// Environment signal for network connectivity
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the environment currently believes it is online
    fn is_online(&self) -> bool;
}

// =============================================================================
// Classified Outcomes
// =============================================================================

/// Failure detected at the HTTP/network layer rather than the envelope layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// The server answered with a non-2xx status
    Status(u16),
    /// No server response at all (unreachable, timeout)
    Offline,
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportFailure::Status(status) => write!(f, "HTTP status {}", status),
            TransportFailure::Offline => write!(f, "no response (offline or timed out)"),
        }
    }
}

/// The classified result of one call, consumed immediately by the adapter
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success token: the envelope's payload
    Success(serde_json::Value),
    /// 2xx body without an envelope: returned unchanged
    Raw(Bytes),
    /// Server understood the request but rejected it semantically
    BusinessError(Envelope),
    /// The reserved "not authenticated" token; navigation already happened
    SessionExpired(Envelope),
    /// HTTP-level failure
    Transport(TransportFailure),
}

// =============================================================================
// Classifier
// =============================================================================

/// Maps every HTTP/envelope outcome onto an [`Outcome`] and performs the
/// associated notification and navigation side effects
///
/// Invariants: every non-success outcome produces exactly one notification;
/// only session expiry navigates; nothing is ever retried here.
#[derive(Clone)]
pub struct ResponseClassifier {
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    messages: Arc<dyn MessageLookup>,
    connectivity: Arc<dyn ConnectivityProbe>,
}

impl ResponseClassifier {
    /// Create a classifier over its four collaborators
    pub fn new(
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        messages: Arc<dyn MessageLookup>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            navigator,
            notifier,
            messages,
            connectivity,
        }
    }

    /// Classify a completed call from its HTTP status and body
    pub fn classify_response(&self, status: u16, body: &Bytes) -> Outcome {
        if !(200..300).contains(&status) {
            return self.classify_http_failure(status);
        }

        match decode_body(body) {
            // Downloads and other non-envelope bodies bypass code-based
            // classification entirely.
            DecodedBody::Raw(raw) => {
                debug!(status, bytes = raw.len(), "raw passthrough response");
                Outcome::Raw(raw)
            }
            DecodedBody::Enveloped(envelope) => self.classify_envelope(envelope),
        }
    }

    /// Classify a call whose transport failed without any server response
    pub fn classify_send_failure(&self) -> Outcome {
        let key = if self.connectivity.is_online() {
            keys::NETWORK_ERROR
        } else {
            keys::NETWORK_OFFLINE
        };
        warn!(key, "transport failure without server response");
        self.notifier.notify(Severity::Error, &self.messages.message(key));
        Outcome::Transport(TransportFailure::Offline)
    }

    fn classify_http_failure(&self, status: u16) -> Outcome {
        let key = match status {
            401 => keys::SESSION_INVALID,
            _ => keys::REQUEST_FAILED,
        };
        warn!(status, key, "non-2xx response");
        self.notifier.notify(Severity::Error, &self.messages.message(key));
        Outcome::Transport(TransportFailure::Status(status))
    }

    fn classify_envelope(&self, envelope: Envelope) -> Outcome {
        // Session expiry is checked before the generic business branch;
        // both live in the same code field.
        match &envelope.code {
            ResponseCode::NotLoggedIn => {
                let current = self.navigator.current_path();
                warn!(from = %current, "session expired, redirecting to login");
                self.notifier
                    .notify(Severity::Warning, &self.messages.message(keys::NEED_LOGIN));
                self.navigator
                    .replace(NavigationTarget::login_with_redirect(current));
                Outcome::SessionExpired(envelope)
            }
            ResponseCode::Other(code) => {
                warn!(code = %code, message = %envelope.message, "business error");
                self.notifier.notify(Severity::Error, &envelope.message);
                Outcome::BusinessError(envelope)
            }
            ResponseCode::Ok => {
                debug!("successful envelope");
                Outcome::Success(envelope.data)
            }
        }
    }
}

impl std::fmt::Debug for ResponseClassifier {
    // Collaborators are trait objects; there is nothing useful to print.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseClassifier").finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{collaborators, envelopes};
    use serde_json::json;

    fn body(value: serde_json::Value) -> Bytes {
        Bytes::from(serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn test_success_envelope_no_side_effects() {
        let world = collaborators::World::online_at("/dashboard");
        let outcome = world
            .classifier()
            .classify_response(200, &body(envelopes::ok(json!({"id": "7"}))));

        assert_eq!(outcome, Outcome::Success(json!({"id": "7"})));
        assert!(world.notifier.notifications().is_empty());
        assert!(world.navigator.replacements().is_empty());
    }

    #[test]
    fn test_session_expired_notifies_once_and_navigates() {
        let world = collaborators::World::online_at("/dashboard");
        let outcome = world
            .classifier()
            .classify_response(200, &body(envelopes::not_logged_in()));

        assert!(matches!(outcome, Outcome::SessionExpired(_)));

        let notifications = world.notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].0, Severity::Warning);
        assert_eq!(notifications[0].1, format!("[{}]", keys::NEED_LOGIN));

        let replacements = world.navigator.replacements();
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].path, LOGIN_PATH);
        assert_eq!(
            replacements[0].query,
            vec![(REDIRECT_PARAM.to_string(), "/dashboard".to_string())]
        );
    }

    #[test]
    fn test_session_expired_checked_before_business_error() {
        // B1001 must take the session branch even though it is also a
        // non-success code.
        let world = collaborators::World::online_at("/schedule");
        let outcome = world
            .classifier()
            .classify_response(200, &body(envelopes::not_logged_in()));
        assert!(matches!(outcome, Outcome::SessionExpired(_)));
        assert_eq!(world.navigator.replacements().len(), 1);
    }

    #[test]
    fn test_business_error_notifies_message_no_navigation() {
        let world = collaborators::World::online_at("/dashboard");
        let outcome = world
            .classifier()
            .classify_response(200, &body(envelopes::business("B2002", "quota exceeded")));

        match outcome {
            Outcome::BusinessError(envelope) => {
                assert_eq!(envelope.message, "quota exceeded");
            }
            other => panic!("expected business error, got {:?}", other),
        }

        let notifications = world.notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0], (Severity::Error, "quota exceeded".to_string()));
        assert!(world.navigator.replacements().is_empty());
    }

    #[test]
    fn test_raw_401_fixed_message_no_navigation() {
        let world = collaborators::World::online_at("/dashboard");
        let outcome = world
            .classifier()
            .classify_response(401, &Bytes::from_static(b"Unauthorized"));

        assert_eq!(outcome, Outcome::Transport(TransportFailure::Status(401)));
        let notifications = world.notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].1, format!("[{}]", keys::SESSION_INVALID));
        // Navigation is reserved for the envelope-based expiry path.
        assert!(world.navigator.replacements().is_empty());
    }

    #[test]
    fn test_other_http_failures_generic_message() {
        let world = collaborators::World::online_at("/dashboard");
        for status in [400u16, 403, 404, 500, 503] {
            let outcome = world
                .classifier()
                .classify_response(status, &Bytes::new());
            assert_eq!(outcome, Outcome::Transport(TransportFailure::Status(status)));
        }
        let notifications = world.notifier.notifications();
        assert_eq!(notifications.len(), 5);
        assert!(notifications
            .iter()
            .all(|(_, text)| text == &format!("[{}]", keys::REQUEST_FAILED)));
    }

    #[test]
    fn test_raw_passthrough_2xx() {
        let world = collaborators::World::online_at("/dashboard");
        let payload = Bytes::from_static(&[0x25, 0x50, 0x44, 0x46]); // %PDF
        let outcome = world.classifier().classify_response(200, &payload);

        assert_eq!(outcome, Outcome::Raw(payload));
        assert!(world.notifier.notifications().is_empty());
    }

    #[test]
    fn test_send_failure_offline_message() {
        let world = collaborators::World::offline_at("/dashboard");
        let outcome = world.classifier().classify_send_failure();

        assert_eq!(outcome, Outcome::Transport(TransportFailure::Offline));
        let notifications = world.notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].1, format!("[{}]", keys::NETWORK_OFFLINE));
    }

    #[test]
    fn test_send_failure_online_message() {
        let world = collaborators::World::online_at("/dashboard");
        let outcome = world.classifier().classify_send_failure();

        assert_eq!(outcome, Outcome::Transport(TransportFailure::Offline));
        assert_eq!(
            world.notifier.notifications()[0].1,
            format!("[{}]", keys::NETWORK_ERROR)
        );
    }

    #[test]
    fn test_redirect_carries_full_current_path() {
        let world = collaborators::World::online_at("/schedule?page=3&size=20");
        world
            .classifier()
            .classify_response(200, &body(envelopes::not_logged_in()));

        let replacements = world.navigator.replacements();
        assert_eq!(
            replacements[0].query[0].1,
            "/schedule?page=3&size=20".to_string()
        );
    }

    #[test]
    fn test_mocked_notifier_receives_resolved_text() {
        // Same branch through mockall, with a catalog that resolves keys to
        // real text instead of echoing them.
        let mut messages = MockMessageLookup::new();
        messages
            .expect_message()
            .withf(|key| key == keys::REQUEST_FAILED)
            .return_const("request failed".to_string());

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|severity, text| *severity == Severity::Error && text == "request failed")
            .times(1)
            .return_const(());

        let mut navigator = MockNavigator::new();
        navigator.expect_replace().times(0).return_const(());
        navigator
            .expect_current_path()
            .return_const("/dashboard".to_string());

        let mut connectivity = MockConnectivityProbe::new();
        connectivity.expect_is_online().return_const(true);

        let classifier = ResponseClassifier::new(
            Arc::new(navigator),
            Arc::new(notifier),
            Arc::new(messages),
            Arc::new(connectivity),
        );
        let outcome = classifier.classify_response(500, &Bytes::new());
        assert_eq!(outcome, Outcome::Transport(TransportFailure::Status(500)));
    }
}
