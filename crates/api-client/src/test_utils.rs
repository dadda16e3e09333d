//! Test utilities and fixtures for pipeline testing
//!
//! This module provides envelope fixtures and recording collaborator
//! implementations so the classifier and the full client pipeline can be
//! asserted against without a browser environment.

#![allow(dead_code)] // Test utilities may not all be used yet

/// Envelope body fixtures in the backend's wire shape
pub mod envelopes {
    use crate::envelope::{NOT_LOGGED_IN_CODE, SUCCESS_CODE};
    use serde_json::{json, Value};

    /// Successful envelope wrapping `data`
    pub fn ok(data: Value) -> Value {
        json!({ "code": SUCCESS_CODE, "message": "ok", "data": data })
    }

    /// The reserved session-expired envelope
    pub fn not_logged_in() -> Value {
        json!({ "code": NOT_LOGGED_IN_CODE, "message": "not logged in", "data": null })
    }

    /// A generic business-error envelope
    pub fn business(code: &str, message: &str) -> Value {
        json!({ "code": code, "message": message, "data": null })
    }

    /// A one-page paged result wrapping `rows`
    pub fn page(current: u64, size: u64, total: u64, rows: Value) -> Value {
        ok(json!({ "current": current, "size": size, "total": total, "data": rows }))
    }
}

/// Recording collaborator implementations
pub mod collaborators {
    use crate::classify::{
        ConnectivityProbe, MessageLookup, NavigationTarget, Navigator, Notifier,
        ResponseClassifier, Severity,
    };
    use std::sync::{Arc, Mutex};

    /// Navigator that records every replacement instead of navigating
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        current: Mutex<String>,
        replaced: Mutex<Vec<NavigationTarget>>,
    }

    impl RecordingNavigator {
        /// Navigator positioned at `path`
        pub fn at(path: impl Into<String>) -> Self {
            Self {
                current: Mutex::new(path.into()),
                replaced: Mutex::new(Vec::new()),
            }
        }

        /// Every replacement performed so far, in order
        pub fn replacements(&self) -> Vec<NavigationTarget> {
            self.replaced.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_path(&self) -> String {
            self.current.lock().unwrap().clone()
        }

        fn replace(&self, target: NavigationTarget) {
            self.replaced.lock().unwrap().push(target);
        }
    }

    /// Notifier that records every notification
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        events: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingNotifier {
        /// Every notification shown so far, in order
        pub fn notifications(&self) -> Vec<(Severity, String)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    /// Message lookup that echoes the key as `[key]`, making it easy to
    /// assert which key a branch resolved
    #[derive(Debug, Default)]
    pub struct KeyEcho;

    impl MessageLookup for KeyEcho {
        fn message(&self, key: &str) -> String {
            format!("[{}]", key)
        }
    }

    /// Connectivity probe pinned to one answer
    #[derive(Debug)]
    pub struct FixedConnectivity(pub bool);

    impl ConnectivityProbe for FixedConnectivity {
        fn is_online(&self) -> bool {
            self.0
        }
    }

    /// A full collaborator set wired for one test scenario
    pub struct World {
        /// Recording navigator, positioned somewhere
        pub navigator: Arc<RecordingNavigator>,
        /// Recording notifier
        pub notifier: Arc<RecordingNotifier>,
        /// Key-echoing message lookup
        pub messages: Arc<KeyEcho>,
        /// Pinned connectivity probe
        pub connectivity: Arc<FixedConnectivity>,
    }

    impl World {
        /// Online world with the user at `path`
        pub fn online_at(path: impl Into<String>) -> Self {
            Self::at(path, true)
        }

        /// Offline world with the user at `path`
        pub fn offline_at(path: impl Into<String>) -> Self {
            Self::at(path, false)
        }

        fn at(path: impl Into<String>, online: bool) -> Self {
            Self {
                navigator: Arc::new(RecordingNavigator::at(path)),
                notifier: Arc::new(RecordingNotifier::default()),
                messages: Arc::new(KeyEcho),
                connectivity: Arc::new(FixedConnectivity(online)),
            }
        }

        /// Build a classifier over this world's collaborators
        pub fn classifier(&self) -> ResponseClassifier {
            ResponseClassifier::new(
                Arc::clone(&self.navigator) as Arc<dyn Navigator>,
                Arc::clone(&self.notifier) as Arc<dyn Notifier>,
                Arc::clone(&self.messages) as Arc<dyn MessageLookup>,
                Arc::clone(&self.connectivity) as Arc<dyn ConnectivityProbe>,
            )
        }
    }
}
