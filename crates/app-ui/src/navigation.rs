//! Navigation for the Opsdeck console
//!
//! This module provides the console's route table, a URL router, and a
//! history stack. The HTTP pipeline's classifier navigates through
//! [`HistoryNavigator`] when it detects an expired session; everything else
//! here is ordinary view navigation.

use api_client::{NavigationTarget, Navigator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Parameters extracted while matching a route
pub type RouteParams = HashMap<String, String>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All routes in the console
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Console root; redirects to the dashboard
    #[default]
    Home,
    /// Statistics overview
    Dashboard,
    /// Scheduled jobs
    Schedule,
    /// Console settings
    Setting,
    /// Notification center
    Notification,
    /// Login view
    Login {
        /// Where to return after re-authenticating
        #[serde(skip_serializing_if = "Option::is_none")]
        redirect_url: Option<String>,
    },
    /// Not found
    NotFound,
}

impl Route {
    /// Get the URL path for this route, including query parameters
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Schedule => "/schedule".to_string(),
            Route::Setting => "/setting".to_string(),
            Route::Notification => "/notification".to_string(),
            Route::Login { redirect_url } => match redirect_url {
                Some(url) => format!("/login?redirectURL={}", urlencoding::encode(url)),
                None => "/login".to_string(),
            },
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Whether this route needs an authenticated session
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Schedule | Route::Setting | Route::Notification
        )
    }

    /// Display title for this route
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Dashboard => "Dashboard",
            Route::Schedule => "Schedule",
            Route::Setting => "Settings",
            Route::Notification => "Notifications",
            Route::Login { .. } => "Log In",
            Route::NotFound => "Not Found",
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// URL router over the console's static route table
#[derive(Debug, Default)]
pub struct Router;

impl Router {
    /// Create a router
    pub fn new() -> Self {
        Self
    }

    /// Match a path (optionally with a query string) to a route
    pub fn match_path(&self, path: &str) -> Route {
        let (pathname, query) = match path.find('?') {
            Some(idx) => (&path[..idx], Some(&path[idx + 1..])),
            None => (path, None),
        };
        let params = Self::parse_query(query);

        match pathname.trim_end_matches('/') {
            "" => Route::Home,
            "/dashboard" => Route::Dashboard,
            "/schedule" => Route::Schedule,
            "/setting" => Route::Setting,
            "/notification" => Route::Notification,
            "/login" => Route::Login {
                redirect_url: params.get("redirectURL").cloned(),
            },
            _ => Route::NotFound,
        }
    }

    fn parse_query(query: Option<&str>) -> RouteParams {
        let mut params = RouteParams::new();
        if let Some(query) = query {
            for pair in query.split('&') {
                if let Some((key, value)) = pair.split_once('=') {
                    if let Ok(decoded) = urlencoding::decode(value) {
                        params.insert(key.to_string(), decoded.into_owned());
                    }
                }
            }
        }
        params
    }
}

// =============================================================================
// History
// =============================================================================

/// Navigation history with push and replace semantics
///
/// `replace` swaps the current entry instead of growing the stack; the
/// session-expiry redirect always replaces so "back" never returns to a view
/// that needed the dead session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    /// Create a history rooted at a route
    pub fn new(root: Route) -> Self {
        Self { entries: vec![root] }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    /// Replace the current entry
    pub fn replace(&mut self, route: Route) {
        if let Some(last) = self.entries.last_mut() {
            *last = route;
        }
    }

    /// Pop the current entry; returns false when already at the root
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// The current route
    pub fn current(&self) -> &Route {
        self.entries.last().expect("history is never empty")
    }

    /// Stack depth
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

// =============================================================================
// Navigator Implementation
// =============================================================================

/// Bridges the pipeline's [`Navigator`] collaborator onto a shared [`History`]
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    history: Arc<Mutex<History>>,
    router: Arc<Router>,
}

impl HistoryNavigator {
    /// Create a navigator over a shared history
    pub fn new(history: Arc<Mutex<History>>) -> Self {
        Self {
            history,
            router: Arc::new(Router::new()),
        }
    }

    /// Create a navigator rooted at one route, returning both handles
    pub fn rooted_at(root: Route) -> (Self, Arc<Mutex<History>>) {
        let history = Arc::new(Mutex::new(History::new(root)));
        (Self::new(Arc::clone(&history)), history)
    }

    fn target_to_path(target: &NavigationTarget) -> String {
        if target.query.is_empty() {
            return target.path.clone();
        }
        let query = target
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", target.path, query)
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.history
            .lock()
            .map(|h| h.current().to_path())
            .unwrap_or_default()
    }

    fn replace(&self, target: NavigationTarget) {
        let route = self.router.match_path(&Self::target_to_path(&target));
        if let Ok(mut history) = self.history.lock() {
            history.replace(route);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
