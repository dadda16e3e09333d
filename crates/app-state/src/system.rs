//! System store: branding, navigation menu, active language
//!
//! State lives behind an async lock and persists as JSON next to the
//! console's other data files. Setters update memory only; callers decide
//! when to flush with [`SystemStore::save`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// System store errors
#[derive(Debug, thiserror::Error)]
pub enum SystemStoreError {
    /// Underlying file I/O failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for system store operations
pub type Result<T> = std::result::Result<T, SystemStoreError>;

// =============================================================================
// State Shapes
// =============================================================================

/// Site branding shown in the console chrome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    /// Site name
    pub name: String,
    /// Logo URL or asset path
    pub logo: String,
    /// Short description shown on the login view
    pub description: String,
}

impl Default for Website {
    fn default() -> Self {
        Self {
            name: "Opsdeck".to_string(),
            logo: "/logo.svg".to_string(),
            description: "Operations console".to_string(),
        }
    }
}

/// One entry in the console's side navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    /// Display name
    pub name: String,
    /// Console path the entry links to
    pub path: String,
    /// Icon identifier
    pub icon: String,
}

impl NavEntry {
    fn new(name: &str, path: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The default menu mirrors the console's authenticated routes.
fn default_navigation() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Dashboard", "/dashboard", "dashboard"),
        NavEntry::new("Schedule", "/schedule", "clock"),
        NavEntry::new("Notifications", "/notification", "bell"),
        NavEntry::new("Settings", "/setting", "gear"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SystemState {
    website: Website,
    navigation: Vec<NavEntry>,
    language: String,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            website: Website::default(),
            navigation: default_navigation(),
            language: "en".to_string(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Persisted system state
pub struct SystemStore {
    state: RwLock<SystemState>,
    storage_path: PathBuf,
}

impl SystemStore {
    /// Create a store with default state, persisting to the given path
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            state: RwLock::new(SystemState::default()),
            storage_path: storage_path.into(),
        }
    }

    /// Load a store from disk, falling back to defaults when the file is
    /// missing
    pub async fn load(storage_path: impl Into<PathBuf>) -> Result<Self> {
        let storage_path = storage_path.into();
        let state = match tokio::fs::read(&storage_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %storage_path.display(), "No persisted system state, using defaults");
                SystemState::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            state: RwLock::new(state),
            storage_path,
        })
    }

    /// Write the current state to disk
    pub async fn save(&self) -> Result<()> {
        let state = self.state.read().await;
        let json = serde_json::to_vec_pretty(&*state)?;
        if let Some(parent) = self.storage_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.storage_path, json).await?;
        debug!(path = %self.storage_path.display(), "Persisted system state");
        Ok(())
    }

    /// Where the store persists to
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Current site branding
    pub async fn website(&self) -> Website {
        self.state.read().await.website.clone()
    }

    /// Replace the site branding; `None` restores the defaults
    pub async fn set_website(&self, website: Option<Website>) {
        self.state.write().await.website = website.unwrap_or_default();
    }

    /// Current navigation menu
    pub async fn navigation(&self) -> Vec<NavEntry> {
        self.state.read().await.navigation.clone()
    }

    /// Replace the navigation menu
    pub async fn set_navigation(&self, navigation: Vec<NavEntry>) {
        self.state.write().await.navigation = navigation;
    }

    /// Active language tag
    pub async fn language(&self) -> String {
        self.state.read().await.language.clone()
    }

    /// Switch the active language tag
    pub async fn set_language(&self, language: impl Into<String>) {
        self.state.write().await.language = language.into();
    }
}

impl std::fmt::Debug for SystemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemStore")
            .field("storage_path", &self.storage_path)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults() {
        let store = SystemStore::new("/tmp/unused.json");
        assert_eq!(store.website().await.name, "Opsdeck");
        assert_eq!(store.language().await, "en");

        let navigation = store.navigation().await;
        assert_eq!(navigation.len(), 4);
        assert_eq!(navigation[0].path, "/dashboard");
    }

    #[tokio::test]
    async fn test_setters_update_state() {
        let store = SystemStore::new("/tmp/unused.json");

        store.set_language("zh-CN").await;
        assert_eq!(store.language().await, "zh-CN");

        store
            .set_website(Some(Website {
                name: "Acme Ops".to_string(),
                logo: "/acme.png".to_string(),
                description: "Acme operations".to_string(),
            }))
            .await;
        assert_eq!(store.website().await.name, "Acme Ops");

        // None restores the defaults.
        store.set_website(None).await;
        assert_eq!(store.website().await, Website::default());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");

        let store = SystemStore::new(&path);
        store.set_language("zh-CN").await;
        store
            .set_navigation(vec![NavEntry::new("Dashboard", "/dashboard", "dashboard")])
            .await;
        store.save().await.unwrap();

        let reloaded = SystemStore::load(&path).await.unwrap();
        assert_eq!(reloaded.language().await, "zh-CN");
        assert_eq!(reloaded.navigation().await.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let store = SystemStore::load(&path).await.unwrap();
        assert_eq!(store.website().await, Website::default());
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let err = SystemStore::load(&path).await.unwrap_err();
        assert!(matches!(err, SystemStoreError::Serialization(_)));
    }

    #[test]
    fn test_state_wire_shape_is_camel_case() {
        let json = serde_json::to_value(SystemState::default()).unwrap();
        assert!(json.get("website").is_some());
        assert!(json.get("navigation").is_some());
        assert!(json.get("language").is_some());
    }
}
