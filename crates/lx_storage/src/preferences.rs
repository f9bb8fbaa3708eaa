use std::sync::Arc;

use lx_core::{Result, ViewMode};
use tracing::warn;

use crate::KeyValueStore;

pub const VIEW_MODE_KEY: &str = "lexnews-view-mode";
pub const SIDEBAR_KEY: &str = "lexnews-sidebar-open";
pub const TOKEN_KEY: &str = "lexstream_token";

/// Typed access to the persisted UI preferences and the session token.
///
/// Reads never fail: a missing, unparsable or unreadable value falls back
/// to the default.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, store = self.store.name(), "Failed to read preference: {}", e);
                None
            }
        }
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.read(VIEW_MODE_KEY)
            .await
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub async fn set_view_mode(&self, mode: ViewMode) -> Result<()> {
        self.store.set(VIEW_MODE_KEY, mode.as_str()).await
    }

    pub async fn sidebar_open(&self) -> bool {
        self.read(SIDEBAR_KEY)
            .await
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(true)
    }

    pub async fn set_sidebar_open(&self, open: bool) -> Result<()> {
        self.store.set(SIDEBAR_KEY, if open { "true" } else { "false" }).await
    }

    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await
    }

    pub async fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await
    }
}
