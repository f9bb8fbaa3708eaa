use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lx_core::Result;

pub mod backends;
pub mod preferences;

pub use backends::*;
pub use preferences::Preferences;

/// Small string key-value store for client-side preferences.
///
/// Nothing kept here is authoritative; losing it only resets the UI.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    fn name(&self) -> &str;
}

/// Opens the file store at `path`, or an in-memory store when no path is given.
pub async fn open_store(path: Option<&Path>) -> Result<Arc<dyn KeyValueStore>> {
    match path {
        Some(path) => Ok(Arc::new(FileStore::open(path).await?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{open_store, KeyValueStore, Preferences};
}
