//! Key-value persistence: the tree as one JSON document.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use weave_types::Node;

use super::Persistence;
use crate::error::PersistenceError;

/// Key under which the serialized tree is stored.
pub const TREE_KEY: &str = "weave-os-vfs";

/// A string-to-string store, like browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory key-value store. All data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key-value store on the host filesystem: one `<key>.json` file per key.
///
/// Writes go to a temporary file that is then renamed over the target, so
/// a crash mid-save never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileKv {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &target).await?;
        Ok(())
    }
}

/// Persists the tree as JSON under [`TREE_KEY`].
///
/// Timestamps are serialized as RFC 3339 strings and parsed back into
/// `DateTime<Utc>` on load.
pub struct KvPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: TREE_KEY.to_string(),
        }
    }

    /// Backed by a fresh [`MemoryKv`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKv::new()))
    }

    /// Backed by a [`FileKv`] rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileKv::new(dir)))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

#[async_trait]
impl Persistence for KvPersistence {
    fn name(&self) -> &str {
        "key-value"
    }

    async fn save(&self, root: &Node) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(root)?;
        tracing::debug!(key = %self.key, bytes = json.len(), "saving tree");
        self.store.set(&self.key, &json).await
    }

    async fn load(&self) -> Result<Option<Node>, PersistenceError> {
        let Some(json) = self.store.get(&self.key).await? else {
            tracing::debug!(key = %self.key, "no saved tree");
            return Ok(None);
        };
        let root = serde_json::from_str(&json)?;
        Ok(Some(root))
    }
}
