//! Persistence adapters.
//!
//! The tree is saved after every mutation and loaded once at startup.
//! Two families of backend sit behind the same [`Persistence`] trait:
//!
//! - **Key-value** ([`KvPersistence`]): the whole tree as one JSON document
//!   under a fixed key, in any [`KeyValueStore`] (`MemoryKv`, `FileKv`)
//! - **Object store** ([`ObjectPersistence`]): one record per node in a
//!   remote file-object API ([`ObjectStore`])
//!
//! ```text
//! TreeStore ──▶ dyn Persistence
//!               ├── KvPersistence ──▶ dyn KeyValueStore (MemoryKv │ FileKv)
//!               └── ObjectPersistence ──▶ dyn ObjectStore (MemoryObjectStore │ remote)
//! ```

mod kv;
mod object;

pub use kv::{FileKv, KeyValueStore, KvPersistence, MemoryKv, TREE_KEY};
pub use object::{MemoryObjectStore, ObjectPersistence, ObjectRecord, ObjectStore, UploadFile};

use async_trait::async_trait;
use weave_types::Node;

use crate::error::PersistenceError;

/// Durable storage for the whole tree.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Short backend name, for logs.
    fn name(&self) -> &str;

    /// Save the tree rooted at `root`, replacing any previous state.
    async fn save(&self, root: &Node) -> Result<(), PersistenceError>;

    /// Load the last saved tree, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<Node>, PersistenceError>;
}
