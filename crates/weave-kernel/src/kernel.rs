//! The Kernel: builds the VFS stack from a [`KernelConfig`].
//!
//! ```text
//! KernelConfig ──▶ Persistence ──load──▶ Tree (or seeded default)
//!                       │
//!                  TreeStore ──▶ VfsSync ──▶ Shell (one per session)
//! ```
//!
//! There is exactly one tree per kernel. Every UI surface gets the same
//! [`VfsSync`] so they all observe the same mutations.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use weave_types::VfsStats;

use crate::paths;
use crate::persist::{KvPersistence, ObjectPersistence, ObjectStore, Persistence};
use crate::shell::{DEFAULT_COLUMNS, DEFAULT_HISTORY_LIMIT, Shell};
use crate::sync::{DEFAULT_OP_LOG_LIMIT, VfsSync};
use crate::vfs::{Tree, TreeStore, seed};

/// Where the tree is saved.
#[derive(Clone, Default)]
pub enum PersistenceConfig {
    /// In-process key-value store; nothing survives the process.
    #[default]
    Memory,
    /// One JSON document in `dir`.
    File { dir: PathBuf },
    /// One record per node in a remote object store.
    ObjectStore(Arc<dyn ObjectStore>),
}

impl fmt::Debug for PersistenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceConfig::Memory => f.write_str("Memory"),
            PersistenceConfig::File { dir } => f.debug_struct("File").field("dir", dir).finish(),
            PersistenceConfig::ObjectStore(_) => f.write_str("ObjectStore(..)"),
        }
    }
}

impl PersistenceConfig {
    fn build(&self) -> Arc<dyn Persistence> {
        match self {
            PersistenceConfig::Memory => Arc::new(KvPersistence::in_memory()),
            PersistenceConfig::File { dir } => Arc::new(KvPersistence::in_dir(dir.clone())),
            PersistenceConfig::ObjectStore(store) => Arc::new(ObjectPersistence::new(store.clone())),
        }
    }
}

/// Configuration for kernel initialization.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Name of this kernel (for logs).
    pub name: String,

    /// User name for the shell and the seeded home directory.
    pub user: String,

    /// Home directory. Defaults to `/home/<user>`.
    pub home: Option<String>,

    pub persistence: PersistenceConfig,

    /// Shell history entries kept.
    pub history_limit: usize,

    /// Sync-layer operation log entries kept.
    pub op_log_limit: usize,

    /// Seed the default directory structure when nothing was saved.
    pub seed_defaults: bool,

    /// Display width for multi-column `ls`.
    pub columns: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::transient()
    }
}

impl KernelConfig {
    /// Create a transient kernel config (memory only, for temporary use).
    pub fn transient() -> Self {
        Self {
            name: "transient".to_string(),
            user: "user".to_string(),
            home: None,
            persistence: PersistenceConfig::Memory,
            history_limit: DEFAULT_HISTORY_LIMIT,
            op_log_limit: DEFAULT_OP_LOG_LIMIT,
            seed_defaults: true,
            columns: DEFAULT_COLUMNS,
        }
    }

    /// Create a config that saves to `dir` on the host.
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        Self {
            name: "persistent".to_string(),
            persistence: PersistenceConfig::File { dir: dir.into() },
            ..Self::transient()
        }
    }

    /// Create a kernel config with the given name (memory only).
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::transient()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_persistence(mut self, persistence: PersistenceConfig) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_op_log_limit(mut self, limit: usize) -> Self {
        self.op_log_limit = limit;
        self
    }

    /// Start from an empty tree instead of the default structure.
    pub fn with_seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// The effective home directory.
    pub fn home_dir(&self) -> String {
        match &self.home {
            Some(home) => paths::normalize(home),
            None => paths::join("/home", &self.user),
        }
    }
}

/// Owns the shared tree and hands out shells.
pub struct Kernel {
    config: KernelConfig,
    home: String,
    store: Arc<TreeStore>,
    sync: Arc<VfsSync>,
}

impl Kernel {
    /// Load the saved tree, or seed a default one, and wire up the stack.
    ///
    /// A failed load is logged and treated as "nothing saved".
    pub async fn new(config: KernelConfig) -> Result<Self> {
        let persistence = config.persistence.build();
        let home = config.home_dir();

        let loaded = match persistence.load().await {
            Ok(Some(root)) => match Tree::from_root(root) {
                Ok(tree) => Some(tree),
                Err(e) => {
                    tracing::warn!(kernel = %config.name, error = %e, "saved tree is unusable");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    kernel = %config.name,
                    backend = persistence.name(),
                    error = %e,
                    "failed to load saved tree"
                );
                None
            }
        };

        let (tree, fresh) = match loaded {
            Some(tree) => {
                tracing::debug!(kernel = %config.name, "restored saved tree");
                (tree, false)
            }
            None if config.seed_defaults => (
                seed::default_tree(&config.user, &home)
                    .with_context(|| format!("seeding default tree for {}", config.user))?,
                true,
            ),
            None => (Tree::new(), false),
        };

        let store = Arc::new(TreeStore::new(tree, persistence));
        if fresh {
            store.save().await.context("saving seeded tree")?;
        }
        let sync = Arc::new(VfsSync::with_log_limit(store.clone(), config.op_log_limit));

        Ok(Self {
            config,
            home,
            store,
            sync,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn store(&self) -> &Arc<TreeStore> {
        &self.store
    }

    /// The shared notification façade for UI surfaces.
    pub fn vfs(&self) -> &Arc<VfsSync> {
        &self.sync
    }

    pub fn stats(&self) -> VfsStats {
        self.store.stats()
    }

    /// A new shell session over the shared VFS.
    pub fn shell(&self) -> Shell {
        Shell::new(self.sync.clone(), self.config.user.clone(), self.home.clone())
            .with_history_limit(self.config.history_limit)
            .with_columns(self.config.columns)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.config.name)
            .field("home", &self.home)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryObjectStore;
    use weave_types::OpSource;

    #[tokio::test]
    async fn transient_kernel_is_seeded() {
        let kernel = Kernel::new(KernelConfig::transient().with_user("ada")).await.unwrap();
        assert_eq!(kernel.home(), "/home/ada");
        assert!(kernel.vfs().is_folder("/home/ada/Documents"));
        assert!(kernel.vfs().is_file("/etc/motd"));
    }

    #[tokio::test]
    async fn unseeded_kernel_is_empty() {
        let kernel = Kernel::new(KernelConfig::transient().with_seed_defaults(false))
            .await
            .unwrap();
        assert_eq!(kernel.stats(), VfsStats::default());
    }

    #[tokio::test]
    async fn shell_starts_in_home() {
        let kernel = Kernel::new(KernelConfig::named("t").with_user("ada")).await.unwrap();
        let mut shell = kernel.shell();
        assert_eq!(shell.cwd(), "/home/ada");
        let result = shell.execute("whoami").await;
        assert_eq!(result.out, "ada\n");
    }

    #[tokio::test]
    async fn object_store_kernel_survives_restart() {
        let store = Arc::new(MemoryObjectStore::new());
        let config = KernelConfig::named("obj")
            .with_user("ada")
            .with_persistence(PersistenceConfig::ObjectStore(store.clone()));

        let kernel = Kernel::new(config.clone()).await.unwrap();
        kernel
            .vfs()
            .create_file("/tmp/x.txt", "kept", OpSource::FileManager)
            .await
            .unwrap();
        drop(kernel);

        let kernel = Kernel::new(config).await.unwrap();
        assert_eq!(kernel.vfs().get_file_content("/tmp/x.txt").unwrap(), "kept");
    }

    #[test]
    fn home_dir_defaults_from_user() {
        assert_eq!(KernelConfig::transient().with_user("bob").home_dir(), "/home/bob");
        assert_eq!(KernelConfig::transient().with_home("/u/bob/").home_dir(), "/u/bob");
    }
}
