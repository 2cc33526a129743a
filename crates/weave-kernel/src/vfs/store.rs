//! Shared, persisted tree.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use weave_types::{Node, NodeKind, VfsStats};

use super::search::FileSearch;
use super::tree::Tree;
use crate::error::{VfsError, VfsResult};
use crate::persist::{KvPersistence, Persistence};

/// The tree behind a lock, saved after every mutation.
///
/// Reads are synchronous and return owned copies. Mutations are async:
/// each one takes the write lock, applies the change, then saves a
/// snapshot of the whole tree before the next mutation may start, so
/// saves land in the same order as the changes they capture.
///
/// A failed save is reported to the caller but the in-memory change is
/// kept.
pub struct TreeStore {
    tree: RwLock<Tree>,
    persistence: Arc<dyn Persistence>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("persistence", &self.persistence.name())
            .finish_non_exhaustive()
    }
}

impl TreeStore {
    pub fn new(tree: Tree, persistence: Arc<dyn Persistence>) -> Self {
        Self {
            tree: RwLock::new(tree),
            persistence,
            write_lock: Mutex::new(()),
        }
    }

    /// An empty tree saved to a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Tree::new(), Arc::new(KvPersistence::in_memory()))
    }

    pub fn persistence(&self) -> &Arc<dyn Persistence> {
        &self.persistence
    }

    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn get_node(&self, path: &str) -> Option<Node> {
        self.read().get_node(path).cloned()
    }

    pub fn list_children(&self, path: &str) -> VfsResult<Vec<Node>> {
        self.read().list_children(path).map(<[Node]>::to_vec)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.read().get_node(path).is_some()
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.read().get_node(path).is_some_and(Node::is_file)
    }

    pub fn is_folder(&self, path: &str) -> bool {
        self.read().get_node(path).is_some_and(Node::is_folder)
    }

    /// Content of the file at `path`.
    pub fn read_file(&self, path: &str) -> VfsResult<String> {
        let tree = self.read();
        match tree.get_node(path) {
            Some(Node::File(file)) => Ok(file.content.clone()),
            Some(Node::Folder(_)) => Err(VfsError::NotAFile(crate::paths::normalize(path))),
            None => Err(VfsError::NotFound(crate::paths::normalize(path))),
        }
    }

    pub fn stats(&self) -> VfsStats {
        self.read().stats()
    }

    pub fn find_files(&self, pattern: &str, start: &str) -> VfsResult<FileSearch> {
        self.read().find_files(pattern, start)
    }

    /// A copy of the whole tree.
    pub fn snapshot(&self) -> Tree {
        self.read().clone()
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Apply `op` under the write lock, then save the result.
    async fn commit<T>(&self, op: impl FnOnce(&mut Tree) -> VfsResult<T> + Send) -> VfsResult<T> {
        let _ordered = self.write_lock.lock().await;
        let (value, root) = {
            let mut tree = self.write();
            let value = op(&mut *tree)?;
            (value, tree.root().clone())
        };
        if let Err(e) = self.persistence.save(&root).await {
            tracing::warn!(backend = self.persistence.name(), error = %e, "save failed");
            return Err(e.into());
        }
        Ok(value)
    }

    #[tracing::instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    pub async fn create_file(&self, path: &str, content: &str) -> VfsResult<()> {
        self.commit(|tree| tree.create_file(path, content)).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn create_folder(&self, path: &str) -> VfsResult<()> {
        self.commit(|tree| tree.create_folder(path)).await
    }

    #[tracing::instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    pub async fn update_file(&self, path: &str, content: &str) -> VfsResult<()> {
        self.commit(|tree| tree.update_file(path, content)).await
    }

    /// Delete a node, returning what was removed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_node(&self, path: &str) -> VfsResult<Node> {
        self.commit(|tree| tree.delete_node(path)).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn move_node(&self, old_path: &str, new_path: &str) -> VfsResult<()> {
        self.commit(|tree| tree.move_node(old_path, new_path)).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn copy_node(&self, src: &str, dst: &str) -> VfsResult<NodeKind> {
        self.commit(|tree| tree.copy_node(src, dst)).await
    }

    /// Save the current tree without changing it.
    pub async fn save(&self) -> VfsResult<()> {
        self.commit(|_| Ok(())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts saves and can be told to fail.
    #[derive(Default)]
    struct CountingPersistence {
        saves: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Persistence for CountingPersistence {
        fn name(&self) -> &str {
            "counting"
        }

        async fn save(&self, _root: &Node) -> Result<(), PersistenceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PersistenceError::Backend("disk full".into()));
            }
            Ok(())
        }

        async fn load(&self) -> Result<Option<Node>, PersistenceError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn mutations_are_visible_to_reads() {
        let store = TreeStore::in_memory();
        store.create_folder("/docs").await.unwrap();
        store.create_file("/docs/a.txt", "hello").await.unwrap();

        assert!(store.is_folder("/docs"));
        assert!(store.is_file("/docs/a.txt"));
        assert_eq!(store.read_file("/docs/a.txt").unwrap(), "hello");
        assert_eq!(store.list_children("/docs").unwrap().len(), 1);
        assert!(!store.exists("/missing"));
    }

    #[tokio::test]
    async fn every_successful_mutation_saves_once() {
        let persistence = Arc::new(CountingPersistence::default());
        let store = TreeStore::new(Tree::new(), persistence.clone());

        store.create_folder("/a").await.unwrap();
        store.create_file("/a/f", "x").await.unwrap();
        store.copy_node("/a/f", "/a/g").await.unwrap();
        store.move_node("/a/g", "/h").await.unwrap();
        store.delete_node("/h").await.unwrap();
        assert_eq!(persistence.saves.load(Ordering::SeqCst), 5);

        // Failed preconditions never reach the backend
        assert!(store.create_folder("/a").await.is_err());
        assert_eq!(persistence.saves.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn failed_save_is_reported_but_change_kept() {
        let persistence = Arc::new(CountingPersistence {
            fail: true,
            ..Default::default()
        });
        let store = TreeStore::new(Tree::new(), persistence);

        let err = store.create_file("/x", "1").await.unwrap_err();
        assert!(matches!(err, VfsError::Persistence(_)));
        assert!(store.exists("/x"));
    }

    #[tokio::test]
    async fn read_file_on_folder_is_an_error() {
        let store = TreeStore::in_memory();
        store.create_folder("/d").await.unwrap();
        assert!(matches!(store.read_file("/d"), Err(VfsError::NotAFile(_))));
        assert!(matches!(store.read_file("/nope"), Err(VfsError::NotFound(_))));
    }

    #[tokio::test]
    async fn snapshot_is_detached() {
        let store = TreeStore::in_memory();
        store.create_file("/a", "1").await.unwrap();
        let snapshot = store.snapshot();
        store.delete_node("/a").await.unwrap();
        assert!(snapshot.get_node("/a").is_some());
        assert!(!store.exists("/a"));
    }

    #[tokio::test]
    async fn concurrent_writers_all_land() {
        let store = Arc::new(TreeStore::in_memory());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_file(&format!("/f{i}"), "x").await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.stats().file_count, 16);
    }
}
