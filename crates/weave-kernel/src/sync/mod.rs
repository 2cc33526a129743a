//! Change notification façade over the tree store.
//!
//! Every UI surface (terminal, file manager, editor) mutates the VFS through
//! one shared [`VfsSync`]. A mutation that changed the tree is appended to a
//! bounded operation log and fanned out to every registered [`VfsListener`],
//! even when the save behind it failed. A mutation rejected by the tree is
//! returned unchanged and neither logged nor announced.
//!
//! Reads pass straight through to the store.

mod listener;

pub use listener::VfsListener;

use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use weave_types::{Node, NodeKind, OpKind, OpRecord, OpSource, VfsStats};

use crate::error::{VfsError, VfsResult};
use crate::paths;
use crate::vfs::{FileSearch, TreeStore};

/// Default cap on the operation log.
pub const DEFAULT_OP_LOG_LIMIT: usize = 1000;

/// Handle returned by [`VfsSync::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Source-tagged mutation façade with an operation log and listeners.
pub struct VfsSync {
    store: Arc<TreeStore>,
    log: Mutex<VecDeque<OpRecord>>,
    log_limit: usize,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn VfsListener>)>>,
    next_id: AtomicU64,
}

impl fmt::Debug for VfsSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsSync")
            .field("store", &self.store)
            .field("log_limit", &self.log_limit)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl VfsSync {
    pub fn new(store: Arc<TreeStore>) -> Self {
        Self::with_log_limit(store, DEFAULT_OP_LOG_LIMIT)
    }

    pub fn with_log_limit(store: Arc<TreeStore>, log_limit: usize) -> Self {
        Self {
            store,
            log: Mutex::new(VecDeque::new()),
            log_limit: log_limit.max(1),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<TreeStore> {
        &self.store
    }

    // ── Listeners ───────────────────────────────────────────────────────

    pub fn register(&self, listener: Arc<dyn VfsListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        match listeners.iter().position(|(lid, _)| *lid == id) {
            Some(index) => {
                listeners.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Log the record and notify every listener.
    fn publish(&self, op: OpRecord) {
        tracing::debug!(kind = %op.kind, path = %op.path, source = %op.source, "vfs op");
        {
            let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
            while log.len() >= self.log_limit {
                log.pop_front();
            }
            log.push_back(op.clone());
        }

        // Snapshot so listeners may (un)register without deadlocking
        let listeners: Vec<(ListenerId, Arc<dyn VfsListener>)> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for (id, listener) in listeners {
            match panic::catch_unwind(AssertUnwindSafe(|| listener::dispatch(listener.as_ref(), &op))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(listener = %id, kind = %op.kind, error = %e, "listener failed");
                }
                Err(_) => {
                    tracing::warn!(listener = %id, kind = %op.kind, "listener panicked");
                }
            }
        }
    }

    // ── Operation log ───────────────────────────────────────────────────

    /// Every logged operation, oldest first.
    pub fn history(&self) -> Vec<OpRecord> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// The last `n` operations, oldest first.
    pub fn recent(&self, n: usize) -> Vec<OpRecord> {
        let log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        log.iter().skip(log.len().saturating_sub(n)).cloned().collect()
    }

    pub fn clear_history(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Publish `op` once the tree has changed. A failed save leaves the
    /// change in memory, so it is still announced before the error returns.
    fn announce<T>(&self, result: VfsResult<T>, op: impl FnOnce() -> OpRecord) -> VfsResult<T> {
        match result {
            Ok(value) => {
                self.publish(op());
                Ok(value)
            }
            Err(VfsError::Persistence(e)) => {
                self.publish(op());
                Err(VfsError::Persistence(e))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn create_file(&self, path: &str, content: &str, source: OpSource) -> VfsResult<()> {
        let result = self.store.create_file(path, content).await;
        self.announce(result, || {
            OpRecord::new(OpKind::FileCreated, paths::normalize(path), source).with_content(content)
        })
    }

    pub async fn create_folder(&self, path: &str, source: OpSource) -> VfsResult<()> {
        let result = self.store.create_folder(path).await;
        self.announce(result, || {
            OpRecord::new(OpKind::FolderCreated, paths::normalize(path), source)
        })
    }

    pub async fn update_file(&self, path: &str, content: &str, source: OpSource) -> VfsResult<()> {
        let result = self.store.update_file(path, content).await;
        self.announce(result, || {
            OpRecord::new(OpKind::FileUpdated, paths::normalize(path), source).with_content(content)
        })
    }

    /// Delete a file or folder; the event kind follows what was removed.
    pub async fn delete_node(&self, path: &str, source: OpSource) -> VfsResult<Node> {
        // A failed save drops the removed node, so note its kind up front
        let before = self.store.get_node(path).map(|n| n.kind());
        let result = self.store.delete_node(path).await;
        let kind = match result.as_ref().ok().map(Node::kind).or(before) {
            Some(NodeKind::Folder) => OpKind::FolderDeleted,
            _ => OpKind::FileDeleted,
        };
        self.announce(result, || OpRecord::new(kind, paths::normalize(path), source))
    }

    pub async fn move_node(&self, old_path: &str, new_path: &str, source: OpSource) -> VfsResult<()> {
        let result = self.store.move_node(old_path, new_path).await;
        self.announce(result, || {
            OpRecord::new(OpKind::FileMoved, paths::normalize(old_path), source)
                .with_new_path(paths::normalize(new_path))
        })
    }

    pub async fn copy_node(&self, src: &str, dst: &str, source: OpSource) -> VfsResult<NodeKind> {
        let result = self.store.copy_node(src, dst).await;
        self.announce(result, || {
            OpRecord::new(OpKind::FileCopied, paths::normalize(src), source)
                .with_new_path(paths::normalize(dst))
        })
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn list_dir(&self, path: &str) -> VfsResult<Vec<Node>> {
        self.store.list_children(path)
    }

    pub fn get_file_content(&self, path: &str) -> VfsResult<String> {
        self.store.read_file(path)
    }

    pub fn get_node(&self, path: &str) -> Option<Node> {
        self.store.get_node(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.store.exists(path)
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.store.is_file(path)
    }

    pub fn is_folder(&self, path: &str) -> bool {
        self.store.is_folder(path)
    }

    pub fn stats(&self) -> VfsStats {
        self.store.stats()
    }

    pub fn find_files(&self, pattern: &str, start: &str) -> VfsResult<FileSearch> {
        self.store.find_files(pattern, start)
    }
}
