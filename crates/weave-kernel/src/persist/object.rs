//! Object-store persistence: one remote record per node.
//!
//! The remote API addresses records by opaque id and groups them by the
//! directory path that contains them. Saving reconciles the remote records
//! with the tree; loading rebuilds the tree from the records, taking
//! timestamps from `createdAt`/`updatedAt`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use weave_types::{FileNode, FolderNode, Node};

use super::Persistence;
use crate::error::PersistenceError;
use crate::paths;

/// A file or directory record as exchanged with the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    pub id: String,
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Directory containing the record (`/` at top level).
    pub path: String,
    /// Id of the containing directory record, `None` at top level.
    pub parent: Option<String>,
}

impl ObjectRecord {
    /// Absolute VFS path of the record itself.
    pub fn full_path(&self) -> String {
        paths::join(&self.path, &self.name)
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: String,
}

/// Remote file-object API.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Records directly inside the directory at `path`.
    async fn list(&self, path: &str) -> Result<Vec<ObjectRecord>, PersistenceError>;

    /// Upload a new file into the directory at `path`.
    async fn upload(&self, file: UploadFile, path: &str) -> Result<ObjectRecord, PersistenceError>;

    async fn get_content(&self, id: &str) -> Result<String, PersistenceError>;

    async fn update_content(&self, id: &str, content: &str)
    -> Result<ObjectRecord, PersistenceError>;

    /// Delete a record; deleting a directory deletes everything in it.
    async fn delete(&self, id: &str) -> Result<(), PersistenceError>;

    /// Create a directory named `name` inside the directory at `path`.
    async fn create_folder(&self, name: &str, path: &str) -> Result<ObjectRecord, PersistenceError>;
}

#[derive(Debug)]
struct StoredObject {
    record: ObjectRecord,
    content: Option<String>,
}

#[derive(Debug, Default)]
struct ObjectState {
    objects: Vec<StoredObject>,
    next_id: u64,
}

impl ObjectState {
    fn find(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.record.id == id)
    }

    /// Resolve the parent directory id for a new record at `path`.
    fn parent_id(&self, path: &str) -> Result<Option<String>, PersistenceError> {
        if paths::is_root(path) {
            return Ok(None);
        }
        self.objects
            .iter()
            .find(|o| o.record.is_directory && o.record.full_path() == path)
            .map(|o| Some(o.record.id.clone()))
            .ok_or_else(|| PersistenceError::NotFound(path.to_string()))
    }

    fn insert(
        &mut self,
        name: &str,
        path: &str,
        content: Option<String>,
    ) -> Result<ObjectRecord, PersistenceError> {
        let path = paths::normalize(path);
        let parent = self.parent_id(&path)?;
        if self
            .objects
            .iter()
            .any(|o| o.record.path == path && o.record.name == name)
        {
            return Err(PersistenceError::Backend(format!(
                "{} already exists",
                paths::join(&path, name)
            )));
        }
        self.next_id += 1;
        let now = Utc::now();
        let record = ObjectRecord {
            id: format!("obj-{}", self.next_id),
            name: name.to_string(),
            is_directory: content.is_none(),
            size: content.as_ref().map_or(0, |c| c.len() as u64),
            created_at: now,
            updated_at: now,
            path,
            parent,
        };
        self.objects.push(StoredObject {
            record: record.clone(),
            content,
        });
        Ok(record)
    }
}

/// In-process object store with the same semantics as the remote service.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    state: Mutex<ObjectState>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .objects
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list(&self, path: &str) -> Result<Vec<ObjectRecord>, PersistenceError> {
        let path = paths::normalize(path);
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .objects
            .iter()
            .filter(|o| o.record.path == path)
            .map(|o| o.record.clone())
            .collect())
    }

    async fn upload(&self, file: UploadFile, path: &str) -> Result<ObjectRecord, PersistenceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.insert(&file.name, path, Some(file.content))
    }

    async fn get_content(&self, id: &str) -> Result<String, PersistenceError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let index = state
            .find(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        state.objects[index]
            .content
            .clone()
            .ok_or_else(|| PersistenceError::Backend(format!("{id} is a directory")))
    }

    async fn update_content(
        &self,
        id: &str,
        content: &str,
    ) -> Result<ObjectRecord, PersistenceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let index = state
            .find(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        let object = &mut state.objects[index];
        if object.record.is_directory {
            return Err(PersistenceError::Backend(format!("{id} is a directory")));
        }
        object.content = Some(content.to_string());
        object.record.size = content.len() as u64;
        object.record.updated_at = Utc::now();
        Ok(object.record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let index = state
            .find(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        let removed = state.objects.remove(index).record;
        if removed.is_directory {
            let prefix = removed.full_path();
            state
                .objects
                .retain(|o| !paths::is_within(&o.record.path, &prefix));
        }
        Ok(())
    }

    async fn create_folder(&self, name: &str, path: &str) -> Result<ObjectRecord, PersistenceError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.insert(name, path, None)
    }
}

/// Persists the tree as individual records in an [`ObjectStore`].
pub struct ObjectPersistence {
    store: Arc<dyn ObjectStore>,
}

impl ObjectPersistence {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Every record in the store, parents before children.
    async fn collect(&self) -> Result<Vec<ObjectRecord>, PersistenceError> {
        let mut queue = VecDeque::from([paths::ROOT.to_string()]);
        let mut records = Vec::new();
        while let Some(dir) = queue.pop_front() {
            for record in self.store.list(&dir).await? {
                if record.is_directory {
                    queue.push_back(record.full_path());
                }
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn delete_quietly(&self, id: &str) -> Result<(), PersistenceError> {
        match self.store.delete(id).await {
            // Already gone with a deleted parent directory
            Err(PersistenceError::NotFound(_)) => Ok(()),
            other => other,
        }
    }
}

#[async_trait]
impl Persistence for ObjectPersistence {
    fn name(&self) -> &str {
        "object-store"
    }

    async fn save(&self, root: &Node) -> Result<(), PersistenceError> {
        let existing: HashMap<String, ObjectRecord> = self
            .collect()
            .await?
            .into_iter()
            .map(|r| (r.full_path(), r))
            .collect();
        let mut seen = HashSet::new();

        let mut queue: VecDeque<(String, &FolderNode)> = VecDeque::new();
        if let Node::Folder(folder) = root {
            queue.push_back((paths::ROOT.to_string(), folder));
        }

        while let Some((dir, folder)) = queue.pop_front() {
            for child in &folder.children {
                let full = paths::join(&dir, child.name());
                let current = existing.get(&full);
                match child {
                    Node::Folder(sub) => {
                        match current {
                            Some(record) if record.is_directory => {}
                            Some(record) => {
                                self.delete_quietly(&record.id).await?;
                                self.store.create_folder(&sub.name, &dir).await?;
                            }
                            None => {
                                self.store.create_folder(&sub.name, &dir).await?;
                            }
                        }
                        queue.push_back((full.clone(), sub));
                    }
                    Node::File(file) => match current {
                        Some(record) if !record.is_directory => {
                            if self.content_differs(record, &file.content).await? {
                                self.store.update_content(&record.id, &file.content).await?;
                            }
                        }
                        Some(record) => {
                            self.delete_quietly(&record.id).await?;
                            self.upload(file, &dir).await?;
                        }
                        None => {
                            self.upload(file, &dir).await?;
                        }
                    },
                }
                seen.insert(full);
            }
        }

        let mut stale: Vec<&ObjectRecord> = existing
            .iter()
            .filter(|(path, _)| !seen.contains(*path))
            .map(|(_, record)| record)
            .collect();
        stale.sort_by_key(|r| r.path.len());
        for record in stale {
            self.delete_quietly(&record.id).await?;
        }

        tracing::debug!(records = seen.len(), "synced tree to object store");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Node>, PersistenceError> {
        let records = self.collect().await?;
        if records.is_empty() {
            return Ok(None);
        }

        let mut root = FolderNode::new("", Utc::now());
        for record in records {
            let node = if record.is_directory {
                Node::Folder(FolderNode {
                    name: record.name.clone(),
                    children: Vec::new(),
                    created: record.created_at,
                    modified: record.updated_at,
                })
            } else {
                let content = self.store.get_content(&record.id).await?;
                let mut file = FileNode::new(record.name.clone(), content, record.created_at);
                file.modified = record.updated_at;
                Node::File(file)
            };
            insert_at(&mut root, &record.path, node)?;
        }
        Ok(Some(Node::Folder(root)))
    }
}

impl ObjectPersistence {
    async fn upload(&self, file: &FileNode, dir: &str) -> Result<ObjectRecord, PersistenceError> {
        let upload = UploadFile {
            name: file.name.clone(),
            content: file.content.clone(),
        };
        self.store.upload(upload, dir).await
    }

    /// Whether the stored file needs rewriting. Untouched files keep `updatedAt`.
    async fn content_differs(
        &self,
        record: &ObjectRecord,
        content: &str,
    ) -> Result<bool, PersistenceError> {
        if record.size != content.len() as u64 {
            return Ok(true);
        }
        Ok(self.store.get_content(&record.id).await? != content)
    }
}

/// Append `node` to the folder at `dir`, walking down from `root`.
fn insert_at(root: &mut FolderNode, dir: &str, node: Node) -> Result<(), PersistenceError> {
    let mut folder = root;
    for segment in paths::segments(dir) {
        folder = match folder.child_mut(segment) {
            Some(Node::Folder(sub)) => sub,
            _ => return Err(PersistenceError::NotFound(dir.to_string())),
        };
    }
    folder.children.push(node);
    Ok(())
}
