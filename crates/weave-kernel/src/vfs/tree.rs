//! The filesystem tree and its CRUD primitives.

use chrono::Utc;
use weave_types::{FileNode, FolderNode, Node, NodeKind, VfsStats};

use super::search::FileSearch;
use crate::error::{VfsError, VfsResult};
use crate::paths;

/// A rooted tree of files and folders.
///
/// All methods accept any path string and normalize it first. Mutations
/// check every precondition before touching the tree, so a failed call
/// leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only an empty root folder.
    pub fn new() -> Self {
        Self {
            root: Node::Folder(FolderNode::new("", Utc::now())),
        }
    }

    /// Rebuild a tree from a previously saved root.
    pub fn from_root(root: Node) -> VfsResult<Self> {
        match root {
            Node::Folder(_) => Ok(Self { root }),
            Node::File(_) => Err(VfsError::NotADirectory(paths::ROOT.to_string())),
        }
    }

    /// The root folder node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Look up a node by path.
    ///
    /// Returns `None` if any segment is missing or an intermediate segment
    /// is a file.
    pub fn get_node(&self, path: &str) -> Option<&Node> {
        let path = paths::normalize(path);
        let mut current = &self.root;
        for segment in paths::segments(&path) {
            current = current.as_folder()?.child(segment)?;
        }
        Some(current)
    }

    fn get_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for segment in paths::segments(path) {
            current = match current {
                Node::Folder(folder) => folder.child_mut(segment)?,
                Node::File(_) => return None,
            };
        }
        Some(current)
    }

    fn folder(&self, path: &str) -> VfsResult<&FolderNode> {
        match self.get_node(path) {
            Some(Node::Folder(folder)) => Ok(folder),
            Some(Node::File(_)) => Err(VfsError::NotADirectory(path.to_string())),
            None => Err(VfsError::NotFound(path.to_string())),
        }
    }

    fn folder_mut(&mut self, path: &str) -> VfsResult<&mut FolderNode> {
        match self.get_node_mut(path) {
            Some(Node::Folder(folder)) => Ok(folder),
            Some(Node::File(_)) => Err(VfsError::NotADirectory(path.to_string())),
            None => Err(VfsError::NotFound(path.to_string())),
        }
    }

    /// Children of a folder, in insertion order.
    pub fn list_children(&self, path: &str) -> VfsResult<&[Node]> {
        let path = paths::normalize(path);
        Ok(&self.folder(&path)?.children)
    }

    /// Check that `path` can receive a new node: its parent is an existing
    /// folder and no sibling has the same name. Returns (parent, name).
    fn vacant(&self, path: &str) -> VfsResult<(String, String)> {
        let (parent, name) =
            paths::split(path).ok_or_else(|| VfsError::AlreadyExists(path.to_string()))?;
        let folder = self.folder(&parent).map_err(|e| match e {
            VfsError::NotFound(_) => VfsError::NotFound(path.to_string()),
            other => other,
        })?;
        if folder.contains(&name) {
            return Err(VfsError::AlreadyExists(path.to_string()));
        }
        Ok((parent, name))
    }

    /// Insert a node under `parent`, bumping the parent's `modified`.
    fn attach(&mut self, parent: &str, node: Node) -> VfsResult<()> {
        let folder = self.folder_mut(parent)?;
        folder.modified = Utc::now();
        folder.children.push(node);
        Ok(())
    }

    /// Create a file with the given content.
    pub fn create_file(&mut self, path: &str, content: &str) -> VfsResult<()> {
        let path = paths::normalize(path);
        let (parent, name) = self.vacant(&path)?;
        let node = Node::File(FileNode::new(name, content, Utc::now()));
        self.attach(&parent, node)
    }

    /// Create an empty folder.
    pub fn create_folder(&mut self, path: &str) -> VfsResult<()> {
        let path = paths::normalize(path);
        let (parent, name) = self.vacant(&path)?;
        let node = Node::Folder(FolderNode::new(name, Utc::now()));
        self.attach(&parent, node)
    }

    /// Replace the content of an existing file.
    pub fn update_file(&mut self, path: &str, content: &str) -> VfsResult<()> {
        let path = paths::normalize(path);
        match self.get_node_mut(&path) {
            Some(Node::File(file)) => {
                file.set_content(content, Utc::now());
                Ok(())
            }
            Some(Node::Folder(_)) => Err(VfsError::NotAFile(path)),
            None => Err(VfsError::NotFound(path)),
        }
    }

    /// Remove a node and, for folders, its whole subtree.
    ///
    /// Non-empty folders are removed without complaint; callers that want
    /// `rmdir` semantics check emptiness first.
    pub fn delete_node(&mut self, path: &str) -> VfsResult<Node> {
        let path = paths::normalize(path);
        let (parent, name) = paths::split(&path).ok_or(VfsError::CannotDeleteRoot)?;
        let folder = self
            .folder_mut(&parent)
            .map_err(|_| VfsError::NotFound(path.clone()))?;
        let index = folder
            .children
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| VfsError::NotFound(path.clone()))?;
        folder.modified = Utc::now();
        Ok(folder.children.remove(index))
    }

    /// Relocate a node, renaming it to the final segment of `new_path`.
    pub fn move_node(&mut self, old_path: &str, new_path: &str) -> VfsResult<()> {
        let old_path = paths::normalize(old_path);
        let new_path = paths::normalize(new_path);
        if paths::is_root(&old_path) {
            return Err(VfsError::CannotMoveRoot);
        }
        if self.get_node(&old_path).is_none() {
            return Err(VfsError::NotFound(old_path));
        }
        let (new_parent, new_name) = self.vacant(&new_path)?;
        if paths::is_within(&new_path, &old_path) {
            return Err(VfsError::InvalidOperation(format!(
                "cannot move '{old_path}' to a subdirectory of itself, '{new_path}'"
            )));
        }

        // Both parents are validated and the destination lies outside the
        // moved subtree, so detach and attach cannot fail halfway.
        let mut node = self.delete_node(&old_path)?;
        node.rename(new_name);
        self.attach(&new_parent, node)
    }

    /// Deep-copy a node to `dst`. The copy and its descendants get fresh
    /// timestamps.
    pub fn copy_node(&mut self, src: &str, dst: &str) -> VfsResult<NodeKind> {
        let src = paths::normalize(src);
        let dst = paths::normalize(dst);
        let mut node = self
            .get_node(&src)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(src.clone()))?;
        let (parent, name) = self.vacant(&dst)?;
        if node.is_folder() && paths::is_within(&dst, &src) {
            return Err(VfsError::InvalidOperation(format!(
                "cannot copy '{src}' into itself, '{dst}'"
            )));
        }
        node.rename(name);
        node.restamp(Utc::now());
        let kind = node.kind();
        self.attach(&parent, node)?;
        Ok(kind)
    }

    /// Search for files whose name matches `pattern` beneath `start`.
    pub fn find_files(&self, pattern: &str, start: &str) -> VfsResult<FileSearch> {
        let start = paths::normalize(start);
        let node = self
            .get_node(&start)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(start.clone()))?;
        Ok(FileSearch::new(pattern, start, node))
    }

    /// Count files, folders and bytes over the whole tree.
    pub fn stats(&self) -> VfsStats {
        fn walk(folder: &FolderNode, stats: &mut VfsStats) {
            for child in &folder.children {
                match child {
                    Node::File(file) => {
                        stats.file_count += 1;
                        stats.total_size += file.size;
                    }
                    Node::Folder(sub) => {
                        stats.folder_count += 1;
                        walk(sub, stats);
                    }
                }
            }
        }

        let mut stats = VfsStats::default();
        if let Node::Folder(root) = &self.root {
            walk(root, &mut stats);
        }
        stats
    }
}
