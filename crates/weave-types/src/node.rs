//! Filesystem node types.
//!
//! The tree is a sum type over files and folders. Folders own their children
//! in insertion order; sibling names are unique within a folder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of node, for callers that only need the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A file holding text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    /// Derived from `name`; empty when the name has no extension.
    pub extension: String,
    pub content: String,
    /// Byte length of `content`, kept in sync by [`FileNode::set_content`].
    pub size: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl FileNode {
    /// Create a file stamped with `now`.
    pub fn new(name: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        let name = name.into();
        let content = content.into();
        Self {
            extension: extension_of(&name),
            size: content.len() as u64,
            name,
            content,
            created: now,
            modified: now,
        }
    }

    /// Replace the content, recomputing size and bumping `modified`.
    pub fn set_content(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        self.content = content.into();
        self.size = self.content.len() as u64;
        self.modified = now;
    }

    /// Rename the file, re-deriving the extension.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.extension = extension_of(&self.name);
    }
}

/// A folder owning an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    pub children: Vec<Node>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl FolderNode {
    /// Create an empty folder stamped with `now`.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Find a direct child by name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name() == name)
    }

    /// True if a direct child with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.child(name).is_some()
    }
}

/// A node in the filesystem tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) => &d.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// Content size for files, 0 for folders.
    pub fn size(&self) -> u64 {
        match self {
            Node::File(f) => f.size,
            Node::Folder(_) => 0,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        match self {
            Node::File(f) => f.created,
            Node::Folder(d) => d.created,
        }
    }

    pub fn modified(&self) -> DateTime<Utc> {
        match self {
            Node::File(f) => f.modified,
            Node::Folder(d) => d.modified,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::Folder(d) => Some(d),
            Node::File(_) => None,
        }
    }

    /// Rename the node in place.
    pub fn rename(&mut self, name: impl Into<String>) {
        match self {
            Node::File(f) => f.rename(name),
            Node::Folder(d) => d.name = name.into(),
        }
    }

    /// Stamp this node and every descendant with `now`.
    pub fn restamp(&mut self, now: DateTime<Utc>) {
        match self {
            Node::File(f) => {
                f.created = now;
                f.modified = now;
            }
            Node::Folder(d) => {
                d.created = now;
                d.modified = now;
                for child in &mut d.children {
                    child.restamp(now);
                }
            }
        }
    }
}

/// Aggregate counts over a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VfsStats {
    pub file_count: u64,
    /// Folders below the root; the root itself is not counted.
    pub folder_count: u64,
    pub total_size: u64,
}

/// Extension of a file name: the text after the last `.`.
///
/// Dotfiles such as `.profile` have no extension.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_derived_from_name() {
        assert_eq!(extension_of("notes.md"), "md");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".profile"), "");
    }

    #[test]
    fn set_content_recomputes_size() {
        let t0 = Utc::now();
        let mut file = FileNode::new("a.txt", "abc", t0);
        assert_eq!(file.size, 3);

        let t1 = t0 + chrono::Duration::seconds(5);
        file.set_content("hello world", t1);
        assert_eq!(file.size, 11);
        assert_eq!(file.modified, t1);
        assert_eq!(file.created, t0);
    }

    #[test]
    fn rename_updates_extension() {
        let mut node = Node::File(FileNode::new("a.txt", "", Utc::now()));
        node.rename("a.rs");
        assert_eq!(node.as_file().map(|f| f.extension.as_str()), Some("rs"));
    }

    #[test]
    fn node_serializes_with_type_tag() {
        let node = Node::Folder(FolderNode::new("docs", Utc::now()));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["name"], "docs");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
