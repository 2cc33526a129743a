//! Lazy depth-first file search.

use std::collections::VecDeque;

use weave_types::{FolderNode, Node};

use crate::glob::glob_match;
use crate::paths;

/// A file search over a snapshot of the tree.
///
/// Iterating yields absolute paths of files whose name matches the glob.
/// Within each folder, matching files come first (in store order), then
/// the walk descends into subfolders (in store order). Each call to
/// [`FileSearch::iter`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct FileSearch {
    pattern: String,
    start: String,
    root: Node,
}

impl FileSearch {
    pub(crate) fn new(pattern: impl Into<String>, start: impl Into<String>, root: Node) -> Self {
        Self {
            pattern: pattern.into(),
            start: start.into(),
            root,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Start a new walk.
    pub fn iter(&self) -> FileSearchIter<'_> {
        let mut iter = FileSearchIter {
            pattern: &self.pattern,
            stack: Vec::new(),
            pending: VecDeque::new(),
        };
        match &self.root {
            Node::Folder(folder) => iter.stack.push((self.start.clone(), folder)),
            Node::File(file) => {
                if glob_match(&self.pattern, &file.name) {
                    iter.pending.push_back(self.start.clone());
                }
            }
        }
        iter
    }
}

impl<'a> IntoIterator for &'a FileSearch {
    type Item = String;
    type IntoIter = FileSearchIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator state for one walk of a [`FileSearch`].
#[derive(Debug)]
pub struct FileSearchIter<'a> {
    pattern: &'a str,
    stack: Vec<(String, &'a FolderNode)>,
    pending: VecDeque<String>,
}

impl Iterator for FileSearchIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(path) = self.pending.pop_front() {
                return Some(path);
            }
            let (dir, folder) = self.stack.pop()?;
            for child in &folder.children {
                if let Node::File(file) = child
                    && glob_match(self.pattern, &file.name)
                {
                    self.pending.push_back(paths::join(&dir, &file.name));
                }
            }
            for child in folder.children.iter().rev() {
                if let Node::Folder(sub) = child {
                    self.stack.push((paths::join(&dir, &sub.name), sub));
                }
            }
        }
    }
}
