//! Tab completion.

use std::sync::Arc;

use weave_types::Node;

use crate::paths;
use crate::sync::VfsSync;

/// A completion snapshot: command names plus the cwd at the time it was
/// taken. Directory entries are read live from the VFS.
#[derive(Debug, Clone)]
pub struct Completer {
    commands: Vec<String>,
    vfs: Arc<VfsSync>,
    cwd: String,
    home: String,
}

/// Candidates for the word ending at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completions {
    /// Byte offset where the word being completed starts.
    pub start: usize,
    /// Full replacements for the word, each ending in `/` (folders) or a
    /// space (commands and files).
    pub candidates: Vec<String>,
}

impl Completer {
    pub fn new(commands: Vec<String>, vfs: Arc<VfsSync>, cwd: String, home: String) -> Self {
        Self {
            commands,
            vfs,
            cwd,
            home,
        }
    }

    /// The missing suffix when exactly one candidate matches.
    pub fn complete(&self, line: &str) -> Option<String> {
        let completions = self.candidates(line);
        let typed = &line[completions.start..];
        match completions.candidates.as_slice() {
            [only] => only.strip_prefix(typed).map(str::to_string),
            _ => None,
        }
    }

    /// Every candidate for the last word of `line`.
    pub fn candidates(&self, line: &str) -> Completions {
        let start = line
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        let word = &line[start..];
        let first_word = line[..start].trim().is_empty();

        let candidates = if first_word {
            self.commands
                .iter()
                .filter(|c| c.starts_with(word))
                .map(|c| format!("{c} "))
                .collect()
        } else {
            self.entries(word)
        };
        Completions { start, candidates }
    }

    /// Directory entries matching a partial path.
    fn entries(&self, word: &str) -> Vec<String> {
        let (dir_part, prefix) = match word.rfind('/') {
            Some(i) => (&word[..=i], &word[i + 1..]),
            None => ("", word),
        };
        let dir = if dir_part.is_empty() {
            self.cwd.clone()
        } else if dir_part == "~/" {
            self.home.clone()
        } else if let Some(rest) = dir_part.strip_prefix("~/") {
            paths::resolve(rest, &self.home)
        } else {
            paths::resolve(dir_part, &self.cwd)
        };

        let Ok(children) = self.vfs.list_dir(&dir) else {
            return Vec::new();
        };
        let mut matches: Vec<String> = children
            .iter()
            .filter(|n| n.name().starts_with(prefix))
            .filter(|n| prefix.starts_with('.') || !n.name().starts_with('.'))
            .map(|n| match n {
                Node::Folder(f) => format!("{dir_part}{}/", f.name),
                Node::File(f) => format!("{dir_part}{} ", f.name),
            })
            .collect();
        matches.sort();
        matches
    }
}
