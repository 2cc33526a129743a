//! Change records emitted by the sync layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The UI surface that originated a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpSource {
    Terminal,
    FileManager,
    TextEditor,
    /// Kernel-internal mutations such as first-run seeding.
    System,
}

impl OpSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpSource::Terminal => "terminal",
            OpSource::FileManager => "filemanager",
            OpSource::TextEditor => "texteditor",
            OpSource::System => "system",
        }
    }
}

impl fmt::Display for OpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpKind {
    FileCreated,
    FileUpdated,
    FileDeleted,
    FileMoved,
    FileCopied,
    FolderCreated,
    FolderDeleted,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpKind::FileCreated => "fileCreated",
            OpKind::FileUpdated => "fileUpdated",
            OpKind::FileDeleted => "fileDeleted",
            OpKind::FileMoved => "fileMoved",
            OpKind::FileCopied => "fileCopied",
            OpKind::FolderCreated => "folderCreated",
            OpKind::FolderDeleted => "folderDeleted",
        };
        f.write_str(s)
    }
}

/// A successful mutation, as recorded in the operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpRecord {
    pub kind: OpKind,
    pub path: String,
    pub new_path: Option<String>,
    pub content: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: OpSource,
}

impl OpRecord {
    pub fn new(kind: OpKind, path: impl Into<String>, source: OpSource) -> Self {
        Self {
            kind,
            path: path.into(),
            new_path: None,
            content: None,
            timestamp: Utc::now(),
            source,
        }
    }

    pub fn with_new_path(mut self, new_path: impl Into<String>) -> Self {
        self.new_path = Some(new_path.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
