//! Execution context for tools.

use std::collections::BTreeMap;
use std::sync::Arc;

use weave_types::OpSource;

use super::history::History;
use super::traits::ToolSchema;
use crate::error::{ShellError, VfsError};
use crate::paths;
use crate::sync::VfsSync;

/// Source tag for mutations made from the shell.
pub const SOURCE: OpSource = OpSource::Terminal;

/// Default display width for multi-column output.
pub const DEFAULT_COLUMNS: usize = 80;

/// Shell state passed to every tool.
pub struct ExecContext {
    /// The shared VFS; mutations are tagged [`SOURCE`].
    pub vfs: Arc<VfsSync>,
    /// Current working directory (normalized VFS path).
    pub cwd: String,
    /// Previous working directory (for `cd -`).
    pub prev_cwd: Option<String>,
    pub env: BTreeMap<String, String>,
    pub history: History,
    /// Tool schemas for `help`, `man` and `which`.
    pub tool_schemas: Vec<ToolSchema>,
    /// Terminal width for `ls`.
    pub columns: usize,
    pub user: String,
    pub home: String,
}

impl ExecContext {
    /// Create a context at `/` with conventional environment defaults.
    pub fn new(vfs: Arc<VfsSync>, user: impl Into<String>, home: impl Into<String>) -> Self {
        let user = user.into();
        let home = paths::normalize(&home.into());
        let env = BTreeMap::from([
            ("USER".to_string(), user.clone()),
            ("LOGNAME".to_string(), user.clone()),
            ("HOME".to_string(), home.clone()),
            ("PATH".to_string(), "/bin".to_string()),
            ("PWD".to_string(), paths::ROOT.to_string()),
            ("SHELL".to_string(), "/bin/weave".to_string()),
            ("TERM".to_string(), "xterm-256color".to_string()),
            ("LANG".to_string(), "en_US.UTF-8".to_string()),
        ]);
        Self {
            vfs,
            cwd: paths::ROOT.to_string(),
            prev_cwd: None,
            env,
            history: History::default(),
            tool_schemas: Vec::new(),
            columns: DEFAULT_COLUMNS,
            user,
            home,
        }
    }

    /// Resolve a user-supplied path against the cwd, expanding `~`.
    pub fn resolve_path(&self, path: &str) -> String {
        if path == "~" {
            return self.home.clone();
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return paths::resolve(rest, &self.home);
        }
        paths::resolve(path, &self.cwd)
    }

    /// Change the working directory, updating `PWD` and `OLDPWD`.
    pub fn set_cwd(&mut self, path: impl Into<String>) {
        let path = paths::normalize(&path.into());
        let old = std::mem::replace(&mut self.cwd, path);
        self.env.insert("OLDPWD".to_string(), old.clone());
        self.env.insert("PWD".to_string(), self.cwd.clone());
        self.prev_cwd = Some(old);
    }

    pub fn get_prev_cwd(&self) -> Option<&str> {
        self.prev_cwd.as_deref()
    }

    /// Read a file's content, resolving the path first.
    pub fn read_file(&self, path: &str) -> Result<String, ShellError> {
        Ok(self.vfs.get_file_content(&self.resolve_path(path))?)
    }

    /// Resolve and require an existing folder.
    pub fn require_folder(&self, path: &str) -> Result<String, ShellError> {
        let resolved = self.resolve_path(path);
        if self.vfs.is_folder(&resolved) {
            Ok(resolved)
        } else if self.vfs.exists(&resolved) {
            Err(VfsError::NotADirectory(resolved).into())
        } else {
            Err(VfsError::NotFound(resolved).into())
        }
    }

    /// Write `content` to `path`, creating or replacing the file.
    pub async fn write_file(&self, path: &str, content: &str) -> Result<(), ShellError> {
        let resolved = self.resolve_path(path);
        if self.vfs.is_file(&resolved) {
            self.vfs.update_file(&resolved, content, SOURCE).await?;
        } else {
            self.vfs.create_file(&resolved, content, SOURCE).await?;
        }
        Ok(())
    }

    /// Append `content` to `path`, creating the file if needed.
    pub async fn append_file(&self, path: &str, content: &str) -> Result<(), ShellError> {
        let resolved = self.resolve_path(path);
        match self.vfs.get_file_content(&resolved) {
            Ok(existing) => {
                self.vfs
                    .update_file(&resolved, &format!("{existing}{content}"), SOURCE)
                    .await?;
            }
            Err(VfsError::NotFound(_)) => {
                self.vfs.create_file(&resolved, content, SOURCE).await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
