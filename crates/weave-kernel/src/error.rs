//! Error types for the VFS, its persistence, and the shell.

use thiserror::Error;

/// Result type for tree and store operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Tree and store operation errors.
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("{0}: No such file or directory")]
    NotFound(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Is a directory")]
    NotAFile(String),
    #[error("{0}: File exists")]
    AlreadyExists(String),
    #[error("cannot delete root directory")]
    CannotDeleteRoot,
    #[error("cannot move root directory")]
    CannotMoveRoot,
    #[error("{0}")]
    InvalidOperation(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failures against the durable backing store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage record not found: {0}")]
    NotFound(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors raised by shell builtins.
///
/// The dispatcher prefixes the command name, so messages read
/// `cat: /x: No such file or directory`.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("missing operand")]
    MissingOperand,
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Vfs(#[from] VfsError),
    #[error("{0}")]
    Failed(String),
}

impl ShellError {
    pub fn usage(msg: impl Into<String>) -> Self {
        ShellError::Usage(msg.into())
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        ShellError::Failed(msg.into())
    }
}
