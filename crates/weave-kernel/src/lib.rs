//! weave-kernel: the core of Weave OS.
//!
//! This crate provides:
//!
//! - **Paths**: Canonical path normalization and resolution
//! - **VFS**: The in-memory tree, its store, and file search
//! - **Persistence**: Key-value and object-store adapters behind one trait
//! - **Sync**: Change notification façade shared by every UI surface
//! - **Shell**: Line interpreter with Unix-like builtins
//! - **Kernel**: Wires the above together from a `KernelConfig`

pub mod error;
pub mod glob;
pub mod kernel;
pub mod paths;
pub mod persist;
pub mod shell;
pub mod sync;
pub mod vfs;

pub use error::{PersistenceError, ShellError, VfsError, VfsResult};
pub use kernel::{Kernel, KernelConfig, PersistenceConfig};
pub use shell::Shell;
pub use sync::{ListenerId, VfsListener, VfsSync};
pub use vfs::{FileSearch, Tree, TreeStore};

// Data types, re-exported so embedders need only one dependency
pub use weave_types::{
    Directive, ExecResult, FileNode, FolderNode, Node, NodeKind, OpKind, OpRecord, OpSource,
    VfsStats,
};
