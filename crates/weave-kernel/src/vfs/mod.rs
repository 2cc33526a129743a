//! The in-memory virtual filesystem.
//!
//! - **Tree**: The node graph and its synchronous CRUD primitives
//! - **TreeStore**: Shared owner of the tree; saves through a `Persistence`
//!   adapter after every mutation
//! - **FileSearch**: Lazy, restartable depth-first file search
//! - **seed**: The directory structure created on first run
//!
//! # Design
//!
//! ```text
//! VfsSync (notifications)
//!     ↓
//! TreeStore ── save ──▶ Persistence (key-value │ object store)
//!     ↓
//! Tree (root folder, children in insertion order)
//! ```
//!
//! Consumers never get a mutable reference into the tree: reads return
//! owned copies, writes go through the store.

mod search;
pub mod seed;
mod store;
mod tree;

pub use search::{FileSearch, FileSearchIter};
pub use store::TreeStore;
pub use tree::Tree;
