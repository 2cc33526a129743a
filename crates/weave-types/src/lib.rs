//! Pure data types for Weave OS: filesystem nodes, change records, shell results.
//!
//! This crate is a leaf dependency with no async runtime and no I/O. UI
//! surfaces that only observe the filesystem (file manager, editor) can depend
//! on it without pulling in the kernel.

pub mod event;
pub mod node;
pub mod result;

// Flat re-exports for convenience
pub use event::*;
pub use node::*;
pub use result::*;
