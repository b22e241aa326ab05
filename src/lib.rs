//! memns - An in-memory hierarchical namespace
//!
//! This library provides a POSIX-like directory tree that lives entirely in
//! memory: directory creation and removal, existence checks, a current
//! directory, and read/write of leaf content. It is meant as a substitute
//! filesystem for tests and sandboxed tools that need directory-tree
//! behavior without disk I/O.

pub mod namespace;
pub mod path;
pub mod types;

pub use namespace::{Namespace, NamespaceOptions};
pub use path::PathResolver;
pub use types::*;
