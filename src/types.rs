//! Namespace Types
//!
//! Core types for the in-memory namespace: the entry tree, the error
//! taxonomy, and content/seeding helpers.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

/// Namespace errors
#[derive(Error, Debug, Clone)]
pub enum NsError {
    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EEXIST: file already exists, {operation} '{path}'")]
    AlreadyExists { path: String, operation: String },

    #[error("EISDIR: illegal operation on a directory, {operation} '{path}'")]
    IsDirectory { path: String, operation: String },

    #[error("ENOTDIR: not a directory, {operation} '{path}'")]
    NotDirectory { path: String, operation: String },

    #[error("ENOTEMPTY: directory not empty, {operation} '{path}'")]
    NotEmpty { path: String, operation: String },

    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidArgument { path: String, operation: String },
}

/// Namespace entry types
#[derive(Debug, Clone)]
pub enum NsEntry {
    Directory {
        children: IndexMap<String, NsEntry>,
    },
    Leaf {
        content: Vec<u8>,
    },
}

impl NsEntry {
    /// Create an empty directory entry.
    pub fn empty_directory() -> Self {
        NsEntry::Directory {
            children: IndexMap::new(),
        }
    }

    /// Create a leaf entry holding the given content.
    pub fn leaf(content: Vec<u8>) -> Self {
        NsEntry::Leaf { content }
    }

    /// Check if entry is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, NsEntry::Directory { .. })
    }

    /// Check if entry is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, NsEntry::Leaf { .. })
    }
}

/// Leaf content type
#[derive(Debug, Clone)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    /// Consume the content, yielding raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FileContent::Text(s) => s.into_bytes(),
            FileContent::Binary(b) => b,
        }
    }
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        FileContent::Text(s)
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        FileContent::Text(s.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(v: Vec<u8>) -> Self {
        FileContent::Binary(v)
    }
}

impl From<&[u8]> for FileContent {
    fn from(v: &[u8]) -> Self {
        FileContent::Binary(v.to_vec())
    }
}

/// Initial leaf entries map type
pub type InitialFiles = HashMap<String, FileContent>;

// ============================================================================
// Tests
// ============================================================================
