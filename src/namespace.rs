//! In-Memory Namespace Engine
//!
//! A rooted directory/leaf tree plus a current-directory pointer. Every
//! operation resolves its path argument through [`PathResolver`] first, so
//! absolute and relative inputs behave identically once resolved.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::path::PathResolver;
use crate::types::{FileContent, InitialFiles, NsEntry, NsError};

/// Options for creating a [`Namespace`].
#[derive(Debug, Clone, Default)]
pub struct NamespaceOptions {
    /// Path separator (defaults to the host convention)
    pub separator: Option<char>,
    /// Initial current directory (defaults to the root)
    pub cwd: Option<String>,
    /// Initial leaf entries; missing parent directories are created
    pub files: Option<InitialFiles>,
}

/// Outcome of a tree descent that stopped early.
enum DescentError {
    /// A segment on the walk has no entry.
    Missing,
    /// A segment on the walk names a leaf, which has no children.
    ThroughLeaf,
}

impl DescentError {
    fn into_ns_error(self, path: &str, operation: &str) -> NsError {
        match self {
            DescentError::Missing => NsError::NotFound {
                path: path.to_string(),
                operation: operation.to_string(),
            },
            DescentError::ThroughLeaf => NsError::NotDirectory {
                path: path.to_string(),
                operation: operation.to_string(),
            },
        }
    }
}

/// The in-memory namespace engine.
///
/// Owns the root directory's mapping and the current-directory segment
/// sequence (empty sequence = root). Operations are synchronous and take
/// `&mut self` when they mutate; embedders that need cross-thread access
/// should wrap the whole instance in a single lock.
#[derive(Debug)]
pub struct Namespace {
    resolver: PathResolver,
    root: IndexMap<String, NsEntry>,
    cwd: Vec<String>,
}

impl Namespace {
    /// Create an empty namespace using the host path separator.
    pub fn new() -> Self {
        Self::with_separator(std::path::MAIN_SEPARATOR)
    }

    /// Create an empty namespace using the given separator.
    pub fn with_separator(separator: char) -> Self {
        Self {
            resolver: PathResolver::new(separator),
            root: IndexMap::new(),
            cwd: Vec::new(),
        }
    }

    /// Create a namespace from options: separator, seeded leaf entries,
    /// and an initial current directory (validated after seeding).
    pub fn with_options(options: NamespaceOptions) -> Result<Self, NsError> {
        let separator = options.separator.unwrap_or(std::path::MAIN_SEPARATOR);
        let mut ns = Self::with_separator(separator);
        if let Some(files) = options.files {
            for (path, content) in files {
                ns.seed(&path, content)?;
            }
        }
        if let Some(cwd) = options.cwd {
            ns.set_current_dir(&cwd)?;
        }
        Ok(ns)
    }

    /// The separator paths are split and rendered with.
    pub fn separator(&self) -> char {
        self.resolver.separator()
    }

    /// Create a directory, creating missing parents along the way.
    ///
    /// Fails with `AlreadyExists` when the final segment is already taken
    /// (by a directory or a leaf), or when the path resolves to the root.
    pub fn make_dirs(&mut self, path: &str) -> Result<(), NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        let (name, parents) = match segments.split_last() {
            Some(split) => split,
            // The root cannot be recreated.
            None => {
                return Err(NsError::AlreadyExists {
                    path: path.to_string(),
                    operation: "mkdir".to_string(),
                })
            }
        };
        let parent = self.ensure_dirs(parents, path, "mkdir")?;
        if parent.contains_key(name) {
            return Err(NsError::AlreadyExists {
                path: path.to_string(),
                operation: "mkdir".to_string(),
            });
        }
        parent.insert(name.clone(), NsEntry::empty_directory());
        debug!("mkdir '{}'", path);
        Ok(())
    }

    /// Check whether a path names an existing entry (directory or leaf).
    pub fn exists(&self, path: &str) -> bool {
        let segments = self.resolver.resolve(path, &self.cwd);
        self.exists_segments(&segments)
    }

    /// Check whether a path names a directory.
    pub fn is_dir(&self, path: &str) -> bool {
        let segments = self.resolver.resolve(path, &self.cwd);
        match segments.split_last() {
            // The root is always a directory.
            None => true,
            Some((name, parents)) => matches!(
                self.descend(parents).ok().and_then(|c| c.get(name)),
                Some(NsEntry::Directory { .. })
            ),
        }
    }

    /// Check whether a path names a leaf entry.
    pub fn is_file(&self, path: &str) -> bool {
        let segments = self.resolver.resolve(path, &self.cwd);
        match segments.split_last() {
            None => false,
            Some((name, parents)) => matches!(
                self.descend(parents).ok().and_then(|c| c.get(name)),
                Some(NsEntry::Leaf { .. })
            ),
        }
    }

    /// Remove an empty directory.
    ///
    /// Fails with `NotFound` for a missing target, `NotEmpty` for a
    /// directory that still has children, and `InvalidArgument` for the
    /// root or for the current directory (which must keep naming a live
    /// directory).
    pub fn remove_dir(&mut self, path: &str) -> Result<(), NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        if !self.exists_segments(&segments) {
            return Err(NsError::NotFound {
                path: path.to_string(),
                operation: "rmdir".to_string(),
            });
        }
        let (name, parents) = match segments.split_last() {
            Some(split) => split,
            // Resolving to the root leaves no parent edge to detach.
            None => {
                return Err(NsError::InvalidArgument {
                    path: path.to_string(),
                    operation: "rmdir".to_string(),
                })
            }
        };
        if segments == self.cwd {
            return Err(NsError::InvalidArgument {
                path: path.to_string(),
                operation: "rmdir".to_string(),
            });
        }
        // The existence check above guarantees the parent walk succeeds.
        let parent = match self.descend_mut(parents) {
            Ok(children) => children,
            Err(e) => return Err(e.into_ns_error(path, "rmdir")),
        };
        match parent.get(name) {
            Some(NsEntry::Directory { children }) if !children.is_empty() => {
                Err(NsError::NotEmpty {
                    path: path.to_string(),
                    operation: "rmdir".to_string(),
                })
            }
            Some(NsEntry::Directory { .. }) => {
                parent.shift_remove(name);
                debug!("rmdir '{}'", path);
                Ok(())
            }
            Some(NsEntry::Leaf { .. }) => Err(NsError::NotDirectory {
                path: path.to_string(),
                operation: "rmdir".to_string(),
            }),
            None => Err(NsError::NotFound {
                path: path.to_string(),
                operation: "rmdir".to_string(),
            }),
        }
    }

    /// Render the current directory as an absolute path string.
    pub fn current_dir(&self) -> String {
        self.resolver.render(&self.cwd)
    }

    /// Change the current directory.
    ///
    /// Fails with `NotFound` for a missing target and `NotDirectory` when
    /// the target is a leaf. All subsequent relative resolutions observe
    /// the new value immediately.
    pub fn set_current_dir(&mut self, path: &str) -> Result<(), NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        if let Some((name, parents)) = segments.split_last() {
            let children = self
                .descend(parents)
                .map_err(|e| e.into_ns_error(path, "cd"))?;
            match children.get(name) {
                Some(NsEntry::Directory { .. }) => {}
                Some(NsEntry::Leaf { .. }) => {
                    return Err(NsError::NotDirectory {
                        path: path.to_string(),
                        operation: "cd".to_string(),
                    })
                }
                None => {
                    return Err(NsError::NotFound {
                        path: path.to_string(),
                        operation: "cd".to_string(),
                    })
                }
            }
        }
        debug!("cd '{}'", path);
        self.cwd = segments;
        Ok(())
    }

    /// Write leaf content, overwriting an existing leaf in place.
    ///
    /// The parent chain must already exist as directories; only the leaf
    /// itself is created. Writing over a directory fails with
    /// `IsDirectory`.
    pub fn write(&mut self, path: &str, content: impl Into<FileContent>) -> Result<(), NsError> {
        let bytes = content.into().into_bytes();
        let segments = self.resolver.resolve(path, &self.cwd);
        let (name, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(NsError::IsDirectory {
                    path: path.to_string(),
                    operation: "write".to_string(),
                })
            }
        };
        let parent = self
            .descend_mut(parents)
            .map_err(|e| e.into_ns_error(path, "write"))?;
        trace!("write '{}' ({} bytes)", path, bytes.len());
        match parent.get_mut(name) {
            Some(NsEntry::Directory { .. }) => Err(NsError::IsDirectory {
                path: path.to_string(),
                operation: "write".to_string(),
            }),
            Some(NsEntry::Leaf { content }) => {
                *content = bytes;
                Ok(())
            }
            None => {
                parent.insert(name.clone(), NsEntry::leaf(bytes));
                Ok(())
            }
        }
    }

    /// Read leaf content as a string.
    pub fn read(&self, path: &str) -> Result<String, NsError> {
        let buf = self.read_buffer(path)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Read leaf content as raw bytes.
    pub fn read_buffer(&self, path: &str) -> Result<Vec<u8>, NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        let (name, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(NsError::IsDirectory {
                    path: path.to_string(),
                    operation: "read".to_string(),
                })
            }
        };
        let parent = self
            .descend(parents)
            .map_err(|e| e.into_ns_error(path, "open"))?;
        match parent.get(name) {
            Some(NsEntry::Leaf { content }) => Ok(content.clone()),
            Some(NsEntry::Directory { .. }) => Err(NsError::IsDirectory {
                path: path.to_string(),
                operation: "read".to_string(),
            }),
            None => Err(NsError::NotFound {
                path: path.to_string(),
                operation: "open".to_string(),
            }),
        }
    }

    /// List a directory's child names, sorted.
    pub fn read_dir(&self, path: &str) -> Result<Vec<String>, NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        let children = self
            .descend(&segments)
            .map_err(|e| e.into_ns_error(path, "scandir"))?;
        let mut names: Vec<String> = children.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    // ========================================================================
    // Tree walk helpers
    // ========================================================================

    fn exists_segments(&self, segments: &[String]) -> bool {
        match segments.split_last() {
            // The root always exists.
            None => true,
            Some((name, parents)) => match self.descend(parents) {
                Ok(children) => children.contains_key(name),
                Err(_) => false,
            },
        }
    }

    /// Walk down to the directory named by `segments`.
    fn descend(&self, segments: &[String]) -> Result<&IndexMap<String, NsEntry>, DescentError> {
        let mut current = &self.root;
        for segment in segments {
            match current.get(segment) {
                Some(NsEntry::Directory { children }) => current = children,
                Some(NsEntry::Leaf { .. }) => return Err(DescentError::ThroughLeaf),
                None => return Err(DescentError::Missing),
            }
        }
        Ok(current)
    }

    fn descend_mut(
        &mut self,
        segments: &[String],
    ) -> Result<&mut IndexMap<String, NsEntry>, DescentError> {
        let mut current = &mut self.root;
        for segment in segments {
            match current.get_mut(segment) {
                Some(NsEntry::Directory { children }) => current = children,
                Some(NsEntry::Leaf { .. }) => return Err(DescentError::ThroughLeaf),
                None => return Err(DescentError::Missing),
            }
        }
        Ok(current)
    }

    /// Walk down to the directory named by `segments`, creating missing
    /// intermediate directories. An intermediate that exists as a leaf
    /// fails with `NotDirectory`.
    fn ensure_dirs(
        &mut self,
        segments: &[String],
        path: &str,
        operation: &str,
    ) -> Result<&mut IndexMap<String, NsEntry>, NsError> {
        let mut current = &mut self.root;
        for segment in segments {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(NsEntry::empty_directory);
            match entry {
                NsEntry::Directory { children } => current = children,
                NsEntry::Leaf { .. } => {
                    return Err(NsError::NotDirectory {
                        path: path.to_string(),
                        operation: operation.to_string(),
                    })
                }
            }
        }
        Ok(current)
    }

    /// Insert a seeded leaf, creating missing parent directories.
    fn seed(&mut self, path: &str, content: FileContent) -> Result<(), NsError> {
        let segments = self.resolver.resolve(path, &self.cwd);
        let (name, parents) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(NsError::IsDirectory {
                    path: path.to_string(),
                    operation: "seed".to_string(),
                })
            }
        };
        let parent = self.ensure_dirs(parents, path, "seed")?;
        if let Some(NsEntry::Directory { .. }) = parent.get(name) {
            return Err(NsError::IsDirectory {
                path: path.to_string(),
                operation: "seed".to_string(),
            });
        }
        parent.insert(name.clone(), NsEntry::leaf(content.into_bytes()));
        Ok(())
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
