//! Path Resolution
//!
//! Lexical resolution of path strings into canonical absolute segment
//! sequences. Resolution is pure: it consults no tree state beyond the
//! current-directory segments handed in, and never fails for any input.

/// Resolves path strings against a current-directory segment sequence.
///
/// The separator character is injected at construction time so embedders
/// can match the host convention, or pin one for portable tests.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    separator: char,
}

impl PathResolver {
    /// Create a resolver using the given separator.
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// The separator this resolver splits and renders with.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Resolve a path into an absolute segment sequence.
    ///
    /// A leading separator makes the path absolute; anything else is
    /// resolved relative to `cwd`. Empty segments and `.` are dropped,
    /// so repeated separators collapse to one. `..` pops a segment and
    /// collapses at the root instead of underflowing. The empty sequence
    /// denotes the root.
    pub fn resolve(&self, path: &str, cwd: &[String]) -> Vec<String> {
        let mut segments: Vec<String> = if path.starts_with(self.separator) {
            Vec::new()
        } else {
            cwd.to_vec()
        };
        for part in path.split(self.separator) {
            match part {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }
        segments
    }

    /// Render a segment sequence back into an absolute path string.
    ///
    /// The empty sequence renders as exactly one separator.
    pub fn render(&self, segments: &[String]) -> String {
        if segments.is_empty() {
            return self.separator.to_string();
        }
        let mut rendered = String::new();
        for segment in segments {
            rendered.push(self.separator);
            rendered.push_str(segment);
        }
        rendered
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(std::path::MAIN_SEPARATOR)
    }
}

// ============================================================================
// Tests
// ============================================================================
