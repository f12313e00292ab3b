//! Directory catalog entries.

use serde::{Deserialize, Serialize};

/// One selectable target directory.
///
/// `path` is relative to the trusted root and always starts with the
/// configured base directory. Entries are produced fresh on every listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Root-relative path, `<base>/<sub>/<dir>`.
    pub path: String,
}

impl DirectoryEntry {
    /// Create an entry.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Nesting depth below the base directory (direct children are 1).
    pub fn depth(&self, base: &str) -> usize {
        self.path
            .strip_prefix(base.trim_matches('/'))
            .map(|rest| rest.split('/').filter(|s| !s.is_empty()).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        let entry = DirectoryEntry::new("media/gallery/2024");
        assert_eq!(entry.depth("media"), 2);
        assert_eq!(entry.depth("/media/"), 2);
        assert_eq!(entry.depth("other"), 0);
    }
}
