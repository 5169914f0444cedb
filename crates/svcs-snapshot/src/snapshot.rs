//! Snapshot data structures.

use crate::{SnapshotError, SnapshotResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Content hash identifying a snapshot, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    /// Build an ID from raw digest bytes.
    pub fn from_digest(bytes: impl AsRef<[u8]>) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a user-supplied snapshot ID.
    ///
    /// Anything that is not a hex string cannot name a snapshot directory,
    /// so it is reported as not found rather than used to build a path.
    pub fn parse(s: &str) -> SnapshotResult<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SnapshotError::not_found(s));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Get the ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A snapshot of the tracked files at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Content hash of the tracked files.
    pub id: SnapshotId,

    /// Who created the snapshot.
    pub author: String,

    /// Commit message.
    pub message: String,

    /// Files included in this snapshot (relative paths, tracked order).
    pub files: Vec<PathBuf>,
}

impl Snapshot {
    /// Create a new snapshot record.
    pub fn new(
        id: SnapshotId,
        author: impl Into<String>,
        message: impl Into<String>,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            message: message.into(),
            files,
        }
    }

    /// Check if this snapshot includes a specific file.
    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_hex_and_lowercases() {
        let id = SnapshotId::parse("  ABCdef0123 ").unwrap();
        assert_eq!(id.as_str(), "abcdef0123");
    }

    #[test]
    fn parse_rejects_paths_and_blanks() {
        for input in ["", "   ", "../commits", "abc/def", "xyz"] {
            let err = SnapshotId::parse(input).unwrap_err();
            assert!(err.is_not_found(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn short_truncates_long_ids() {
        let id = SnapshotId::from_digest([0xab; 32]);
        assert_eq!(id.as_str().len(), 64);
        assert_eq!(id.short(), "abababababab");
        assert_eq!(SnapshotId("abc".into()).short(), "abc");
    }

    #[test]
    fn contains_file() {
        let snapshot = Snapshot::new(
            SnapshotId("00".into()),
            "alice",
            "first",
            vec![PathBuf::from("a.txt"), PathBuf::from("src/b.rs")],
        );
        assert!(snapshot.contains_file(Path::new("src/b.rs")));
        assert!(!snapshot.contains_file(Path::new("c.txt")));
    }
}
