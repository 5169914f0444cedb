//! Snapshot error types.

use thiserror::Error;

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot not found.
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Tracked content is identical to the latest snapshot.
    #[error("No changes since the latest snapshot")]
    NoChanges,

    /// Commit message is missing or blank.
    #[error("Commit message is empty")]
    EmptyMessage,

    /// Commit message would be read back as more than one log entry.
    #[error("Commit message contains a line that looks like a commit header")]
    AmbiguousMessage,

    /// No files are tracked yet.
    #[error("No files are tracked")]
    NothingTracked,

    /// Author name is empty or spans several lines.
    #[error("Invalid author name: {0:?}")]
    InvalidAuthor(String),

    /// Path resolves outside the working directory or inside the store.
    #[error("Path is outside the working directory or inside the store: {0}")]
    InvalidPath(String),

    /// Snapshot storage is corrupted.
    #[error("Snapshot storage corrupted: {0}")]
    Corrupted(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnapshotError {
    /// Create a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Create a corrupted storage error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }

    /// Whether this error reports a missing snapshot or file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::FileNotFound(_))
    }
}
