//! Tracked file set.
//!
//! The `index` file holds one relative path per line, in the order files
//! were added. It is only ever appended to.

use crate::SnapshotResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Ordered list of tracked paths, relative to the working directory.
#[derive(Debug, Clone)]
pub struct TrackedSet {
    path: PathBuf,
    files: Vec<PathBuf>,
}

impl TrackedSet {
    /// Load the tracked set from `path`. A missing file is an empty set.
    pub async fn load(path: impl Into<PathBuf>) -> SnapshotResult<Self> {
        let path = path.into();
        let files = match fs::read_to_string(&path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, files })
    }

    /// Append a path and persist it.
    ///
    /// Only the new line is written; the rest of the file is left as is.
    pub async fn append(&mut self, file: PathBuf) -> SnapshotResult<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        handle
            .write_all(format!("{}\n", file.display()).as_bytes())
            .await?;
        handle.flush().await?;

        debug!(file = %file.display(), "Appended to index");
        self.files.push(file);
        Ok(())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.files.iter().any(|f| f == file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
