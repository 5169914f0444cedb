//! Snapshot storage implementation.

use crate::{
    hash_files, History, Identity, LogEntry, Snapshot, SnapshotError, SnapshotId, SnapshotResult,
    TrackedSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

const CONFIG_FILE: &str = "config";
const INDEX_FILE: &str = "index";
const LOG_FILE: &str = "log";
const COMMITS_DIR: &str = "commits";
const STAGING_PREFIX: &str = ".staging-";

/// Configuration for snapshot storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store root. Relative paths are resolved against the working directory.
    pub store_dir: PathBuf,

    /// Copy files into a staging directory and rename it into place once
    /// every copy succeeded.
    pub atomic_commits: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("vcs"),
            atomic_commits: true,
        }
    }
}

/// Storage for snapshots of the tracked files.
///
/// ```text
/// store_dir/
///   config               # Author name
///   index                # Tracked paths, one per line
///   log                  # Commit log, oldest first
///   commits/
///     <hash>/
///       <relative_path>  # Copies of the tracked files
/// ```
pub struct SnapshotStore {
    /// Root of the store.
    root: PathBuf,

    /// Working directory that tracked paths are relative to.
    working_dir: PathBuf,

    config: StoreConfig,
    identity: Identity,
    index: TrackedSet,
    history: History,
}

impl SnapshotStore {
    /// Open the store for `working_dir`, creating its directories if needed.
    pub async fn open(working_dir: impl AsRef<Path>, config: StoreConfig) -> SnapshotResult<Self> {
        let working_dir = fs::canonicalize(working_dir.as_ref()).await?;
        let root = working_dir.join(&config.store_dir);

        fs::create_dir_all(root.join(COMMITS_DIR)).await?;

        let identity = Identity::load(&root.join(CONFIG_FILE)).await?;
        let index = TrackedSet::load(root.join(INDEX_FILE)).await?;
        let history = History::load(root.join(LOG_FILE)).await?;

        debug!(
            root = %root.display(),
            tracked = index.len(),
            snapshots = history.len(),
            "Opened snapshot store"
        );

        Ok(Self {
            root,
            working_dir,
            config,
            identity,
            index,
            history,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Set and persist the author name.
    pub async fn set_author(&mut self, name: &str) -> SnapshotResult<&Identity> {
        let identity = Identity::new(name)?;
        identity.save(&self.root.join(CONFIG_FILE)).await?;
        info!(author = identity.author(), "Author configured");
        self.identity = identity;
        Ok(&self.identity)
    }

    /// Tracked paths in the order they were added.
    pub fn tracked(&self) -> &[PathBuf] {
        self.index.paths()
    }

    /// Start tracking a file.
    ///
    /// The file must exist, be readable and live outside the store root. On
    /// failure the tracked set is left unchanged.
    pub async fn track(&mut self, path: &Path) -> SnapshotResult<PathBuf> {
        let relative = self.normalize_path(path)?;
        let full = self.working_dir.join(&relative);

        if full.starts_with(svcs_util::path::normalize(&self.root)) {
            return Err(SnapshotError::InvalidPath(path.display().to_string()));
        }

        match fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(SnapshotError::file_not_found(path.display().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SnapshotError::file_not_found(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        fs::File::open(&full).await?;

        if self.index.contains(&relative) {
            debug!(file = %relative.display(), "File already tracked");
        }
        self.index.append(relative.clone()).await?;
        info!(file = %relative.display(), "Tracking file");

        Ok(relative)
    }

    /// Hash the current contents of the tracked files.
    pub async fn snapshot_hash(&self) -> SnapshotResult<SnapshotId> {
        if self.index.is_empty() {
            return Err(SnapshotError::NothingTracked);
        }
        hash_files(&self.working_dir, self.index.paths()).await
    }

    /// Create a snapshot of the tracked files.
    ///
    /// Fails with [`SnapshotError::NoChanges`] when the content hash equals
    /// the latest snapshot's. Only the latest snapshot is compared, so
    /// returning to an older state records it again.
    pub async fn commit(&mut self, message: &str) -> SnapshotResult<Snapshot> {
        if message.trim().is_empty() {
            return Err(SnapshotError::EmptyMessage);
        }
        if !History::is_storable_message(message) {
            return Err(SnapshotError::AmbiguousMessage);
        }

        let id = self.snapshot_hash().await?;

        if self.history.latest().is_some_and(|latest| latest.id == id) {
            debug!(hash = %id, "Content unchanged since latest snapshot");
            return Err(SnapshotError::NoChanges);
        }

        let snapshot_dir = self.snapshot_dir(&id);
        if fs::try_exists(&snapshot_dir).await? {
            debug!(hash = %id, "Reusing existing snapshot directory");
            let stored = self.files(&id).await?;
            if !same_file_set(&stored, self.index.paths()) {
                warn!(
                    hash = %id.short(),
                    stored = ?stored,
                    tracked = ?self.index.paths(),
                    "Existing snapshot holds a different file set with the same content hash"
                );
            }
        } else {
            self.materialize(&id, &snapshot_dir).await?;
        }

        let snapshot = Snapshot::new(
            id,
            self.identity.author(),
            message,
            self.index.paths().to_vec(),
        );
        self.history.append(LogEntry::from(&snapshot)).await?;

        info!(
            hash = %snapshot.id.short(),
            files = snapshot.files.len(),
            "Created snapshot"
        );

        Ok(snapshot)
    }

    /// Log entries, newest first.
    pub fn log(&self) -> impl Iterator<Item = &LogEntry> {
        self.history.newest_first()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The most recently created snapshot.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.history.latest()
    }

    /// Look up a snapshot's log entry.
    pub fn get(&self, id: &SnapshotId) -> Option<&LogEntry> {
        self.history.find(id)
    }

    /// Files stored in a snapshot, relative to the working directory.
    pub async fn files(&self, id: &SnapshotId) -> SnapshotResult<Vec<PathBuf>> {
        let snapshot_dir = self.snapshot_dir(id);
        if !fs::try_exists(&snapshot_dir).await? {
            return Err(SnapshotError::not_found(id.as_str()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&snapshot_dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&snapshot_dir).map_err(|_| {
                SnapshotError::corrupted(format!("unexpected path {}", entry.path().display()))
            })?;
            files.push(relative.to_path_buf());
        }

        Ok(files)
    }

    /// Restore a snapshot's files into the working directory.
    ///
    /// Existing files with the same path are overwritten. Files that are not
    /// part of the snapshot are left alone.
    pub async fn checkout(&self, id: &SnapshotId) -> SnapshotResult<Vec<PathBuf>> {
        let files = self.files(id).await?;
        let snapshot_dir = self.snapshot_dir(id);

        for file in &files {
            let src = snapshot_dir.join(file);
            let dst = self.working_dir.join(file);

            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::copy(&src, &dst).await?;
            debug!(file = %file.display(), "Restored");
        }

        info!(hash = %id.short(), files = files.len(), "Checked out snapshot");

        Ok(files)
    }

    /// Write the tracked files into `snapshot_dir`.
    async fn materialize(&self, id: &SnapshotId, snapshot_dir: &Path) -> SnapshotResult<()> {
        if !self.config.atomic_commits {
            return self.copy_tracked(snapshot_dir).await;
        }

        let staging = self
            .commits_dir()
            .join(format!("{STAGING_PREFIX}{}", Uuid::new_v4()));

        if let Err(e) = self.copy_tracked(&staging).await {
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                warn!(
                    path = %staging.display(),
                    error = %cleanup,
                    "Failed to remove staging directory"
                );
            }
            return Err(e);
        }

        fs::rename(&staging, snapshot_dir).await?;
        debug!(hash = %id, "Moved staged snapshot into place");
        Ok(())
    }

    async fn copy_tracked(&self, dest: &Path) -> SnapshotResult<()> {
        fs::create_dir_all(dest).await?;

        for file in self.index.iter() {
            let src = self.working_dir.join(file);
            let dst = dest.join(file);

            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::copy(&src, &dst).await.map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    SnapshotError::file_not_found(file.display().to_string())
                } else {
                    SnapshotError::Io(e)
                }
            })?;
        }

        Ok(())
    }

    fn commits_dir(&self) -> PathBuf {
        self.root.join(COMMITS_DIR)
    }

    fn snapshot_dir(&self, id: &SnapshotId) -> PathBuf {
        self.commits_dir().join(id.as_str())
    }

    /// Normalize a file path to be relative to the working directory.
    fn normalize_path(&self, path: &Path) -> SnapshotResult<PathBuf> {
        svcs_util::path::relative_within(&self.working_dir, path)
            .ok_or_else(|| SnapshotError::InvalidPath(path.display().to_string()))
    }
}

/// Compare two path lists ignoring order and duplicates.
fn same_file_set(stored: &[PathBuf], tracked: &[PathBuf]) -> bool {
    let stored: BTreeSet<&PathBuf> = stored.iter().collect();
    let tracked: BTreeSet<&PathBuf> = tracked.iter().collect();
    stored == tracked
}
