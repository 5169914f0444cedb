//! Append-only commit log.
//!
//! On disk the log is stored oldest first as blocks of
//! ```text
//! commit <hash>
//! Author: <name>
//! <message>
//!
//! ```
//! A message may span several lines. A block ends at a blank line followed
//! by a `commit <hash>` line and an `Author:` line.

use crate::{Snapshot, SnapshotError, SnapshotId, SnapshotResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

const COMMIT_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author:";

/// Whether `lines[i]` is a `commit <hash>` header followed by an author line.
fn is_block_start(lines: &[&str], i: usize) -> bool {
    let is_header = lines[i]
        .strip_prefix(COMMIT_PREFIX)
        .map(str::trim)
        .is_some_and(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit()));

    is_header
        && lines
            .get(i + 1)
            .is_some_and(|line| line.starts_with(AUTHOR_PREFIX))
}

/// One snapshot in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: SnapshotId,
    pub author: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(id: SnapshotId, author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            message: message.into(),
        }
    }
}

impl From<&Snapshot> for LogEntry {
    fn from(snapshot: &Snapshot) -> Self {
        Self::new(
            snapshot.id.clone(),
            snapshot.author.clone(),
            snapshot.message.clone(),
        )
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}\n{} {}\n{}",
            COMMIT_PREFIX, self.id, AUTHOR_PREFIX, self.author, self.message
        )
    }
}

/// The commit log, kept in creation order.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl History {
    /// Load the log from `path`. A missing file is an empty log.
    pub async fn load(path: impl Into<PathBuf>) -> SnapshotResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, entries })
    }

    /// Parse log file content into entries, oldest first.
    pub fn parse(content: &str) -> SnapshotResult<Vec<LogEntry>> {
        let lines: Vec<&str> = content.lines().collect();
        let mut entries = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            let id = lines[i]
                .strip_prefix(COMMIT_PREFIX)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    SnapshotError::corrupted(format!("line {}: expected commit header", i + 1))
                })?;
            let author = lines
                .get(i + 1)
                .and_then(|line| line.strip_prefix(AUTHOR_PREFIX))
                .map(str::trim)
                .ok_or_else(|| {
                    SnapshotError::corrupted(format!("line {}: expected author", i + 2))
                })?;
            i += 2;

            let mut message: Vec<&str> = Vec::new();
            while i < lines.len() {
                let after_blank = message.last().is_some_and(|line| line.trim().is_empty());
                if after_blank && is_block_start(&lines, i) {
                    break;
                }
                message.push(lines[i]);
                i += 1;
            }
            while message.last().is_some_and(|line| line.trim().is_empty()) {
                message.pop();
            }

            entries.push(LogEntry::new(
                SnapshotId(id.to_string()),
                author,
                message.join("\n"),
            ));
        }

        Ok(entries)
    }

    /// Whether `message` reads back as a single entry once appended.
    ///
    /// A blank line followed by `commit <hash>` and `Author:` lines would
    /// start a new block on the next load.
    pub fn is_storable_message(message: &str) -> bool {
        let lines: Vec<&str> = message.lines().collect();
        (1..lines.len()).all(|i| !(lines[i - 1].trim().is_empty() && is_block_start(&lines, i)))
    }

    /// Append one entry and persist it.
    pub async fn append(&mut self, entry: LogEntry) -> SnapshotResult<()> {
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        handle.write_all(format!("{entry}\n\n").as_bytes()).await?;
        handle.flush().await?;

        debug!(hash = %entry.id, "Appended to log");
        self.entries.push(entry);
        Ok(())
    }

    /// The most recently created entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Find the newest entry for a snapshot ID.
    pub fn find(&self, id: &SnapshotId) -> Option<&LogEntry> {
        self.newest_first().find(|entry| &entry.id == id)
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Render the log for display, newest first.
    pub fn render(&self) -> String {
        self.newest_first()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
