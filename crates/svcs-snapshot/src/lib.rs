//! Content-addressed snapshot store for svcs.
//!
//! This crate provides the whole version-control core:
//! - Tracking files in the working directory
//! - Hashing tracked content to identify a snapshot
//! - Persisting immutable snapshot directories and an append-only log
//! - Restoring a snapshot into the working directory
//!
//! # Example
//!
//! ```no_run
//! use svcs_snapshot::{SnapshotStore, StoreConfig};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SnapshotStore::open("/project/root", StoreConfig::default()).await?;
//!
//! store.set_author("alice").await?;
//! store.track(Path::new("src/main.rs")).await?;
//! let snapshot = store.commit("Initial import").await?;
//!
//! // ... edit the file ...
//!
//! store.checkout(&snapshot.id).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod hash;
mod history;
mod identity;
mod index;
mod snapshot;
mod store;

pub use error::{SnapshotError, SnapshotResult};
pub use hash::{digest, hash_files};
pub use history::{History, LogEntry};
pub use identity::{Identity, UNKNOWN_AUTHOR};
pub use index::TrackedSet;
pub use snapshot::{Snapshot, SnapshotId};
pub use store::{SnapshotStore, StoreConfig};
