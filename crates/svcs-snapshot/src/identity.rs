//! Author identity.

use crate::{SnapshotError, SnapshotResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Author recorded on snapshots when no identity has been configured.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// The configured author name, loaded once when the store is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    name: Option<String>,
}

impl Identity {
    /// Create an identity from a name, validating it.
    pub fn new(name: &str) -> SnapshotResult<Self> {
        let name = name.trim();
        if name.is_empty() || name.contains(['\n', '\r']) {
            return Err(SnapshotError::InvalidAuthor(name.to_string()));
        }
        Ok(Self {
            name: Some(name.to_string()),
        })
    }

    /// Load the identity from a config file.
    ///
    /// A missing or blank file means no identity is configured.
    pub async fn load(path: &Path) -> SnapshotResult<Self> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let name = content.lines().next().unwrap_or("").trim();
                if name.is_empty() {
                    Ok(Self::default())
                } else {
                    Ok(Self {
                        name: Some(name.to_string()),
                    })
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the identity as a single line.
    pub async fn save(&self, path: &Path) -> SnapshotResult<()> {
        let Some(name) = &self.name else {
            return Ok(());
        };
        fs::write(path, name).await?;
        debug!(author = %name, "Saved identity");
        Ok(())
    }

    /// The configured name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name to record on a snapshot.
    pub fn author(&self) -> &str {
        self.name().unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn is_configured(&self) -> bool {
        self.name.is_some()
    }
}
