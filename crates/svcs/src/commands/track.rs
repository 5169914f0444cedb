//! `add` command handler.

use std::path::PathBuf;
use svcs_snapshot::{SnapshotError, SnapshotStore};

/// List tracked files, or start tracking `path`.
pub async fn handle_add(store: &mut SnapshotStore, path: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = path else {
        if store.tracked().is_empty() {
            println!("Add a file to the index.");
        } else {
            println!("Tracked files:");
            for file in store.tracked() {
                println!("{}", file.display());
            }
        }
        return Ok(());
    };

    match store.track(&path).await {
        Ok(_) => println!("The file '{}' is tracked.", path.display()),
        Err(e) if e.is_not_found() => println!("Can't find '{}'.", path.display()),
        Err(SnapshotError::InvalidPath(_)) => {
            println!("Can't track '{}': not a working-directory file.", path.display())
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
