//! `commit`, `log` and `checkout` command handlers.

use svcs_snapshot::{SnapshotError, SnapshotId, SnapshotStore};
use tracing::debug;

/// Create a snapshot if the tracked content changed.
pub async fn handle_commit(store: &mut SnapshotStore, message: Vec<String>) -> anyhow::Result<()> {
    let message = message.join(" ");

    match store.commit(&message).await {
        Ok(snapshot) => {
            debug!(hash = %snapshot.id, files = snapshot.files.len(), "Committed");
            println!("Changes are committed.");
        }
        Err(SnapshotError::EmptyMessage) => println!("Message was not passed."),
        Err(SnapshotError::AmbiguousMessage) => {
            println!("Message can't contain a 'commit <hash>' line after a blank line.")
        }
        Err(SnapshotError::NoChanges | SnapshotError::NothingTracked) => {
            println!("Nothing to commit.")
        }
        Err(SnapshotError::FileNotFound(path)) => println!("Can't find '{path}'."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Print the log, newest first.
pub fn handle_log(store: &SnapshotStore) {
    if store.history().is_empty() {
        println!("No commits yet.");
    } else {
        println!("{}", store.history().render());
    }
}

/// Restore a snapshot into the working directory.
pub async fn handle_checkout(store: &SnapshotStore, id: Option<String>) -> anyhow::Result<()> {
    let Some(raw) = id else {
        println!("Commit id was not passed.");
        return Ok(());
    };

    let id = match SnapshotId::parse(&raw) {
        Ok(id) => id,
        Err(_) => {
            println!("Commit does not exist.");
            return Ok(());
        }
    };

    match store.checkout(&id).await {
        Ok(files) => {
            debug!(hash = %id, files = files.len(), "Checked out");
            println!("Switched to commit {id}.");
        }
        Err(SnapshotError::NotFound(_)) => println!("Commit does not exist."),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
