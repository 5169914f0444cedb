//! `config` command handler.

use svcs_snapshot::{SnapshotError, SnapshotStore};

/// Show or set the author name.
pub async fn handle_config(store: &mut SnapshotStore, name: Vec<String>) -> anyhow::Result<()> {
    let name = Some(name.join(" ")).filter(|name| !name.is_empty());

    match name {
        None => match store.identity().name() {
            Some(name) => println!("The username is {name}."),
            None => println!("Please, tell me who you are."),
        },
        Some(name) => match store.set_author(&name).await {
            Ok(identity) => println!("The username is {}.", identity.author()),
            Err(SnapshotError::InvalidAuthor(_)) => println!("Please, tell me who you are."),
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
