//! Snapshot store integration tests.
//!
//! These drive the store through its public API against a real directory.

use std::path::{Path, PathBuf};
use svcs_snapshot::{SnapshotError, SnapshotId, SnapshotStore, StoreConfig};
use svcs_test_utils::{BuiltTestProject, TestProject};

async fn open(project: &BuiltTestProject) -> SnapshotStore {
    SnapshotStore::open(project.path(), StoreConfig::default())
        .await
        .expect("Failed to open store")
}

/// Hashing the same tracked content twice gives the same ID.
#[tokio::test]
async fn test_hash_is_idempotent() {
    let project = TestProject::new()
        .with_file("a.txt", "alpha")
        .with_file("b.txt", "beta")
        .build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();
    store.track(Path::new("b.txt")).await.unwrap();

    let first = store.snapshot_hash().await.unwrap();
    let second = store.snapshot_hash().await.unwrap();
    assert_eq!(first, second);
}

/// Committing twice without changes creates one snapshot and one log entry.
#[tokio::test]
async fn test_unchanged_content_is_noop() {
    let project = TestProject::new().with_file("a.txt", "hello").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();

    store.commit("first").await.unwrap();
    let err = store.commit("second").await.unwrap_err();

    assert!(matches!(err, SnapshotError::NoChanges));
    assert_eq!(project.list_dir("vcs/commits").len(), 1);
    assert_eq!(store.log().count(), 1);
}

/// Checking out the first commit restores the original content.
#[tokio::test]
async fn test_round_trip_restore() {
    let project = TestProject::new().with_file("a.txt", "hello").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();

    let first = store.commit("first").await.unwrap();
    project.write_file("a.txt", "goodbye");

    store.checkout(&first.id).await.unwrap();
    assert_eq!(project.read_file("a.txt"), "hello");
}

/// Different content produces different snapshots.
#[tokio::test]
async fn test_distinct_content_distinct_snapshots() {
    let project = TestProject::new().with_file("a.txt", "x").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();

    let first = store.commit("x").await.unwrap();
    project.write_file("a.txt", "y");
    let second = store.commit("y").await.unwrap();

    assert_ne!(first.id, second.id);
    let mut expected = vec![first.id.to_string(), second.id.to_string()];
    expected.sort();
    assert_eq!(project.list_dir("vcs/commits"), expected);
    assert_eq!(store.log().count(), 2);
}

/// Tracking a missing file reports not found and leaves the index alone.
#[tokio::test]
async fn test_track_missing_file() {
    let project = TestProject::new().with_file("a.txt", "x").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();

    let err = store.track(Path::new("nope.txt")).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.tracked(), &[PathBuf::from("a.txt")]);
    assert_eq!(project.read_file("vcs/index"), "a.txt\n");
}

/// Checking out an unknown hash reports not found and touches nothing.
#[tokio::test]
async fn test_checkout_unknown_hash() {
    let project = TestProject::new().with_file("a.txt", "x").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();
    store.commit("x").await.unwrap();
    project.write_file("a.txt", "edited");

    let id = SnapshotId::parse("0123456789abcdef").unwrap();
    let err = store.checkout(&id).await.unwrap_err();

    assert!(matches!(err, SnapshotError::NotFound(_)));
    assert_eq!(project.read_file("a.txt"), "edited");
}

/// The log lists the newest commit first.
#[tokio::test]
async fn test_log_ordering() {
    let project = TestProject::new().with_file("a.txt", "1").build();
    let mut store = open(&project).await;
    store.track(Path::new("a.txt")).await.unwrap();

    let h1 = store.commit("one").await.unwrap().id;
    project.write_file("a.txt", "2");
    let h2 = store.commit("two").await.unwrap().id;
    project.write_file("a.txt", "3");
    let h3 = store.commit("three").await.unwrap().id;

    let order: Vec<_> = store.log().map(|entry| entry.id.clone()).collect();
    assert_eq!(order, vec![h3.clone(), h2, h1]);

    let rendered = store.history().render();
    assert!(rendered.starts_with(&format!("commit {h3}\nAuthor: unknown\nthree")));
}

/// Snapshot contents are copied under their relative paths.
#[tokio::test]
async fn test_snapshot_mirrors_tracked_paths() {
    let project = TestProject::new()
        .with_file("README.md", "# readme")
        .with_file("src/main.rs", "fn main() {}")
        .build();
    let mut store = open(&project).await;
    store.track(Path::new("src/main.rs")).await.unwrap();
    store.track(Path::new("README.md")).await.unwrap();

    let snapshot = store.commit("two files").await.unwrap();
    let stored = format!("vcs/commits/{}/src/main.rs", snapshot.id);

    assert_eq!(project.read_file(stored), "fn main() {}");
    assert_eq!(
        store.files(&snapshot.id).await.unwrap(),
        vec![PathBuf::from("README.md"), PathBuf::from("src/main.rs")]
    );
}

/// A custom store directory keeps everything under it.
#[tokio::test]
async fn test_custom_store_dir() {
    let project = TestProject::new().with_file("a.txt", "x").build();
    let config = StoreConfig {
        store_dir: PathBuf::from(".svcs"),
        ..StoreConfig::default()
    };
    let mut store = SnapshotStore::open(project.path(), config).await.unwrap();
    store.set_author("carol").await.unwrap();
    store.track(Path::new("a.txt")).await.unwrap();
    store.commit("x").await.unwrap();

    assert_eq!(project.read_file(".svcs/config"), "carol");
    assert!(project.read_file(".svcs/log").contains("Author: carol"));
    assert!(!project.file_exists("vcs"));
}
