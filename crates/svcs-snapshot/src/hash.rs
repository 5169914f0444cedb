//! Snapshot hashing.
//!
//! A snapshot ID is the SHA-256 of the tracked files' bytes concatenated in
//! tracked order. File names do not take part in the digest.

use crate::{SnapshotError, SnapshotId, SnapshotResult};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const READ_BUF_SIZE: usize = 64 * 1024;

/// Hash a sequence of byte chunks as if they were concatenated.
pub fn digest<I, B>(chunks: I) -> SnapshotId
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk.as_ref());
    }
    SnapshotId::from_digest(hasher.finalize())
}

/// Hash the current contents of `files`, resolved against `root`.
///
/// Files are streamed so large tracked files are never held in memory.
pub async fn hash_files(root: &Path, files: &[PathBuf]) -> SnapshotResult<SnapshotId> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];

    for file in files {
        let mut handle = match File::open(root.join(file)).await {
            Ok(handle) => handle,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SnapshotError::file_not_found(file.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        loop {
            let n = handle.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
    }

    Ok(SnapshotId::from_digest(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn digest_is_deterministic() {
        let a = digest(["hello", " world"]);
        let b = digest(["hello", " world"]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn digest_depends_on_order() {
        assert_ne!(digest(["x", "y"]), digest(["y", "x"]));
    }

    #[test]
    fn digest_of_known_input() {
        assert_eq!(
            digest(["abc"]).as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn hash_files_matches_concatenated_digest() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("a.txt"), "hello").await.unwrap();
        tokio::fs::write(dir.path().join("b.txt"), "world").await.unwrap();

        let files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let first = hash_files(dir.path(), &files).await.unwrap();
        let second = hash_files(dir.path(), &files).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, digest(["helloworld"]));
    }

    #[tokio::test]
    async fn hash_files_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = hash_files(dir.path(), &[PathBuf::from("gone.txt")])
            .await
            .unwrap_err();
        assert!(matches!(err, SnapshotError::FileNotFound(ref p) if p == "gone.txt"));
    }
}
