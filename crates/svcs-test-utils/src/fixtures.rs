//! Test fixtures for creating reproducible working directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory with configurable files.
///
/// The directory is removed when the built project is dropped.
///
/// # Example
///
/// ```rust
/// use svcs_test_utils::fixtures::TestProject;
///
/// let project = TestProject::new()
///     .with_file("a.txt", "hello")
///     .with_file("src/lib.rs", "")
///     .build();
///
/// assert!(project.file_exists("src/lib.rs"));
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    /// Files to create (path relative to root -> contents).
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl TestProject {
    /// Create a new test project builder.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            files: BTreeMap::new(),
        }
    }

    /// Add a file to the project.
    ///
    /// Parent directories are created automatically.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), contents.as_ref().to_vec());
        self
    }

    /// Build the project, creating all files.
    pub fn build(self) -> BuiltTestProject {
        let project = BuiltTestProject {
            temp_dir: self.temp_dir,
        };

        for (path, contents) in &self.files {
            project.write_file(path, contents);
        }

        project
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A built test project with files created on disk.
pub struct BuiltTestProject {
    temp_dir: TempDir,
}

impl BuiltTestProject {
    /// Get the path to the project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the project.
    pub fn read_file(&self, path: impl AsRef<Path>) -> String {
        let full_path = self.path().join(path.as_ref());
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", full_path.display(), e))
    }

    /// Check if a file exists in the project.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.path().join(path.as_ref()).exists()
    }

    /// Write a file to the project (for modifying during tests).
    pub fn write_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let full_path = self.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!(
                    "Failed to create parent directory for {}: {}",
                    full_path.display(),
                    e
                )
            });
        }
        fs::write(&full_path, contents)
            .unwrap_or_else(|e| panic!("Failed to write file {}: {}", full_path.display(), e));
    }

    /// Names of the entries directly inside a directory, sorted.
    ///
    /// Returns an empty list if the directory does not exist.
    pub fn list_dir(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let full_path = self.path().join(dir.as_ref());
        if !full_path.exists() {
            return Vec::new();
        }

        let mut names: Vec<String> = fs::read_dir(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", full_path.display(), e))
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}
