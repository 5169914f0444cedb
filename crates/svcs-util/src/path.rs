//! Path utilities.
//!
//! Tracked files are always recorded relative to the working directory, so
//! every user-supplied path goes through [`relative_within`] first.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by removing `.` and `..` components.
///
/// Unlike `canonicalize`, this doesn't require the path to exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            _ => {
                result.push(component);
            }
        }
    }

    result
}

/// Resolve `path` against `base` and return it relative to `base`.
///
/// Relative paths are joined onto `base`; absolute paths must already point
/// inside it. Returns `None` if the result escapes `base` or names `base`
/// itself.
pub fn relative_within(base: &Path, path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let normalized = normalize(&joined);
    let relative = normalized.strip_prefix(normalize(base)).ok()?;

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("/w/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_relative_within_relative_input() {
        let base = Path::new("/work");
        assert_eq!(
            relative_within(base, Path::new("a.txt")),
            Some(PathBuf::from("a.txt"))
        );
        assert_eq!(
            relative_within(base, Path::new("./src/../docs/b.md")),
            Some(PathBuf::from("docs/b.md"))
        );
    }

    #[test]
    fn test_relative_within_absolute_input() {
        let base = Path::new("/work");
        assert_eq!(
            relative_within(base, Path::new("/work/src/lib.rs")),
            Some(PathBuf::from("src/lib.rs"))
        );
        assert_eq!(relative_within(base, Path::new("/other/lib.rs")), None);
    }

    #[test]
    fn test_relative_within_rejects_escape() {
        let base = Path::new("/work");
        assert_eq!(relative_within(base, Path::new("../secret.txt")), None);
        assert_eq!(relative_within(base, Path::new("a/../../b")), None);
        assert_eq!(relative_within(base, Path::new(".")), None);
    }
}
