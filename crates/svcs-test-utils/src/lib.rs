//! Testing utilities and fixtures for svcs.
//!
//! ```rust,ignore
//! use svcs_test_utils::TestProject;
//!
//! let project = TestProject::new().with_file("a.txt", "hello").build();
//! assert_eq!(project.read_file("a.txt"), "hello");
//! ```

pub mod fixtures;

pub use fixtures::{BuiltTestProject, TestProject};
