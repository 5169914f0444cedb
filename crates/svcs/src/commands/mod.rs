//! Command handlers for the svcs CLI.
//!
//! Handlers print user-facing results to stdout. Domain failures such as a
//! missing file or an unchanged tree are reported as messages; only I/O
//! failures are returned as errors.

pub mod help;
pub mod identity;
pub mod logging;
pub mod snapshot;
pub mod track;

pub use help::*;
pub use identity::*;
pub use logging::*;
pub use snapshot::*;
pub use track::*;
