//! Logging initialization.

use svcs_util::log::{self, LogConfig, LogLevel};

/// Initialize logging from the `--verbose` and `--log-level` flags.
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init_logging(verbose: bool, level: Option<&str>) {
    let level = level.and_then(|s| {
        let parsed = LogLevel::parse(s);
        if parsed.is_none() {
            eprintln!("Warning: Unknown log level '{s}', using warn");
        }
        parsed
    });

    log::init(LogConfig::from_flags(verbose, level));
}
