//! Shared utilities for svcs.
//!
//! This crate provides common utilities used across the svcs workspace:
//! - Logging setup with tracing
//! - Path utilities for keeping tracked paths inside the working directory

pub mod log;
pub mod path;

pub use log::{LogConfig, LogLevel};
