//! Configuration loading and merging
//!
//! Launcher settings come from an optional config file in the log directory
//! and from CLI flags, with precedence CLI > file > defaults.

pub mod loader;
pub mod merge;

pub use loader::{load_config, Config};
pub use merge::{merge_cli_with_config, CliOverrides, LaunchSettings};
