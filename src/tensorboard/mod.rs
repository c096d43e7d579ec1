//! Filtered TensorBoard sessions over an experiment collection
//!
//! Experiments are the subdirectories of a log directory that contain a
//! `tensorboard/` folder. Each is looked up in a metadata table, checked
//! against the filters, given a display name from a template, and handed to
//! TensorBoard as one `name:path` entry.

use std::path::PathBuf;
use thiserror::Error;

use crate::collection::CollectionError;

pub mod filter;
pub mod launch;
pub mod plan;
pub mod template;

pub use filter::ParamFilter;
pub use launch::{TensorboardCommand, DEFAULT_PORT, DEFAULT_TENSORBOARD_BIN};
pub use plan::{find_viewable_experiments, plan_view, SkipReason, Skipped, ViewEntry, ViewPlan};
pub use template::NameTemplate;

/// Separator between the formatted prefix and the experiment id.
pub const NAME_SEPARATOR: &str = "---";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid regex for --filter-param {param}: {source}")]
    InvalidRegex {
        param: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid format string {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("format string references unknown column {column:?} of table '{table}'")]
    UnknownColumn { column: String, table: String },

    #[error("cannot list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exited { program: String, status: std::process::ExitStatus },

    #[error(transparent)]
    Collection(#[from] CollectionError),
}
