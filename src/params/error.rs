//! Errors raised by the parameter store and override merging

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    /// Two keys normalize to the same lowercase form.
    #[error("parameter keys collide after lowercasing: {first:?} and {second:?}")]
    KeyCollision { first: String, second: String },

    #[error("no parameter named {0:?}")]
    KeyNotFound(String),

    #[error("inconsistent values for {key:?}: {old} != {new}")]
    Inconsistent { key: String, old: serde_json::Value, new: serde_json::Value },

    /// Strict override merging found keys on only one side.
    #[error("{}", describe_mismatch(.missing_in_params, .missing_in_defaults))]
    KeyMismatch { missing_in_params: Vec<String>, missing_in_defaults: Vec<String> },

    #[error("failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON object of parameters in {}", .0.display())]
    NotAnObject(PathBuf),
}

fn describe_mismatch(missing_in_params: &[String], missing_in_defaults: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing_in_params.is_empty() {
        parts.push(format!("following keys not in params: {:?}", missing_in_params));
    }
    if !missing_in_defaults.is_empty() {
        parts.push(format!("following keys not in JSON: {:?}", missing_in_defaults));
    }
    parts.join("; ")
}
