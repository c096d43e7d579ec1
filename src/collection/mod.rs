//! Experiment collections
//!
//! A collection is a log directory with one subdirectory per experiment. Each
//! experiment keeps its tables in a `store.sqlite` file and its TensorBoard
//! event files under `tensorboard/`.

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;

pub mod reader;
pub mod schema;
pub mod store;
pub mod table;

pub use reader::CollectionReader;
pub use store::Store;
pub use table::{Row, Table, EXP_ID_COLUMN};

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid experiment id {0:?}")]
    InvalidExperimentId(String),

    #[error("experiment directory already has a store: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("unsupported store schema version {found} (expected {expected})")]
    UnsupportedSchema { found: i64, expected: i64 },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed row: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
