//! Writing experiment stores

use super::schema::{open_or_create, open_read_only, STORE_FILE};
use super::table::{decode_row, encode_row, Row};
use super::CollectionError;
use crate::params::Parameters;
use crate::utils::{ensure_dir, TENSORBOARD_DIR};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Tables of a single experiment, stored in `<logdir>/<exp_id>/store.sqlite`.
pub struct Store {
    exp_id: String,
    exp_dir: PathBuf,
    conn: Connection,
}

impl Store {
    /// Create a new experiment under `logdir`.
    ///
    /// A random UUID is used when `exp_id` is `None`. The experiment directory
    /// and its `tensorboard/` subdirectory are created as needed; an existing
    /// store for the same id is an error.
    pub fn create(logdir: &Path, exp_id: Option<&str>) -> Result<Self, CollectionError> {
        let exp_id = match exp_id {
            Some(id) => validate_exp_id(id)?.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let exp_dir = logdir.join(&exp_id);
        let store_path = exp_dir.join(STORE_FILE);
        if store_path.exists() {
            return Err(CollectionError::AlreadyExists(exp_dir));
        }

        let tensorboard_dir = exp_dir.join(TENSORBOARD_DIR);
        if !ensure_dir(&tensorboard_dir, true) {
            return Err(CollectionError::NotADirectory(tensorboard_dir));
        }

        let conn = open_or_create(&store_path)?;
        tracing::info!("Created experiment {} in {}", exp_id, exp_dir.display());
        Ok(Self { exp_id, exp_dir, conn })
    }

    /// Open the store of an existing experiment directory for reading.
    pub fn open(exp_dir: &Path) -> Result<Self, CollectionError> {
        let exp_id = exp_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CollectionError::InvalidExperimentId(exp_dir.display().to_string()))?
            .to_string();
        let conn = open_read_only(&exp_dir.join(STORE_FILE))?;
        Ok(Self { exp_id, exp_dir: exp_dir.to_path_buf(), conn })
    }

    pub fn exp_id(&self) -> &str {
        &self.exp_id
    }

    pub fn path(&self) -> &Path {
        &self.exp_dir
    }

    /// Directory TensorBoard event files should be written to.
    pub fn tensorboard_dir(&self) -> PathBuf {
        self.exp_dir.join(TENSORBOARD_DIR)
    }

    /// Append `row` to `table`.
    pub fn log_row(&self, table: &str, row: &Row) -> Result<(), CollectionError> {
        let stored = encode_row(row)?;
        self.conn.execute(
            "INSERT INTO rows(table_name, row) VALUES(?1, ?2)",
            params![table, stored],
        )?;
        tracing::debug!("Logged {} column(s) to {}/{}", row.len(), self.exp_id, table);
        Ok(())
    }

    /// Append the entries of `params` to `table` as one row.
    pub fn log_params(&self, table: &str, params: &Parameters) -> Result<(), CollectionError> {
        self.log_row(table, params.as_map())
    }

    /// Names of the tables holding at least one row, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, CollectionError> {
        let mut stmt =
            self.conn.prepare("SELECT DISTINCT table_name FROM rows ORDER BY table_name")?;
        let names = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Rows of `table` in insertion order.
    pub fn read_table(&self, table: &str) -> Result<Vec<Row>, CollectionError> {
        let mut stmt = self.conn.prepare("SELECT row FROM rows WHERE table_name = ?1 ORDER BY id")?;
        let stored =
            stmt.query_map([table], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;

        let mut rows = Vec::with_capacity(stored.len());
        for raw in stored {
            rows.push(decode_row(&raw)?);
        }
        Ok(rows)
    }
}

fn validate_exp_id(exp_id: &str) -> Result<&str, CollectionError> {
    let mut components = Path::new(exp_id).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(exp_id),
        _ => Err(CollectionError::InvalidExperimentId(exp_id.to_string())),
    }
}
