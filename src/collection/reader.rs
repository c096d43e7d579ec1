//! Reading tables across a collection

use super::schema::STORE_FILE;
use super::store::Store;
use super::table::{Row, Table, EXP_ID_COLUMN};
use super::CollectionError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads the experiments found directly under a log directory.
pub struct CollectionReader {
    logdir: PathBuf,
}

impl CollectionReader {
    pub fn new(logdir: impl Into<PathBuf>) -> Result<Self, CollectionError> {
        let logdir = logdir.into();
        if !logdir.is_dir() {
            return Err(CollectionError::NotADirectory(logdir));
        }
        Ok(Self { logdir })
    }

    pub fn logdir(&self) -> &Path {
        &self.logdir
    }

    /// Ids of the experiments that have a store, sorted by name.
    pub fn experiments(&self) -> Result<Vec<String>, CollectionError> {
        let mut ids = Vec::new();
        for entry in list_subdirs(&self.logdir)? {
            if !entry.join(STORE_FILE).is_file() {
                tracing::debug!("No store in {}, skipping", entry.display());
                continue;
            }
            if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
                ids.push(name.to_string());
            }
        }
        Ok(ids)
    }

    /// Open the store of experiment `exp_id`.
    pub fn store(&self, exp_id: &str) -> Result<Store, CollectionError> {
        Store::open(&self.logdir.join(exp_id))
    }

    /// Concatenate table `name` over every experiment.
    ///
    /// Each row gets an `exp_id` column naming its experiment. Experiments
    /// without rows in the table are skipped with a warning.
    pub fn table(&self, name: &str) -> Result<Table, CollectionError> {
        let mut rows: Vec<Row> = Vec::new();
        for exp_id in self.experiments()? {
            let store = self.store(&exp_id)?;
            let exp_rows = store.read_table(name)?;
            if exp_rows.is_empty() {
                tracing::warn!("Experiment {} has no '{}' table", exp_id, name);
                continue;
            }
            rows.extend(exp_rows.into_iter().map(|mut row| {
                row.insert(EXP_ID_COLUMN.to_string(), Value::String(exp_id.clone()));
                row
            }));
        }
        tracing::debug!("Read {} row(s) of '{}' from {}", rows.len(), name, self.logdir.display());
        Ok(Table::new(name, rows))
    }
}

/// Immediate subdirectories of `dir`, sorted by name. Symlinks to directories count.
pub fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>, CollectionError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| CollectionError::Io {
            path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;
        // Follows symlinks; dangling links are not directories.
        if entry.path().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).expect("row")
    }

    #[test]
    fn test_table_concatenates_experiments() {
        let tmp = TempDir::new().expect("tmp");
        let e2 = Store::create(tmp.path(), Some("e2")).expect("e2");
        e2.log_row("metadata", &row(json!({"p": "b"}))).expect("log");
        let e1 = Store::create(tmp.path(), Some("e1")).expect("e1");
        e1.log_row("metadata", &row(json!({"p": "a", "exp_id": "stale"}))).expect("log");
        let e3 = Store::create(tmp.path(), Some("e3")).expect("e3");
        e3.log_row("train", &row(json!({"loss": 0.3}))).expect("log");
        fs::create_dir_all(tmp.path().join("not-an-experiment")).expect("mkdir");

        let reader = CollectionReader::new(tmp.path()).expect("reader");
        assert_eq!(reader.experiments().expect("experiments"), vec!["e1", "e2", "e3"]);

        let table = reader.table("metadata").expect("table");
        assert_eq!(table.len(), 2);
        assert_eq!(table.row_for("e1").map(|r| r["p"].clone()), Some(json!("a")));
        assert_eq!(table.row_for("e2").map(|r| r["p"].clone()), Some(json!("b")));
        assert!(table.row_for("e3").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_experiments_are_listed() {
        let tmp = TempDir::new().expect("tmp");
        let elsewhere = TempDir::new().expect("elsewhere");
        let store = Store::create(elsewhere.path(), Some("real")).expect("create");
        store.log_row("metadata", &row(json!({"p": "a"}))).expect("log");
        std::os::unix::fs::symlink(store.path(), tmp.path().join("linked")).expect("symlink");
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling"))
            .expect("dangling symlink");

        let subdirs = list_subdirs(tmp.path()).expect("subdirs");
        assert_eq!(subdirs, vec![tmp.path().join("linked")]);

        let reader = CollectionReader::new(tmp.path()).expect("reader");
        assert_eq!(reader.experiments().expect("experiments"), vec!["linked"]);
        let table = reader.table("metadata").expect("table");
        assert_eq!(table.row_for("linked").map(|r| r["p"].clone()), Some(json!("a")));
    }

    #[test]
    fn test_reader_requires_directory() {
        let tmp = TempDir::new().expect("tmp");
        assert!(matches!(
            CollectionReader::new(tmp.path().join("missing")),
            Err(CollectionError::NotADirectory(_))
        ));
    }
}
