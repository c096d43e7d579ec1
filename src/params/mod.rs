//! Case-insensitive parameter store
//!
//! `Parameters` wraps a flat JSON mapping. Every key is stored lowercased and
//! every accessor lowercases the requested name, so `LR`, `Lr` and `lr` all
//! address the same entry. Unknown keys read as JSON null.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::fs;
use std::path::Path;

pub mod error;
pub mod merge;

pub use error::ParamsError;
pub use merge::{merge_defaults, override_json, CONFIG_PATH_KEY};

static NULL: Value = Value::Null;

/// A configuration mapping with lowercase-normalized keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    params: BTreeMap<String, Value>,
}

impl Parameters {
    /// Build a store from `params`, lowercasing every key.
    ///
    /// Fails if two keys differ only by case.
    pub fn new<I, K>(params: I) -> Result<Self, ParamsError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut originals: BTreeMap<String, String> = BTreeMap::new();
        let mut normalized = BTreeMap::new();

        for (key, value) in params {
            let key = key.into();
            let lower = key.to_lowercase();
            if let Some(first) = originals.get(&lower) {
                return Err(ParamsError::KeyCollision { first: first.clone(), second: key });
            }
            originals.insert(lower.clone(), key);
            normalized.insert(lower, value);
        }

        Ok(Self { params: normalized })
    }

    /// Parse a JSON object into a store.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a store from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ParamsError> {
        let raw = load_json_object(path)?;
        Self::new(raw)
    }

    /// Value stored under `name`, or JSON null when absent.
    pub fn get(&self, name: &str) -> &Value {
        self.params.get(&name.to_lowercase()).unwrap_or(&NULL)
    }

    /// Like [`get`](Self::get) but treats an explicit null as unset.
    pub fn get_opt(&self, name: &str) -> Option<&Value> {
        match self.get(name) {
            Value::Null => None,
            value => Some(value),
        }
    }

    /// Deserialize the value under `name` into `T`.
    ///
    /// Absent keys deserialize from null, so `Option<T>` targets yield `None`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, serde_json::Error> {
        T::deserialize(self.get(name))
    }

    /// Store `value` under the lowercased `name`, returning the previous value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.params.insert(name.to_lowercase(), value.into())
    }

    /// Remove the entry for `name`.
    pub fn remove(&mut self, name: &str) -> Result<Value, ParamsError> {
        self.params
            .remove(&name.to_lowercase())
            .ok_or_else(|| ParamsError::KeyNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(&name.to_lowercase())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.params
    }

    /// Write the indented JSON form to `path`, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), ParamsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ParamsError::Io { path: parent.to_path_buf(), source })?;
        }
        fs::write(path, format!("{}\n", self))
            .map_err(|source| ParamsError::Io { path: path.to_path_buf(), source })
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.params).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Parameters::new(raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Map<String, Value>> for Parameters {
    type Error = ParamsError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        Parameters::new(map)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Return `new` when `old` is unset, otherwise require both to agree.
pub fn consistent(key: &str, old: Option<Value>, new: Value) -> Result<Value, ParamsError> {
    match old {
        None | Some(Value::Null) => Ok(new),
        Some(old) if old == new => Ok(old),
        Some(old) => Err(ParamsError::Inconsistent { key: key.to_string(), old, new }),
    }
}

pub(crate) fn load_json_object(path: &Path) -> Result<Map<String, Value>, ParamsError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ParamsError::Io { path: path.to_path_buf(), source })?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|source| ParamsError::Json { path: path.to_path_buf(), source })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ParamsError::NotAnObject(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        let Value::Object(map) = value else { panic!("expected object") };
        Parameters::try_from(map).expect("valid params")
    }

    #[test]
    fn test_reads_back_in_any_case() {
        let ps = params(json!({"LR": 0.1, "batch_size": 64, "arch": "resnet18", "Steps": [1, 2]}));

        assert_eq!(ps.get("lr"), &json!(0.1));
        assert_eq!(ps.get("Lr"), &json!(0.1));
        assert_eq!(ps.get("BATCH_SIZE"), &json!(64));
        assert_eq!(ps.get("Arch"), &json!("resnet18"));
        assert_eq!(ps.get("steps"), &json!([1, 2]));
    }

    #[test]
    fn test_construction_rejects_case_collisions() {
        let err = Parameters::new([("A", json!(1)), ("a", json!(2))]).unwrap_err();
        assert!(matches!(err, ParamsError::KeyCollision { .. }));
    }

    #[test]
    fn test_unknown_key_reads_as_null() {
        let ps = params(json!({"a": 1}));
        assert_eq!(ps.get("foo"), &Value::Null);
        assert!(ps.get_opt("foo").is_none());
    }

    #[test]
    fn test_explicit_null_is_unset() {
        let ps = params(json!({"resume": null}));
        assert!(ps.contains("resume"));
        assert!(ps.get_opt("resume").is_none());
        assert_eq!(ps.get_as::<Option<String>>("resume").expect("deserialize"), None);
    }

    #[test]
    fn test_set_normalizes_and_overwrites() {
        let mut ps = Parameters::default();
        assert!(ps.set("Epochs", 10).is_none());
        assert_eq!(ps.set("EPOCHS", 20), Some(json!(10)));

        assert_eq!(ps.len(), 1);
        assert_eq!(ps.keys().collect::<Vec<_>>(), vec!["epochs"]);
        assert_eq!(ps.get_as::<u32>("epochs").expect("u32"), 20);
    }

    #[test]
    fn test_remove_uses_normalized_key() {
        let mut ps = params(json!({"Dropout": 0.5}));
        assert_eq!(ps.remove("DROPOUT").expect("present"), json!(0.5));
        assert!(ps.is_empty());

        let err = ps.remove("dropout").unwrap_err();
        assert!(matches!(err, ParamsError::KeyNotFound(name) if name == "dropout"));
    }

    #[test]
    fn test_display_round_trips_raw_mapping() {
        let ps = params(json!({"x": 1, "y": [1, 2, 3], "z": null, "name": "run"}));
        let text = ps.to_string();
        assert!(text.contains("\n  \"name\": \"run\""));

        let parsed: BTreeMap<String, Value> = serde_json::from_str(&text).expect("json");
        assert_eq!(&parsed, ps.as_map());
    }

    #[test]
    fn test_deserialize_validates_collisions() {
        let ok = Parameters::from_json_str(r#"{"Alpha": 1}"#).expect("valid");
        assert_eq!(ok.get("alpha"), &json!(1));

        assert!(Parameters::from_json_str(r#"{"Alpha": 1, "ALPHA": 2}"#).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let path = tmp.path().join("nested").join("params.json");
        let ps = params(json!({"seed": 7, "tags": ["a", "b"]}));

        ps.save_json(&path).expect("save");
        let loaded = Parameters::from_json_file(&path).expect("load");
        assert_eq!(loaded, ps);
    }

    #[test]
    fn test_consistent() {
        assert_eq!(consistent("k", None, json!(3)).expect("unset"), json!(3));
        assert_eq!(consistent("k", Some(Value::Null), json!(3)).expect("null"), json!(3));
        assert_eq!(consistent("k", Some(json!(3)), json!(3)).expect("equal"), json!(3));
        assert!(matches!(
            consistent("k", Some(json!(3)), json!(4)),
            Err(ParamsError::Inconsistent { .. })
        ));
    }
}
