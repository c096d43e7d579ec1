//! Override merging of parameters with JSON defaults

use super::{load_json_object, Parameters, ParamsError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Key allowed in the parameters but never expected in a defaults document.
pub const CONFIG_PATH_KEY: &str = "config_path";

/// Merge `base` with the defaults stored in the JSON file at `defaults_path`.
///
/// Non-null values in `base` win. Null values in `base` are filled from the
/// defaults when the defaults have the key and are kept as null otherwise.
/// With `strict`, both sides must declare the same keys (ignoring
/// [`CONFIG_PATH_KEY`] on the `base` side).
pub fn override_json(
    base: &Parameters,
    defaults_path: &Path,
    strict: bool,
) -> Result<Parameters, ParamsError> {
    let raw = load_json_object(defaults_path)?;
    let defaults = Parameters::new(raw)?;
    tracing::debug!(
        "Merging {} parameters with {} defaults from {}",
        base.len(),
        defaults.len(),
        defaults_path.display()
    );
    merge_defaults(base, &defaults, strict)
}

/// In-memory form of [`override_json`].
pub fn merge_defaults(
    base: &Parameters,
    defaults: &Parameters,
    strict: bool,
) -> Result<Parameters, ParamsError> {
    if strict {
        check_key_sets(base, defaults)?;
    }

    let mut merged: BTreeMap<String, Value> = defaults.as_map().clone();
    for (key, value) in base {
        match value {
            Value::Null => {
                merged.entry(key.clone()).or_insert(Value::Null);
            }
            value => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    Parameters::new(merged)
}

fn check_key_sets(base: &Parameters, defaults: &Parameters) -> Result<(), ParamsError> {
    let missing_in_params: Vec<String> =
        defaults.keys().filter(|key| !base.contains(key)).map(str::to_string).collect();
    let missing_in_defaults: Vec<String> = base
        .keys()
        .filter(|key| *key != CONFIG_PATH_KEY && !defaults.contains(key))
        .map(str::to_string)
        .collect();

    if missing_in_params.is_empty() && missing_in_defaults.is_empty() {
        Ok(())
    } else {
        Err(ParamsError::KeyMismatch { missing_in_params, missing_in_defaults })
    }
}
