//! Config file loading

use crate::tensorboard::{DEFAULT_PORT, DEFAULT_TENSORBOARD_BIN};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Section name used when the settings are nested in a larger file.
const SECTION: &str = "expkit";

/// Launcher settings read from `expkit.toml` / `expkit.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub port: u16,
    pub metadata_table: String,
    pub tensorboard_bin: String,
    pub format_str: Option<String>,
    /// Parameter name to regex, applied unless overridden on the command line.
    pub filters: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metadata_table: "metadata".to_string(),
            tensorboard_bin: DEFAULT_TENSORBOARD_BIN.to_string(),
            format_str: None,
            filters: BTreeMap::new(),
        }
    }
}

/// Load the config for `logdir`.
///
/// An explicit `config_path` must parse. A config discovered in `logdir` that
/// fails to parse is reported and replaced by the defaults.
pub fn load_config(logdir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(logdir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[expkit]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `expkit:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(logdir: &Path) -> Option<PathBuf> {
    let candidates = ["expkit.toml", ".expkit.toml", "expkit.yaml", ".expkit.yaml", "expkit.yml"];

    candidates.iter().map(|candidate| logdir.join(candidate)).find(|path| path.is_file())
}
