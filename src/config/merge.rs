//! Combining CLI flags with the loaded config

use super::loader::Config;
use anyhow::{bail, Result};

/// Launcher flags as given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub metadata_table: Option<String>,
    pub tensorboard_bin: Option<String>,
    pub format_str: Option<String>,
    pub filters: Vec<(String, String)>,
}

/// Fully resolved launcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub port: u16,
    pub metadata_table: String,
    pub tensorboard_bin: String,
    pub format_str: String,
    pub filters: Vec<(String, String)>,
}

pub fn merge_cli_with_config(cli: CliOverrides, config: Config) -> Result<LaunchSettings> {
    let Some(format_str) = cli.format_str.or(config.format_str) else {
        bail!("--format-str is required (or set format_str in the config file)");
    };

    // Config filters apply unless the same parameter is filtered on the command line.
    let mut filters: Vec<(String, String)> = config
        .filters
        .into_iter()
        .filter(|(param, _)| !cli.filters.iter().any(|(p, _)| p == param))
        .collect();
    filters.extend(cli.filters);

    Ok(LaunchSettings {
        port: cli.port.unwrap_or(config.port),
        metadata_table: cli.metadata_table.unwrap_or(config.metadata_table),
        tensorboard_bin: cli.tensorboard_bin.unwrap_or(config.tensorboard_bin),
        format_str,
        filters,
    })
}
