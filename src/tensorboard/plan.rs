//! Selecting and naming the experiments of a TensorBoard session

use super::filter::ParamFilter;
use super::template::NameTemplate;
use super::{LaunchError, NAME_SEPARATOR};
use crate::collection::reader::list_subdirs;
use crate::collection::{CollectionError, Table};
use crate::utils::has_tensorboard;
use std::path::{Path, PathBuf};

/// One experiment shown in TensorBoard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub exp_id: String,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The metadata table has no row for the experiment.
    MissingMetadata,
    /// The named filter rejected the experiment.
    Filtered { param: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub exp_id: String,
    pub reason: SkipReason,
}

/// Result of matching a collection against the filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPlan {
    pub entries: Vec<ViewEntry>,
    pub skipped: Vec<Skipped>,
}

impl ViewPlan {
    /// Comma-separated `name:path` list understood by `tensorboard --logdir_spec`.
    pub fn logdir_spec(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}:{}", entry.name, entry.path.display()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Subdirectories of `logdir` that contain a `tensorboard` folder, sorted.
pub fn find_viewable_experiments(logdir: &Path) -> Result<Vec<String>, LaunchError> {
    let subdirs = list_subdirs(logdir).map_err(|e| match e {
        CollectionError::Io { path, source } => LaunchError::Io { path, source },
        other => LaunchError::Collection(other),
    })?;

    Ok(subdirs
        .into_iter()
        .filter(|dir| has_tensorboard(dir))
        .filter_map(|dir| dir.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect())
}

/// Decide which viewable experiments under `logdir` to show and how to name them.
///
/// Experiments without a metadata row and experiments rejected by a filter are
/// reported in [`ViewPlan::skipped`]. A template column that the metadata
/// table does not have is an error.
pub fn plan_view(
    logdir: &Path,
    metadata: &Table,
    template: &NameTemplate,
    filters: &[ParamFilter],
) -> Result<ViewPlan, LaunchError> {
    if !metadata.is_empty() {
        let columns = metadata.columns();
        if let Some(column) = template.columns().find(|column| !columns.contains(column)) {
            return Err(LaunchError::UnknownColumn {
                column: column.to_string(),
                table: metadata.name().to_string(),
            });
        }
    }

    let mut plan = ViewPlan::default();
    for exp_id in find_viewable_experiments(logdir)? {
        let Some(row) = metadata.row_for(&exp_id) else {
            plan.skipped.push(Skipped { exp_id, reason: SkipReason::MissingMetadata });
            continue;
        };

        if let Some(rejected) = filters.iter().find(|filter| !filter.matches(row)) {
            tracing::debug!(
                "Filtered out {}: {} does not match '{}'",
                exp_id,
                rejected.param(),
                rejected.pattern()
            );
            plan.skipped.push(Skipped {
                exp_id,
                reason: SkipReason::Filtered { param: rejected.param().to_string() },
            });
            continue;
        }

        let name = format!("{}{}{}", template.render(row), NAME_SEPARATOR, exp_id);
        plan.entries.push(ViewEntry { path: logdir.join(&exp_id), exp_id, name });
    }

    tracing::info!(
        "Selected {} experiment(s), skipped {}",
        plan.entries.len(),
        plan.skipped.len()
    );
    Ok(plan)
}
