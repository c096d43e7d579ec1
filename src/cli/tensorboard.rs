//! Tensorboard command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::pair_up;
use crate::collection::CollectionReader;
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::tensorboard::{plan_view, NameTemplate, ParamFilter, SkipReason, TensorboardCommand};

#[derive(Args)]
pub struct TensorboardArgs {
    /// Log directory holding one subdirectory per experiment
    #[arg(long, value_name = "PATH")]
    pub logdir: PathBuf,

    /// Port passed on to TensorBoard [default: 6006]
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Name of the metadata table [default: metadata]
    #[arg(long, value_name = "NAME")]
    pub metadata_table: Option<String>,

    /// Run name template with {column} placeholders; the experiment id is always appended
    ///
    /// `{{` and `}}` are literal braces. `{column:.3f}` prints a number with three
    /// decimals; no other format spec is accepted.
    #[arg(long, value_name = "TEMPLATE")]
    pub format_str: Option<String>,

    /// Only show experiments whose PARAM matches REGEX (repeatable)
    ///
    /// REGEX is matched from the start of the value's text form: strings as is,
    /// other values as compact JSON (`true`, `false`, `1e-6`, `[1,2]`).
    #[arg(long, num_args = 2, value_names = ["PARAM", "REGEX"], action = clap::ArgAction::Append)]
    pub filter_param: Vec<String>,

    /// TensorBoard executable [default: tensorboard]
    #[arg(long, value_name = "PATH")]
    pub tensorboard_bin: Option<String>,

    /// Path to config file (defaults to expkit.toml or expkit.yaml in the log directory)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the TensorBoard command instead of running it
    ///
    /// Without it TensorBoard runs in the foreground until it exits; a non-zero
    /// exit status is reported as an error.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: TensorboardArgs) -> Result<()> {
    let config = load_config(&args.logdir, args.config.as_deref())?;
    let settings = merge_cli_with_config(
        CliOverrides {
            port: args.port,
            metadata_table: args.metadata_table,
            tensorboard_bin: args.tensorboard_bin,
            format_str: args.format_str,
            filters: pair_up(&args.filter_param, "--filter-param")?,
        },
        config,
    )?;

    let template = NameTemplate::parse(&settings.format_str)?;
    let filters = settings
        .filters
        .iter()
        .map(|(param, pattern)| ParamFilter::new(param.as_str(), pattern.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let reader = CollectionReader::new(&args.logdir)?;
    let metadata = reader.table(&settings.metadata_table).with_context(|| {
        format!("Failed reading table '{}' from {}", settings.metadata_table, args.logdir.display())
    })?;

    let plan = plan_view(&args.logdir, &metadata, &template, &filters)?;
    for skipped in &plan.skipped {
        if skipped.reason == SkipReason::MissingMetadata {
            println!("Warning: Skipping experiment {}", skipped.exp_id);
        }
    }
    if plan.entries.is_empty() {
        bail!("No experiments to show under {}", args.logdir.display());
    }

    let command = TensorboardCommand::new(settings.tensorboard_bin, &plan, settings.port);
    if args.dry_run {
        println!("{}", command);
        return Ok(());
    }

    println!("Running '{}'", command);
    command.run()?;
    Ok(())
}
