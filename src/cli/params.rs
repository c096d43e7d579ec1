//! Params command implementation

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::params::{override_json, Parameters};

#[derive(Args)]
pub struct ParamsArgs {
    #[command(subcommand)]
    command: ParamsCommand,
}

#[derive(Subcommand)]
enum ParamsCommand {
    /// Fill unset parameters from a defaults file
    Merge(MergeArgs),

    /// Print one parameter (names are case-insensitive)
    Get(GetArgs),
}

#[derive(Args)]
struct MergeArgs {
    /// JSON file with the parameters to keep
    #[arg(long, value_name = "FILE")]
    params: PathBuf,

    /// JSON file with default values
    #[arg(long, value_name = "FILE")]
    defaults: PathBuf,

    /// Require both files to declare the same keys
    #[arg(long)]
    strict: bool,

    /// Write the merged parameters here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct GetArgs {
    /// JSON parameters file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Parameter name
    #[arg(value_name = "NAME")]
    name: String,
}

pub fn run(args: ParamsArgs) -> Result<()> {
    match args.command {
        ParamsCommand::Merge(args) => merge(args),
        ParamsCommand::Get(args) => get(args),
    }
}

fn merge(args: MergeArgs) -> Result<()> {
    let base = Parameters::from_json_file(&args.params)?;
    let merged = override_json(&base, &args.defaults, args.strict).with_context(|| {
        format!("Failed merging {} with {}", args.params.display(), args.defaults.display())
    })?;

    match args.output {
        Some(path) => {
            merged.save_json(&path)?;
            println!("Wrote {} parameters to {}", merged.len(), path.display());
        }
        None => println!("{}", merged),
    }
    Ok(())
}

fn get(args: GetArgs) -> Result<()> {
    let params = Parameters::from_json_file(&args.file)?;
    println!("{}", crate::utils::render_value(params.get(&args.name)));
    Ok(())
}
