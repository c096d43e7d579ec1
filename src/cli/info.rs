//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::collection::CollectionReader;
use crate::tensorboard::find_viewable_experiments;

#[derive(Args)]
pub struct InfoArgs {
    /// Log directory to inspect
    #[arg(long, value_name = "PATH")]
    pub logdir: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let reader = CollectionReader::new(&args.logdir)?;
    let experiments = reader.experiments()?;
    let viewable = find_viewable_experiments(&args.logdir)?;

    println!("Log directory: {}", args.logdir.display());
    println!("Experiments: {}", experiments.len());
    for exp_id in &experiments {
        let tables = reader.store(exp_id)?.table_names()?;
        let marker = if viewable.contains(exp_id) { " [tensorboard]" } else { "" };
        println!("  {}{}", exp_id, marker);
        if !tables.is_empty() {
            println!("    tables: {}", tables.join(", "));
        }
    }

    let without_store: Vec<&String> =
        viewable.iter().filter(|id| !experiments.contains(id)).collect();
    if !without_store.is_empty() {
        println!("TensorBoard logs without a store:");
        for exp_id in without_store {
            println!("  {}", exp_id);
        }
    }

    Ok(())
}
