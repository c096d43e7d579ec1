//! Command-line interface for expkit
//!
//! Provides `tensorboard`, `params` and `info` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod info;
mod params;
mod tensorboard;
mod utils;

/// Experiment bookkeeping: parameters, overrides and TensorBoard sessions
#[derive(Parser)]
#[command(name = "expkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start TensorBoard on a filtered, named subset of experiments
    ///
    /// TensorBoard runs in the foreground; the command returns when it exits.
    #[command(visible_alias = "tb")]
    Tensorboard(tensorboard::TensorboardArgs),

    /// Inspect and merge parameter files
    Params(params::ParamsArgs),

    /// List the experiments of a log directory
    Info(info::InfoArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Tensorboard(args) => tensorboard::run(args),
        Commands::Params(args) => params::run(args),
        Commands::Info(args) => info::run(args),
    }
}
