//! expkit: experiment bookkeeping from the command line
//!
//! Merges parameter files and starts TensorBoard on filtered, readably named
//! subsets of an experiment collection.

use anyhow::Result;

fn main() -> Result<()> {
    expkit::cli::run()
}
