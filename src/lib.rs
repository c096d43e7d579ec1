//! expkit: experiment bookkeeping helpers
//!
//! - [`params::Parameters`]: a case-insensitive parameter store with JSON
//!   override merging ([`params::override_json`]).
//! - [`codec`]: serde values as printable object strings.
//! - [`collection`]: per-experiment SQLite tables and a reader across a log directory.
//! - [`tensorboard`]: filtered, named TensorBoard sessions over a collection.

pub mod cli;
pub mod codec;
pub mod collection;
pub mod config;
pub mod params;
pub mod tensorboard;
pub mod utils;

pub use codec::{obj_to_string, string_to_obj, Field};
pub use params::{override_json, Parameters, ParamsError};
