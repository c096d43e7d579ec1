//! Shared helpers

pub mod paths;
pub mod values;

pub use paths::{ensure_dir, has_tensorboard, TENSORBOARD_DIR};
pub use values::{join_list, render_value};
