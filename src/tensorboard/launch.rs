//! Running the TensorBoard binary

use super::plan::ViewPlan;
use super::LaunchError;
use std::fmt;
use std::process::Command;

pub const DEFAULT_PORT: u16 = 6006;
pub const DEFAULT_TENSORBOARD_BIN: &str = "tensorboard";

/// A `tensorboard --logdir_spec ... --port ...` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorboardCommand {
    program: String,
    logdir_spec: String,
    port: u16,
}

impl TensorboardCommand {
    pub fn new(program: impl Into<String>, plan: &ViewPlan, port: u16) -> Self {
        Self { program: program.into(), logdir_spec: plan.logdir_spec(), port }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> Vec<String> {
        vec![
            "--logdir_spec".to_string(),
            self.logdir_spec.clone(),
            "--port".to_string(),
            self.port.to_string(),
        ]
    }

    /// Run TensorBoard in the foreground until it exits.
    pub fn run(&self) -> Result<(), LaunchError> {
        let status = Command::new(&self.program)
            .args(self.args())
            .status()
            .map_err(|source| LaunchError::Spawn { program: self.program.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Exited { program: self.program.clone(), status })
        }
    }
}

impl fmt::Display for TensorboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
