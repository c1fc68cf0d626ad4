//! Editor process launcher.

use std::process::Command;

use pyscaff_core::{
    application::{ApplicationError, ports::EditorLauncher},
    domain::Invocation,
    error::PyscaffResult,
};
use tracing::{debug, instrument};

/// Runs the editor as a child process with inherited stdio and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl EditorLauncher for ProcessLauncher {
    #[instrument(skip_all, fields(program = %invocation.program))]
    fn launch(&self, invocation: &Invocation) -> PyscaffResult<Option<i32>> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|e| ApplicationError::EditorLaunch {
                program: invocation.program.clone(),
                reason: e.to_string(),
            })?;

        debug!(%status, "Editor exited");
        Ok(status.code())
    }
}
