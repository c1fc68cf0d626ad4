//! Git repository initialisation through the `git` executable.

use std::path::Path;
use std::process::Command;

use pyscaff_core::{
    application::{ApplicationError, ports::VersionControl},
    error::PyscaffResult,
};
use tracing::{debug, instrument};

/// Shells out to `git` found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, root: &Path, args: &[&str]) -> PyscaffResult<()> {
        debug!(?args, "Running git");
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|e| ApplicationError::VersionControl {
                reason: format!("{} {}: {}", self.program, args.join(" "), e),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::VersionControl {
                reason: format!(
                    "{} {} exited with {}: {}",
                    self.program,
                    args.join(" "),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    #[instrument(skip(self))]
    fn init(&self, root: &Path, user: &str, email: &str) -> PyscaffResult<()> {
        self.run(root, &["init"])?;
        self.run(root, &["config", "user.name", user])?;
        self.run(root, &["config", "user.email", email])
    }
}
