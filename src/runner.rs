use crate::error::{Result, UfwCliError};
use crate::invocation::Invocation;
use std::process::Command;
use tracing::debug;

/// Process-execution seam between the dispatcher and the host.
#[cfg_attr(test, mockall::automock)]
pub trait Runner {
    /// Runs to completion with stdout/stderr inherited from this process.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Runs to completion with output captured and discarded. Only the exit
    /// status matters.
    fn probe(&self, invocation: &Invocation) -> Result<()>;
}

/// Blocking runner backed by `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args());
        cmd
    }

    fn spawn_failed(invocation: &Invocation, source: std::io::Error) -> UfwCliError {
        UfwCliError::SpawnFailed {
            invocation: invocation.to_string(),
            source,
        }
    }
}

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!("Running {}", invocation);
        let status = Self::command(invocation)
            .status()
            .map_err(|e| Self::spawn_failed(invocation, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(UfwCliError::ExitFailed {
                invocation: invocation.to_string(),
                status,
            })
        }
    }

    fn probe(&self, invocation: &Invocation) -> Result<()> {
        debug!("Probing {}", invocation);
        let output = Self::command(invocation)
            .output()
            .map_err(|e| Self::spawn_failed(invocation, e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(UfwCliError::ExitFailed {
                invocation: invocation.to_string(),
                status: output.status,
            })
        }
    }
}
