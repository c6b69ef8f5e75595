use crate::error::Result;
use crate::invocation::Invocation;
use crate::plan::{Plan, Step};
use crate::report::{Outcome, Report};
use crate::runner::Runner;
use colored::Colorize;
use std::io::Write;
use tracing::{info, warn};

/// Whether invocations are started or only described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Execute,
    Simulate,
}

impl ExecutionMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::Simulate
        } else {
            Self::Execute
        }
    }
}

/// Runs a [`Plan`] step by step. A failing step is reported and the next one
/// still runs.
pub struct Dispatcher<R: Runner, W: Write> {
    pub(crate) runner: R,
    pub(crate) mode: ExecutionMode,
    pub(crate) out: W,
}

impl<R: Runner, W: Write> Dispatcher<R, W> {
    pub fn new(runner: R, mode: ExecutionMode, out: W) -> Self {
        Self { runner, mode, out }
    }

    pub fn dispatch(&mut self, plan: &Plan) -> Result<Report> {
        match plan {
            Plan::Install { probe, install } => self.install(probe, install),
            Plan::Sequence {
                intro,
                steps,
                outro,
            } => self.run_sequence(*intro, steps, *outro),
        }
    }

    fn run_sequence(
        &mut self,
        intro: Option<&str>,
        steps: &[Step],
        outro: Option<&str>,
    ) -> Result<Report> {
        if let Some(intro) = intro {
            writeln!(self.out, "{}", intro.cyan())?;
        }

        let mut report = Report::default();
        if steps.is_empty() {
            writeln!(self.out, "{}", "Nothing to do.".yellow())?;
            return Ok(report);
        }

        info!("Dispatching {} invocation(s) in {:?} mode", steps.len(), self.mode);
        for step in steps {
            let outcome = self.execute(step)?;
            report.record(step.invocation.to_string(), outcome);
        }

        if let Some(outro) = outro {
            if self.mode == ExecutionMode::Execute && report.is_success() {
                writeln!(self.out, "{}", outro.green())?;
            }
        }
        report.display(&mut self.out)?;

        Ok(report)
    }

    /// Runs or describes one step. Failures become an [`Outcome`], never an
    /// early return; only writing to the terminal can fail here.
    pub(crate) fn execute(&mut self, step: &Step) -> Result<Outcome> {
        if self.mode == ExecutionMode::Simulate {
            self.describe(&step.invocation, None)?;
            return Ok(Outcome::Simulated);
        }

        match self.runner.run(&step.invocation) {
            Ok(()) => Ok(Outcome::Succeeded),
            Err(e) => {
                warn!("{} failed: {}", step.invocation, e);
                writeln!(
                    self.out,
                    "{} {}",
                    format!("[✗] Failed to {}:", step.label).bright_red(),
                    e
                )?;
                Ok(Outcome::Failed(e.to_string()))
            }
        }
    }

    pub(crate) fn describe(&mut self, invocation: &Invocation, note: Option<&str>) -> Result<()> {
        match note {
            Some(note) => writeln!(self.out, "{} {} {}", "[dry-run]".cyan(), invocation, note)?,
            None => writeln!(self.out, "{} {}", "[dry-run]".cyan(), invocation)?,
        }
        Ok(())
    }
}
