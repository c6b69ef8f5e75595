use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
    Simulated,
    /// Not needed, e.g. install when the utility is already present.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub invocation: String,
    pub outcome: Outcome,
}

/// Ordered outcomes of one verb.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
}

impl Report {
    pub fn record(&mut self, invocation: String, outcome: Outcome) {
        self.steps.push(StepOutcome {
            invocation,
            outcome,
        });
    }

    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, Outcome::Failed(_)))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    pub fn invocations(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.invocation.as_str()).collect()
    }

    /// One-line summary, printed only when something went wrong.
    pub fn display<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let failed = self.failures();
        if failed == 0 {
            return Ok(());
        }
        let ran = self
            .steps
            .iter()
            .filter(|s| matches!(s.outcome, Outcome::Succeeded | Outcome::Failed(_)))
            .count();
        writeln!(
            out,
            "{} {} of {} invocation(s) failed",
            "[!]".yellow(),
            failed,
            ran
        )
    }
}
