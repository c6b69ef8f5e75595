use crate::dispatcher::{Dispatcher, ExecutionMode};
use crate::error::Result;
use crate::invocation::Invocation;
use crate::plan::Step;
use crate::report::{Outcome, Report};
use crate::runner::Runner;
use colored::Colorize;
use std::io::Write;
use tracing::info;

impl<R: Runner, W: Write> Dispatcher<R, W> {
    /// Probes for the firewall utility and installs it only when the probe
    /// fails. Nothing runs after a failed install.
    pub(crate) fn install(&mut self, probe: &Invocation, install: &Step) -> Result<Report> {
        let mut report = Report::default();
        writeln!(self.out, "{}", "[+] Checking if UFW is installed...".cyan())?;

        if self.mode == ExecutionMode::Simulate {
            self.describe(probe, None)?;
            report.record(probe.to_string(), Outcome::Simulated);
            let note = format!("(only if `{}` fails)", probe);
            self.describe(&install.invocation, Some(&note))?;
            report.record(install.invocation.to_string(), Outcome::Simulated);
            return Ok(report);
        }

        if self.runner.probe(probe).is_ok() {
            info!("UFW is already installed");
            report.record(probe.to_string(), Outcome::Succeeded);
            report.record(install.invocation.to_string(), Outcome::Skipped);
            writeln!(self.out, "{}", "[✓] UFW is already installed.".green())?;
            return Ok(report);
        }

        // A failed probe is the expected "not installed" signal, not a failure.
        report.record(probe.to_string(), Outcome::Skipped);
        info!("UFW not found. Installing...");
        writeln!(self.out, "{}", "[+] UFW not found. Installing...".cyan())?;

        let outcome = self.execute(install)?;
        if outcome == Outcome::Succeeded {
            writeln!(self.out, "{}", "[✓] UFW installed successfully.".green())?;
        }
        report.record(install.invocation.to_string(), outcome);

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::UfwCliConfig;
    use crate::dispatcher::{Dispatcher, ExecutionMode};
    use crate::error::UfwCliError;
    use crate::plan::{plan, Verb};
    use crate::report::Outcome;
    use crate::runner::MockRunner;

    fn not_found(invocation: &crate::invocation::Invocation) -> UfwCliError {
        UfwCliError::SpawnFailed {
            invocation: invocation.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
    }

    #[test]
    fn present_utility_skips_install() {
        let mut runner = MockRunner::new();
        runner
            .expect_probe()
            .withf(|inv| inv.to_string() == "ufw --version")
            .times(1)
            .returning(|_| Ok(()));
        runner.expect_run().never();

        let mut out = Vec::new();
        let report = Dispatcher::new(runner, ExecutionMode::Execute, &mut out)
            .dispatch(&plan(&Verb::Install, &UfwCliConfig::default()))
            .unwrap();

        assert_eq!(report.steps[1].outcome, Outcome::Skipped);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("UFW is already installed."));
    }

    #[test]
    fn missing_utility_triggers_install() {
        let mut runner = MockRunner::new();
        runner.expect_probe().times(1).returning(|inv| Err(not_found(inv)));
        runner
            .expect_run()
            .withf(|inv| inv.to_string() == "sudo apt-get install ufw -y")
            .times(1)
            .returning(|_| Ok(()));

        let mut out = Vec::new();
        let report = Dispatcher::new(runner, ExecutionMode::Execute, &mut out)
            .dispatch(&plan(&Verb::Install, &UfwCliConfig::default()))
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.steps[1].outcome, Outcome::Succeeded);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("UFW not found. Installing..."));
        assert!(text.contains("UFW installed successfully."));
    }

    #[test]
    fn failed_install_is_reported() {
        let mut runner = MockRunner::new();
        runner.expect_probe().returning(|inv| Err(not_found(inv)));
        runner.expect_run().times(1).returning(|inv| Err(not_found(inv)));

        let mut out = Vec::new();
        let report = Dispatcher::new(runner, ExecutionMode::Execute, &mut out)
            .dispatch(&plan(&Verb::Install, &UfwCliConfig::default()))
            .unwrap();

        assert_eq!(report.failures(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Failed to install UFW:"));
        assert!(!text.contains("installed successfully"));
    }

    #[test]
    fn simulate_describes_probe_and_conditional_install() {
        let mut runner = MockRunner::new();
        runner.expect_probe().never();
        runner.expect_run().never();

        let mut out = Vec::new();
        Dispatcher::new(runner, ExecutionMode::Simulate, &mut out)
            .dispatch(&plan(&Verb::Install, &UfwCliConfig::default()))
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ufw --version"));
        assert!(text.contains("sudo apt-get install ufw -y (only if `ufw --version` fails)"));
    }
}
