//! Verb → invocation table.
//!
//! Every verb resolves to a fixed list of firewall invocations. `configure` is
//! the only verb whose invocations depend on operator input.

use crate::config::UfwCliConfig;
use crate::invocation::Invocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusView {
    Verbose,
    Numbered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Install,
    Setup,
    /// Raw comma-separated port list as typed by the operator.
    Configure(String),
    Status(Option<StatusView>),
    Enable,
    Disable,
    Reset,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub invocation: Invocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Run `install` only when `probe` fails.
    Install { probe: Invocation, install: Step },
    Sequence {
        intro: Option<&'static str>,
        steps: Vec<Step>,
        outro: Option<&'static str>,
    },
}

impl Plan {
    /// Every invocation the plan may start, in order.
    pub fn invocations(&self) -> Vec<&Invocation> {
        match self {
            Plan::Install { probe, install } => vec![probe, &install.invocation],
            Plan::Sequence { steps, .. } => steps.iter().map(|s| &s.invocation).collect(),
        }
    }
}

/// Splits on commas, trims each token and drops empty ones.
pub fn parse_ports(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

struct Templates<'a> {
    config: &'a UfwCliConfig,
}

impl<'a> Templates<'a> {
    fn firewall(&self, args: &[&str]) -> Invocation {
        self.elevate(Invocation::new(
            self.config.firewall.program.as_str(),
            args.iter().copied(),
        ))
    }

    fn elevate(&self, inner: Invocation) -> Invocation {
        match self.config.elevator() {
            Some(elevator) => Invocation::elevated(elevator, inner),
            None => inner,
        }
    }

    fn step(&self, label: impl Into<String>, args: &[&str]) -> Step {
        Step {
            label: label.into(),
            invocation: self.firewall(args),
        }
    }
}

pub fn plan(verb: &Verb, config: &UfwCliConfig) -> Plan {
    let t = Templates { config };

    match verb {
        Verb::Install => Plan::Install {
            probe: Invocation::new(config.firewall.program.as_str(), ["--version"]),
            install: Step {
                label: "install UFW".to_string(),
                invocation: t.elevate(Invocation::new(
                    config.install.program.as_str(),
                    config.install.args.iter().map(String::as_str),
                )),
            },
        },

        Verb::Setup => {
            let mut steps = vec![t.step("enable UFW", &["--force", "enable"])];
            steps.extend(
                config
                    .firewall
                    .baseline_services
                    .iter()
                    .map(|svc| t.step(format!("allow {}", svc), &["allow", svc.as_str()])),
            );
            Plan::Sequence {
                intro: Some("Setting up basic UFW rules..."),
                steps,
                outro: Some("Basic UFW setup complete."),
            }
        }

        Verb::Configure(raw) => Plan::Sequence {
            intro: None,
            steps: parse_ports(raw)
                .iter()
                .map(|port| t.step(format!("allow port {}", port), &["allow", port.as_str()]))
                .collect(),
            outro: Some("Custom ports configured."),
        },

        Verb::Status(view) => {
            let step = match view {
                None => t.step("retrieve UFW status", &["status"]),
                Some(StatusView::Verbose) => t.step("retrieve UFW status", &["status", "verbose"]),
                Some(StatusView::Numbered) => {
                    t.step("retrieve UFW status", &["status", "numbered"])
                }
            };
            Plan::Sequence {
                intro: None,
                steps: vec![step],
                outro: None,
            }
        }

        Verb::Enable => Plan::Sequence {
            intro: None,
            steps: vec![t.step("enable UFW", &["--force", "enable"])],
            outro: Some("UFW enabled successfully."),
        },

        Verb::Disable => Plan::Sequence {
            intro: None,
            steps: vec![t.step("disable UFW", &["disable"])],
            outro: Some("UFW disabled successfully."),
        },

        Verb::Reset => Plan::Sequence {
            intro: Some("Resetting UFW to factory defaults..."),
            steps: vec![t.step("reset UFW", &["--force", "reset"])],
            outro: Some("UFW reset successfully."),
        },

        Verb::Default => Plan::Sequence {
            intro: Some("Applying default UFW policies..."),
            steps: vec![
                t.step("deny incoming by default", &["default", "deny", "incoming"]),
                t.step("allow outgoing by default", &["default", "allow", "outgoing"]),
            ],
            outro: Some("Default policies applied."),
        },
    }
}
