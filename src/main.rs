use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

mod config;
mod dispatcher;
mod error;
mod installer;
mod invocation;
mod plan;
mod prompt;
mod report;
mod runner;

use config::UfwCliConfig;
use dispatcher::{Dispatcher, ExecutionMode};
use plan::{StatusView, Verb};
use runner::SystemRunner;

#[derive(Parser)]
#[command(name = "ufw-cli")]
#[command(
    version,
    about = "A CLI tool to manage UFW (Uncomplicated Firewall)",
    long_about = "ufw-cli helps users install, configure, and manage UFW for their servers."
)]
struct Cli {
    /// Print the commands that would run instead of running them
    #[arg(long, global = true, visible_alias = "simulate")]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read settings from this TOML file instead of the per-user config
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check and install UFW if not present
    Install,
    /// Set up basic UFW rules (SSH, HTTP, HTTPS)
    Setup,
    /// Add custom port rules
    Configure {
        /// Comma-separated ports; prompts on stdin when omitted
        #[arg(long)]
        ports: Option<String>,
    },
    /// Show UFW status
    Status {
        #[arg(value_enum)]
        view: Option<StatusView>,
    },
    /// Enable the UFW firewall
    Enable,
    /// Disable the UFW firewall
    Disable,
    /// Reset UFW to factory defaults
    Reset,
    /// Deny incoming and allow outgoing traffic by default
    Default,
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        println!("Welcome to ufw-cli! Use --help to see available commands.");
        return Ok(());
    };

    let config = UfwCliConfig::load(cli.config.as_deref())?;
    let mode = ExecutionMode::from_dry_run(cli.dry_run);
    debug!("Execution mode: {:?}", mode);

    let verb = match command {
        Commands::Install => Verb::Install,
        Commands::Setup => Verb::Setup,
        Commands::Configure { ports } => match ports {
            Some(ports) => Verb::Configure(ports),
            None => {
                let stdin = std::io::stdin();
                match prompt::read_port_list(&mut stdin.lock(), &mut std::io::stdout()) {
                    Ok(line) => Verb::Configure(line),
                    Err(e) => {
                        eprintln!("{} {}", "[✗]".bright_red(), e);
                        return Ok(());
                    }
                }
            }
        },
        Commands::Status { view } => Verb::Status(view),
        Commands::Enable => Verb::Enable,
        Commands::Disable => Verb::Disable,
        Commands::Reset => Verb::Reset,
        Commands::Default => Verb::Default,
        Commands::Config => {
            println!("{}", "Current Configuration:".bright_blue().bold());
            println!("{}", "━".repeat(50).bright_blue());
            print!("{}", config.to_toml()?);
            return Ok(());
        }
    };

    let plan = plan::plan(&verb, &config);
    debug!(
        "Planned: {}",
        plan.invocations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    );
    let mut dispatcher = Dispatcher::new(SystemRunner, mode, std::io::stdout());
    let report = dispatcher.dispatch(&plan)?;
    debug!(
        "Recorded [{}], {} failed",
        report.invocations().join("; "),
        report.failures()
    );

    // Invocation failures are already reported and never change the exit code.
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}
