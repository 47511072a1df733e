use std::process::ExitCode;

use agentic_core::AgenticConfig;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::{handle_config_command, handle_run_command, ConfigCommand, RunArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(name = "agentic")]
#[command(version = VERSION)]
#[command(about = "Drive the agentic startup simulation from the command line")]
#[command(long_about = r#"
Sends an initial prompt and a round limit to the simulation service and prints
the conversation the agents had.

Use 'agentic run' to start a simulation, 'agentic config init' to write a
configuration file, and 'agentic config show' to see the effective settings.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run one simulation and print the conversation")]
    Run(RunArgs),

    #[command(about = "Show, create or locate the configuration file")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },

    #[command(about = "Show version information")]
    Version {
        #[arg(short, long)]
        detailed: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AgenticConfig::load();
    let json_logs = config
        .as_ref()
        .map(|c| c.logging.json_format)
        .unwrap_or(false);
    init_logging(cli.verbose, json_logs);

    match run(cli, config.map_err(anyhow::Error::from)).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: anyhow::Result<AgenticConfig>) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Run(args) => handle_run_command(args, config?).await,
        Commands::Config { action } => {
            handle_config_command(action, config).map(|_| ExitCode::SUCCESS)
        }
        Commands::Version { detailed } => cmd_version(detailed).map(|_| ExitCode::SUCCESS),
    }
}

fn cmd_version(detailed: bool) -> anyhow::Result<()> {
    if detailed {
        println!("{}", "Agentic Version Information".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!("  {:<15} {}", "Version:".bold(), VERSION);
        println!("  {:<15} {}", "Name:".bold(), NAME);
        println!("  {:<15} Apache-2.0", "License:".bold());
        println!(
            "  {:<15} POST {}",
            "Endpoint:".bold(),
            agentic_core::SIMULATE_PATH
        );
        println!();
        println!("  {}", "Build Information:".bold());
        println!("    Rust Edition: 2021");
        #[cfg(debug_assertions)]
        println!("    Build:        Debug");
        #[cfg(not(debug_assertions))]
        println!("    Build:        Release");
    } else {
        println!("agentic {}", VERSION);
    }

    Ok(())
}
