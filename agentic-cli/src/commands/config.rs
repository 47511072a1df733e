use std::path::PathBuf;

use agentic_core::{default_config_file, get_data_dir, AgenticConfig};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration as TOML")]
    Show,

    #[command(about = "Write a configuration file with the default values")]
    Init {
        #[arg(short, long, help = "Overwrite an existing file")]
        force: bool,

        #[arg(long, help = "Write here instead of the default location")]
        path: Option<PathBuf>,
    },

    #[command(about = "Show where configuration and logs live")]
    Path,
}

pub fn handle_config_command(
    action: Option<ConfigCommand>,
    config: Result<AgenticConfig>,
) -> Result<()> {
    match action {
        Some(ConfigCommand::Show) | None => cmd_config_show(config?),
        Some(ConfigCommand::Init { force, path }) => cmd_config_init(force, path),
        Some(ConfigCommand::Path) => cmd_config_path(),
    }
}

fn cmd_config_show(config: AgenticConfig) -> Result<()> {
    println!("{}", "Effective Configuration".cyan().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn cmd_config_init(force: bool, path: Option<PathBuf>) -> Result<()> {
    let path = match path.or_else(default_config_file) {
        Some(path) => path,
        None => return Err(anyhow!("Could not determine the configuration directory")),
    };

    AgenticConfig::default().write_to(&path, force)?;

    println!(
        "{} Wrote default configuration to {}",
        "✓".green().bold(),
        path.display().to_string().green()
    );
    Ok(())
}

fn cmd_config_path() -> Result<()> {
    let describe = |path: Option<PathBuf>| match path {
        Some(p) if p.exists() => format!("{} {}", p.display(), "(exists)".green()),
        Some(p) => format!("{} {}", p.display(), "(not found)".dimmed()),
        None => "unavailable".yellow().to_string(),
    };

    println!("  {:<15} {}", "Config file:".bold(), describe(default_config_file()));
    println!("  {:<15} {}", "Data dir:".bold(), describe(get_data_dir()));
    Ok(())
}
