use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};

use agentic_core::{
    ensure_data_dir, AgenticConfig, HttpSimulationClient, LoggingConfig, SimulationView,
    ViewState,
};
use agentic_tui::app::App;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "agentic-tui.log";

#[derive(Parser)]
#[command(name = "agentic-tui")]
#[command(author, version, about = "Interactive front end for the agentic startup simulation")]
struct Args {
    /// Base URL of the simulation backend
    #[arg(long, env = "AGENTIC_URL")]
    url: Option<String>,

    /// Color theme (Tokyo Night, Catppuccin Mocha, Nord)
    #[arg(long)]
    theme: Option<String>,

    /// Initial prompt
    #[arg(long)]
    prompt: Option<String>,

    /// Initial number of rounds
    #[arg(long)]
    rounds: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AgenticConfig::load().context("Failed to load configuration")?;
    apply_args(&mut config, args);
    config.validate()?;

    setup_logging(&config.logging)?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, config);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

fn apply_args(config: &mut AgenticConfig, args: Args) {
    if let Some(url) = args.url {
        config.service.base_url = url;
    }
    if let Some(theme) = args.theme {
        config.tui.theme = theme;
    }
    if let Some(prompt) = args.prompt {
        config.simulation.prompt = prompt;
    }
    if let Some(rounds) = args.rounds {
        config.simulation.rounds = rounds;
    }
}

/// The terminal belongs to the UI, so logs go to a file in the data directory.
fn setup_logging(logging: &LoggingConfig) -> Result<()> {
    let log_path = ensure_data_dir()?.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = Mutex::new(file);

    if logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init();
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AgenticConfig,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let client = HttpSimulationClient::new(&config.service)?;
        info!("Simulation backend: {}", client.base_url());

        let view = Arc::new(SimulationView::with_state(
            Arc::new(client),
            ViewState::from_config(&config.simulation),
        ));

        let mut app = App::new(view, &config.tui).await;
        app.run(terminal).await
    })
}
