use std::process::ExitCode;
use std::sync::Arc;

use agentic_core::{
    AgenticConfig, AgenticError, HttpSimulationClient, Message, RunSummary, SimulationView,
    ViewState, EMPTY_TRANSCRIPT,
};
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(short, long, help = "Initial prompt handed to the agents")]
    pub prompt: Option<String>,

    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        help = "Maximum number of rounds (values below 1 are raised to 1)"
    )]
    pub rounds: Option<String>,

    #[arg(long, help = "Base URL of the simulation service")]
    pub url: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn handle_run_command(args: RunArgs, config: AgenticConfig) -> Result<ExitCode> {
    let mut config = config;
    if let Some(url) = args.url {
        config.service.base_url = url;
    }
    config.validate()?;

    let client = HttpSimulationClient::new(&config.service)?;
    let view = SimulationView::with_state(
        Arc::new(client),
        ViewState::from_config(&config.simulation),
    );

    if let Some(prompt) = args.prompt {
        view.edit_prompt(prompt).await;
    }
    if let Some(ref raw) = args.rounds {
        view.edit_rounds(raw).await.map_err(explain)?;
    }

    if args.format == OutputFormat::Text {
        let state = view.snapshot().await;
        println!(
            "{} {} ({} round{}) {}",
            "→".blue(),
            "Running simulation".cyan().bold(),
            state.rounds(),
            if state.rounds() == 1 { "" } else { "s" },
            view.endpoint().dimmed()
        );
        println!();
    }

    let summary = view.run().await?;
    let state = view.snapshot().await;
    debug!(run_id = %summary.id, "Rendering {} messages", state.conversation().len());

    match args.format {
        OutputFormat::Json => {
            let output = transcript_json(state.conversation(), &summary);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_transcript(state.conversation(), &summary),
    }

    Ok(if summary.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn explain(err: AgenticError) -> anyhow::Error {
    match err.user_suggestion() {
        Some(hint) => anyhow!("{}\n  {} {}", err, "hint:".yellow(), hint),
        None => anyhow!(err),
    }
}

fn print_transcript(conversation: &[Message], summary: &RunSummary) {
    if conversation.is_empty() {
        println!("  {}", EMPTY_TRANSCRIPT.dimmed());
    } else {
        for message in conversation {
            println!("{}", format_message(message));
        }

        let table = sender_table(conversation);
        println!("{table}");
    }

    println!();
    let status = summary.status_line();
    if summary.is_failure() {
        println!("{} {}", "✗".red().bold(), status.red());
    } else {
        println!("{} {}", "✓".green().bold(), status.green());
    }
    println!("  {} {}", "Run:".dimmed(), summary.id.to_string().dimmed());
}

/// Header line followed by the indented body.
pub fn format_message(message: &Message) -> String {
    let header = if message.is_system() {
        format!("{} → {}", message.from, message.to).red().bold()
    } else {
        format!(
            "{} → {}",
            message.from.cyan().bold(),
            message.to.display().magenta()
        )
        .normal()
    };

    let body: Vec<String> = message
        .body()
        .lines()
        .map(|line| format!("  {}", line))
        .collect();

    format!("{}\n{}\n", header, body.join("\n"))
}

/// Message count per sender, in order of first appearance.
pub fn sender_counts(conversation: &[Message]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for message in conversation {
        match counts.iter_mut().find(|(name, _)| *name == message.from) {
            Some((_, count)) => *count += 1,
            None => counts.push((message.from.clone(), 1)),
        }
    }
    counts
}

fn sender_table(conversation: &[Message]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Sender").fg(comfy_table::Color::Cyan),
            Cell::new("Messages").fg(comfy_table::Color::Cyan),
        ]);

    for (sender, count) in sender_counts(conversation) {
        table.add_row(vec![Cell::new(sender), Cell::new(count)]);
    }

    table
}

/// The transcript in the service's own shape, plus the run record.
pub fn transcript_json(conversation: &[Message], summary: &RunSummary) -> Value {
    json!({
        "conversation": conversation,
        "done": summary.done,
        "run": {
            "id": summary.id.to_string(),
            "outcome": summary.outcome,
            "rounds": summary.rounds,
            "messages": summary.message_count,
            "duration_ms": summary.duration_millis(),
        }
    })
}
