use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use chat_insight::config::AppConfig;
use chat_insight::engine::AnalysisEngine;
use chat_insight::export::write_messages_to_file;
use chat_insight::logging::{init_logging, StageTimer};
use chat_insight::metrics::{MetricsCollector, MetricsTimer};
use chat_insight::models::{ConversationReport, OutputFormat, Platform};
use chat_insight::parser::ChatParser;
use chat_insight::validation::InputValidator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a transcript export file
    Conversation {
        /// Path to the transcript file
        #[arg(short, long)]
        file: PathBuf,

        /// Format hint (whatsapp, telegram, discord, imessage, generic)
        #[arg(long)]
        format: Option<String>,

        /// Your display name, to mark the "self" participant
        #[arg(short, long)]
        self_name: Option<String>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score a single message
    Message {
        /// The message text
        text: String,
    },
    /// Score a batch of messages, one per line
    Bulk {
        /// Path to a file with one message per line
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Parse a transcript and export the canonical messages
    Export {
        /// Path to the transcript file
        #[arg(short, long)]
        file: PathBuf,

        /// Format hint (whatsapp, telegram, discord, imessage, generic)
        #[arg(long)]
        format: Option<String>,

        /// Output format (txt, csv, json)
        #[arg(long, default_value = "json")]
        output_format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let _log_guard = init_logging(&config.logging)?;

    info!("Starting chat-insight");

    let cli = Cli::parse();
    let mut metrics = MetricsCollector::default();

    match &cli.command {
        Commands::Conversation {
            file,
            format,
            self_name,
            output,
        } => {
            analyze_conversation_file(
                &config,
                &mut metrics,
                file,
                format.as_deref(),
                self_name.as_deref(),
                output.as_deref(),
            )
            .await?;
        }
        Commands::Message { text } => analyze_single_message(&config, text).await?,
        Commands::Bulk { file } => analyze_bulk_file(&config, &mut metrics, file).await?,
        Commands::Export {
            file,
            format,
            output_format,
            output,
        } => export_transcript(&mut metrics, file, format.as_deref(), output_format, output)?,
    }

    Ok(())
}

fn parse_format_hint(format: Option<&str>) -> Result<Option<Platform>> {
    format
        .map(|f| f.parse::<Platform>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()
}

async fn analyze_conversation_file(
    config: &AppConfig,
    metrics: &mut MetricsCollector,
    file: &std::path::Path,
    format: Option<&str>,
    self_name: Option<&str>,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let timer = StageTimer::new("conversation");
    let hint = parse_format_hint(format)?;

    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let raw = InputValidator::decode(&bytes)?;

    let engine = AnalysisEngine::new(config.clone());
    let elapsed = MetricsTimer::new();
    let (analysis, diagnostics) = engine
        .analyze_conversation(raw, hint, self_name, None, None)
        .await?;
    metrics.record_conversation(
        analysis.total_messages as usize,
        analysis.red_flags.total_red_flags as usize,
        elapsed.elapsed(),
    );

    let total_messages_analyzed = analysis.total_messages;
    let report = ConversationReport {
        analysis,
        total_messages_analyzed,
        diagnostics,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }

    timer.finish(total_messages_analyzed as usize);
    Ok(())
}

async fn analyze_single_message(config: &AppConfig, text: &str) -> Result<()> {
    let engine = AnalysisEngine::new(config.clone());
    let result = engine.analyze_message(text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn analyze_bulk_file(
    config: &AppConfig,
    metrics: &mut MetricsCollector,
    file: &std::path::Path,
) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let raw = InputValidator::decode(&bytes)?;
    let texts: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect();

    let engine = AnalysisEngine::new(config.clone());
    let elapsed = MetricsTimer::new();
    let bulk = engine.analyze_messages(&texts).await?;
    metrics.record_scoring(bulk.results.len(), elapsed.elapsed());

    println!("{}", serde_json::to_string_pretty(&bulk)?);
    Ok(())
}

fn export_transcript(
    metrics: &mut MetricsCollector,
    file: &std::path::Path,
    format: Option<&str>,
    output_format: &str,
    output: &std::path::Path,
) -> Result<()> {
    let hint = parse_format_hint(format)?;
    let output_format: OutputFormat = output_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let raw = InputValidator::decode(&bytes)?;

    let parser = ChatParser::new();
    let timer = StageTimer::new("parse");
    let elapsed = MetricsTimer::new();
    let outcome = parser.parse(raw, hint);
    metrics.record_parse(
        outcome.messages.len(),
        &outcome.format.to_string(),
        elapsed.elapsed(),
    );
    timer.finish(outcome.messages.len());

    write_messages_to_file(&outcome.messages, output_format, output)?;
    info!(
        path = %output.display(),
        count = outcome.messages.len(),
        format = %outcome.format,
        "messages exported"
    );
    Ok(())
}
