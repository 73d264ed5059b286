//! CLI entrypoint for nion
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use nion_application::{
    BackendReasoning, ExecutionParams, NoRunProgress, ReasoningStrategy, RuleBasedReasoning,
    RunOrchestrationUseCase, RunProgressNotifier,
};
use nion_domain::{InputMessage, Sender, SourceChannel};
use nion_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, GeminiConfig, GeminiReasoningBackend,
    StaticProjectStore,
};
use nion_presentation::{
    Cli, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting nion");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    let color = config.output.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let strategy = build_strategy(&cli, &config)?;
    let projects = Arc::new(StaticProjectStore::sample().with_projects(
        config
            .projects
            .iter()
            .map(|(id, project)| (id.clone(), project.to_facts())),
    ));

    let mut params: ExecutionParams = config.execution.to_params();
    if cli.gate_delivery {
        params = params.with_gate_delivery_on_rejection(true);
    }

    let use_case = RunOrchestrationUseCase::new(strategy, projects).with_params(params);

    let message = read_message(&cli)?;
    info!("Processing message {}", message.id());

    let progress: Box<dyn RunProgressNotifier> = if cli.quiet {
        Box::new(NoRunProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let run = use_case
        .execute_with_progress(message, progress.as_ref())
        .await
        .context("Orchestration run failed")?;

    let format = cli.output.unwrap_or(match config.output.format {
        FileOutputFormat::Map => OutputFormat::Map,
        FileOutputFormat::Json => OutputFormat::Json,
    });

    let formatter = ConsoleFormatter::new(color);
    match format {
        OutputFormat::Map => println!("{}", formatter.format(&run)),
        OutputFormat::Json => println!("{}", formatter.format_json(&run)),
    }

    Ok(())
}

/// Choose the reasoning strategy once, for the whole run.
fn build_strategy(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn ReasoningStrategy>> {
    let mut params = config.reasoning.to_params();
    if let Some(mode) = cli.reasoning {
        params.mode = mode;
    }

    let gemini = GeminiConfig::from_env(config.reasoning.api_key_env.as_str())
        .with_model(config.reasoning.model.as_str())
        .with_endpoint(config.reasoning.endpoint.as_str())
        .with_request_timeout(params.timeout);

    if !params.mode.uses_backend(gemini.has_credential()) {
        info!("Using rule-based reasoning (mode: {})", params.mode.as_str());
        return Ok(Arc::new(RuleBasedReasoning::new()));
    }

    if !gemini.has_credential() {
        warn!(
            "Reasoning backend forced but {} is not set; calls will fall back to rules",
            config.reasoning.api_key_env
        );
    }

    let backend = GeminiReasoningBackend::new(gemini).context("Failed to create reasoning backend")?;
    info!("Using backend reasoning ({})", config.reasoning.model);
    Ok(Arc::new(
        BackendReasoning::new(Arc::new(backend)).with_timeout(params.timeout),
    ))
}

/// Read the message from a JSON file, stdin (`-`) or the inline flags.
fn read_message(cli: &Cli) -> Result<InputMessage> {
    if let Some(content) = &cli.content {
        let source: SourceChannel = match cli.source.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        };
        let mut message = InputMessage::new(
            cli.id.as_str(),
            source,
            Sender::new(cli.sender.as_str(), cli.role.as_str()),
            content.as_str(),
        );
        if let Some(project) = &cli.project {
            message = message.with_project(project.as_str());
        }
        return Ok(message);
    }

    let json = match &cli.message {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file {}", path.display()))?,
        None => bail!("A message is required: pass a JSON file, '-' for stdin, or --content"),
    };

    InputMessage::from_json(&json).context("Failed to parse message JSON")
}
