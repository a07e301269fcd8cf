//! CLI entrypoint for Sentinel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use sentinel_application::{
    AssistantParticipant, EventStream, Orchestrator, Participant, RunParams, forward_to_logger,
};
use sentinel_domain::{Persona, PromptTemplate};
use sentinel_infrastructure::{
    ConfigLoader, EngineFactory, EngineSetupError, FileConfig, FileLoggingConfig,
    JsonlConversationLogger, generate_mock_telemetry,
};
use sentinel_presentation::{Cli, ConsoleFormatter, EventPrinter, OutputFormat};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = load_config(&cli)?;
        println!("\n{}", config.to_redacted_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = load_config(&cli)?;
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(&cli, &config.logging);
    info!("Starting Sentinel");

    // === Dependency Injection ===
    let engine = match EngineFactory::create(&config.engine) {
        Ok(engine) => Arc::new(engine),
        Err(e @ (EngineSetupError::MissingCredentials | EngineSetupError::MissingAzureEndpoint)) => {
            print_setup_error(&e);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let stop_tokens = config.run.stop_tokens.clone();
    let reporter_token = stop_tokens.first().map(String::as_str);
    let participants: Vec<Arc<dyn Participant>> = Persona::team()
        .iter()
        .map(|persona| {
            Arc::new(AssistantParticipant::new(
                persona.profile(reporter_token),
                Arc::clone(&engine),
            )) as Arc<dyn Participant>
        })
        .collect();

    let params = RunParams::default()
        .with_turn_timeout_seconds(config.run.turn_timeout_seconds)
        .with_event_queue_capacity(config.run.event_buffer)
        .with_observer_buffer(config.run.event_buffer);
    let events = EventStream::new(params.event_queue_capacity, params.observer_buffer);
    let orchestrator = Orchestrator::from_limits(
        participants,
        Some(config.run.max_messages),
        &stop_tokens,
        params,
    )?
    .with_events(events.publisher());

    let telemetry = generate_mock_telemetry(config.telemetry.errors);
    let seed = PromptTemplate::incident_task(&telemetry);

    if cli.output != OutputFormat::Json {
        println!("{}", ConsoleFormatter::banner());
        println!("{}", ConsoleFormatter::telemetry(&telemetry));
    }

    // Observers
    let printer = (cli.output != OutputFormat::Json).then(|| {
        let printer = EventPrinter::new(cli.output == OutputFormat::Live, !cli.quiet);
        tokio::spawn(printer.run(events.subscribe()))
    });
    let event_logger = cli
        .event_log
        .clone()
        .or_else(|| config.logging.event_log.clone())
        .and_then(|path| {
            let logger = JsonlConversationLogger::new(&path)?;
            info!("Writing run events to {}", logger.path().display());
            Some(forward_to_logger(events.subscribe(), Arc::new(logger)))
        });

    let interrupt = spawn_interrupt_handler(orchestrator.cancellation_token());

    let summary = orchestrator.run(seed).await;

    interrupt.abort();
    events.close().await;
    for observer in [printer, event_logger].into_iter().flatten() {
        if let Err(e) = observer.await {
            warn!("Observer task failed: {}", e);
        }
    }

    let output = match cli.output {
        OutputFormat::Live => ConsoleFormatter::summary(&summary),
        OutputFormat::Transcript => format!(
            "{}{}",
            ConsoleFormatter::transcript(&summary.transcript),
            ConsoleFormatter::summary(&summary)
        ),
        OutputFormat::Json => ConsoleFormatter::format_json(&summary),
    };
    println!("{}", output);

    if summary.is_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    config.context("Failed to load configuration")
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(errors) = cli.errors {
        config.telemetry.errors = errors;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.run.max_messages = max_rounds;
    }
    if !cli.stop_token.is_empty() {
        config.run.stop_tokens = cli.stop_token.clone();
    }
    if let Some(timeout) = cli.turn_timeout {
        config.run.turn_timeout_seconds = timeout;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = Some(level.clone());
    }
}

/// Console filter: --log-level > -v count > config > RUST_LOG > warn.
fn console_filter(cli: &Cli, logging: &FileLoggingConfig) -> EnvFilter {
    let directive = match cli.verbose {
        0 => logging.level.clone(),
        1 => Some("info".to_string()),
        2 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    let directive = cli.log_level.clone().or(directive);
    match directive {
        Some(directive) => EnvFilter::new(format!(
            "{},hyper=warn,h2=warn,reqwest=warn,rustls=warn",
            directive
        )),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Stderr plus an optional daily-rolling file. The guard must live until exit.
fn init_logging(cli: &Cli, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter(cli, logging));

    if !logging.file {
        tracing_subscriber::registry().with(console_layer).init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.directory) {
        tracing_subscriber::registry().with(console_layer).init();
        warn!(
            "Could not create log directory {}: {}",
            logging.directory.display(),
            e
        );
        return None;
    }

    let appender = tracing_appender::rolling::daily(&logging.directory, &logging.file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    let file_level = logging.level.clone().unwrap_or_else(|| "info".to_string());
    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new(format!(
            "{},hyper=warn,h2=warn,reqwest=warn,rustls=warn",
            file_level
        )));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    Some(guard)
}

/// Cancel the run on Ctrl-C.
fn spawn_interrupt_handler(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            cancel.cancel();
        }
    })
}

fn print_setup_error(error: &EngineSetupError) {
    eprintln!("Error: {}", error);
    eprintln!();
    eprintln!("Hint: export OPENAI_API_KEY=sk-...  (or the AZURE_OPENAI_* variables)");
    eprintln!("      then run `sentinel --show-config` to check what was picked up.");
}
