//! CLI entrypoint for OpenFlux
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use openflux_application::{
    AbortReason, HostServices, NoProgress, OperationOutcome, ProgressPort, SessionBootstrap,
    TranscriptLog,
};
use openflux_domain::{HostCommand, PanelKind};
use openflux_infrastructure::{ConfigLoader, FileConfig, FileTranscriptLog, HttpBackendConnector};
use openflux_presentation::{
    Cli, ConsoleDocumentViewer, ConsoleNotifier, ConsoleStatusLine, ConsoleTranscript,
    DirectoryWorkspace, ProgressReporter, SimpleProgress, StdinPrompt, TerminalPanelHost,
    TranscriptFanout, set_color_enabled,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting OpenFlux");

    if cli.show_config {
        print!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    if let Some(url) = &cli.backend_url {
        file_config.backend.url = url.clone();
    }

    if cli.print_config {
        print!("{}", file_config.to_toml().context("Failed to render configuration")?);
        return Ok(ExitCode::SUCCESS);
    }

    set_color_enabled(file_config.output.color && !cli.no_color);
    let session_config = file_config
        .to_session_config()
        .context("Invalid configuration")?;

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `openflux --help` for the list of commands.");
    };

    // === Dependency Injection ===
    let progress: Arc<dyn ProgressPort> = if cli.quiet {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        // Spinners garble redirected output.
        Arc::new(SimpleProgress)
    };
    let host = HostServices {
        workspace: Arc::new(DirectoryWorkspace::new(cli.workspace.clone())),
        prompt: Arc::new(StdinPrompt::with_preset(
            command.preset_input().map(str::to_string),
        )),
        notifier: Arc::new(ConsoleNotifier),
        documents: Arc::new(ConsoleDocumentViewer),
        transcript: transcript_log(&file_config),
        progress,
    };

    let session = SessionBootstrap::new(
        session_config,
        Arc::new(HttpBackendConnector),
        host,
        Arc::new(ConsoleStatusLine::new()),
        Arc::new(TerminalPanelHost),
    )
    .context("Failed to set up session")?;

    session.start().await;

    let host_command = command.host_command();
    let outcome = session.dispatch(host_command).await;
    if host_command == HostCommand::OpenComposer && outcome.is_completed() {
        session.panels().join(PanelKind::Composer).await;
    }
    session.shutdown().await;

    Ok(exit_code(&outcome))
}

/// Console transcript, plus the configured transcript file if it can be opened.
fn transcript_log(config: &FileConfig) -> Arc<dyn TranscriptLog> {
    let console: Arc<dyn TranscriptLog> = Arc::new(ConsoleTranscript::new());
    let Some(path) = &config.output.transcript_file else {
        return console;
    };
    match FileTranscriptLog::open(path) {
        Some(file) => Arc::new(TranscriptFanout::new(vec![console, Arc::new(file)])),
        None => {
            warn!("Continuing without transcript file {}", path.display());
            console
        }
    }
}

/// Initialize logging based on verbosity level, or `RUST_LOG` when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn exit_code(outcome: &OperationOutcome) -> ExitCode {
    match outcome {
        OperationOutcome::Completed | OperationOutcome::Aborted(AbortReason::Cancelled) => {
            ExitCode::SUCCESS
        }
        OperationOutcome::Failed(_) | OperationOutcome::Aborted(_) => ExitCode::FAILURE,
    }
}
