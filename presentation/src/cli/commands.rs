//! CLI command definitions

use clap::{Parser, Subcommand};
use openflux_domain::HostCommand;
use std::path::PathBuf;

/// Operation to run against the backend
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Index the workspace
    Index,
    /// Semantic search over the indexed workspace
    Search {
        /// Search query (prompted for when omitted)
        query: Option<String>,
    },
    /// Hand a goal to the backend agent
    Agent {
        /// What the agent should do (prompted for when omitted)
        goal: Option<String>,
    },
    /// Interactive composer: one goal per line, `/quit` to leave
    Composer,
    /// Print the backend's status document
    Status,
    /// How to start the backend
    Instructions,
}

impl Command {
    /// The session command this subcommand runs.
    pub fn host_command(&self) -> HostCommand {
        match self {
            Command::Index => HostCommand::IndexCodebase,
            Command::Search { .. } => HostCommand::SearchCodebase,
            Command::Agent { .. } => HostCommand::StartAgent,
            Command::Composer => HostCommand::OpenComposer,
            Command::Status => HostCommand::ShowBackendStatus,
            Command::Instructions => HostCommand::ShowBackendInstructions,
        }
    }

    /// Text given on the command line that answers the operation's prompt.
    pub fn preset_input(&self) -> Option<&str> {
        match self {
            Command::Search { query } => query.as_deref(),
            Command::Agent { goal } => goal.as_deref(),
            _ => None,
        }
    }
}

/// CLI arguments for openflux
#[derive(Parser, Debug)]
#[command(name = "openflux")]
#[command(author, version, about = "OpenFlux - index, search and run agents against your codebase")]
#[command(long_about = r#"
OpenFlux drives a local agent backend: it indexes the workspace, searches it,
and hands goals to the backend agent.

The backend must be running (./scripts/start_server.sh).

Configuration files are loaded from (in priority order):
1. OPENFLUX_* environment variables (e.g. OPENFLUX_BACKEND__URL)
2. --config <path>       Explicit config file
3. ./openflux.toml       Project-level config
4. ~/.config/openflux/config.toml   Global config

Example:
  openflux index
  openflux search "where are sessions created"
  openflux agent "Add error handling to API routes"
  openflux --backend-url http://10.0.0.5:8000 composer
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Workspace folder (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
