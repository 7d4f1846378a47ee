//! CLI entry point for taskdeck.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskdeck_app::AppConfig;
use taskdeck_core::{Priority, StatusFilter, TaskId};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod shell;

/// Single-user todo list backed by the taskdeck REST API.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "taskdeck: todo tasks over a REST backend")]
struct Cli {
    /// Path to the config file (defaults to the user config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL for this invocation.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, optionally filtered and searched.
    Ls {
        /// Status filter: all, active, or completed.
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
        /// Case-insensitive substring match on the task text.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Create a new task.
    Add {
        /// Task text.
        text: String,
        #[arg(short = 'p', long)]
        priority: Option<Priority>,
        #[arg(short = 'c', long)]
        category: Option<String>,
    },

    /// Flip a task's completion flag.
    Toggle {
        /// Task id (see `ls`).
        id: TaskId,
    },

    /// Edit fields of an existing task.
    Edit {
        /// Task id (see `ls`).
        id: TaskId,
        #[arg(long)]
        text: Option<String>,
        #[arg(short = 'p', long)]
        priority: Option<Priority>,
        #[arg(short = 'c', long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category entirely.
        #[arg(long)]
        clear_category: bool,
    },

    /// Delete a task.
    Rm {
        /// Task id (see `ls`).
        id: TaskId,
    },

    /// Move a task between list positions (1-based, as shown by `ls`).
    Mv {
        /// Current position.
        source: usize,
        /// New position.
        destination: usize,
    },

    /// Show aggregate counts.
    Stats,

    /// Probe the backend health endpoint.
    Health,

    /// Interactive shell with live filter and debounced search.
    Shell,
}

fn main() -> Result<()> {
    let Cli { config, api_url, cmd } = Cli::parse();

    install_tracing();

    let mut app_config = AppConfig::load(config.as_deref())?;
    if let Some(url) = api_url {
        app_config.api.base_url = url;
    }

    tokio::runtime::Runtime::new()?.block_on(commands::run(cmd, &app_config))
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
