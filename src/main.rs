mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::describe;
use crate::config::{AppConfig, config_file_path};
use crate::context::AppContext;
use crate::domain::workspace::WorkspaceFolders;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::openai::OpenAiClient;
use crate::infra::terminal::TerminalPresenter;

#[derive(Parser)]
#[command(
    name = "arpdodo",
    author,
    version,
    about = "Summarize staged Git changes with OpenAI"
)]
struct Cli {
    /// Use this config file instead of the per-user default.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain the staged changes of the workspace.
    Describe(DescribeArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct DescribeArgs {
    /// Workspace folder; may be repeated, the first one is used. Defaults to the current directory.
    #[arg(short, long = "workspace", value_name = "PATH")]
    workspaces: Vec<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` when the invocation ended with an error notice.
async fn run() -> AppResult<bool> {
    let cli = Cli::parse();
    let config_path = config_file_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command, &config_path)?;
            Ok(true)
        }
        Commands::Describe(args) => run_describe(args, &config_path).await,
    }
}

async fn run_describe(args: DescribeArgs, config_path: &Path) -> AppResult<bool> {
    let config = AppConfig::load(config_path)?;
    let folders = WorkspaceFolders::from_args(args.workspaces, std::env::current_dir().ok());

    let context = AppContext::new(
        config,
        Arc::new(GitCli::new()),
        Arc::new(OpenAiClient::new()),
        Arc::new(TerminalPresenter::new()),
    );

    let status = describe::run(&context, &folders).await?;
    Ok(!status.is_failure())
}
