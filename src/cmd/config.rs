use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::StoredConfig;
use crate::domain::credential::PLACEHOLDER_API_KEY;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Prompt for the OpenAI API key and store it.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand, path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(path),
        ConfigCommand::Show => run_show(path),
    }
}

fn run_init(path: &Path) -> AppResult<()> {
    let mut cfg = StoredConfig::load_from(path)?;

    println!("Configuring arpdodo.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("The key is stored in the local config file; protect your filesystem accordingly.");
    println!();

    let stdin = io::stdin();
    let action = prompt(
        "OpenAI API key",
        cfg.api_key.as_deref(),
        &mut stdin.lock(),
        &mut io::stdout(),
    )?;
    action.apply(&mut cfg.api_key);

    cfg.save_to(path)?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> AppResult<()> {
    let cfg = StoredConfig::load_from(path)?;

    println!("Configuration file: {}", path.display());
    println!("OpenAI API key: {}", mask_secret(cfg.api_key.as_deref()));
    Ok(())
}

fn prompt<R: BufRead, W: Write>(
    field: &str,
    current: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> AppResult<PromptAction> {
    match current {
        Some(_) => write!(output, "{field} [****] (Enter to keep, '-' to clear): ")?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(token) if token.starts_with(PLACEHOLDER_API_KEY) => "<placeholder>".to_string(),
        Some(token) if token.chars().count() > 6 => {
            let chars = token.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn apply(self, target: &mut Option<String>) {
        match self {
            PromptAction::Keep => {}
            PromptAction::Clear => *target = None,
            PromptAction::Set(value) => *target = Some(value),
        }
    }
}
