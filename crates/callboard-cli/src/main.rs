//! Callboard CLI - Offline export replay and seeding
//!
//! Posts call records to the Callboard API: replays the two offline
//! JSON export shapes, seeds mock data, and manages the stored API key.

mod api;
mod config;
mod replay;
mod seed;

use std::fs;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Password};

use api::{CallboardClient, ClientConfig};
use config::Config;
use replay::{AggregateEntry, CallEntry};

#[derive(Parser)]
#[command(name = "callboard")]
#[command(about = "Callboard CLI - replay call exports and seed mock data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Replay an offline JSON export against the API
    Replay {
        #[command(subcommand)]
        action: ReplayAction,
    },

    /// Seed the database with mock call records
    Seed {
        /// Number of records to generate
        #[arg(short, long, default_value = "100")]
        count: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ReplayAction {
    /// Aggregate export: one entry per phone with a result_breakdown
    /// map and minutes_excluding_voicemail
    Aggregate {
        /// Path to the JSON export
        file: String,
        /// Skip the first N entries (already posted)
        #[arg(long, default_value = "0")]
        skip: usize,
    },

    /// Per-call export: one entry per call with phone, partner, status,
    /// duration and timestamp
    Calls {
        /// Path to the JSON export
        file: String,
        /// Skip the first N entries (already posted)
        #[arg(long, default_value = "0")]
        skip: usize,
        /// Force a country for every record instead of deriving it
        /// from the phone prefix
        #[arg(long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Replay { action } => cmd_replay(action).await,
        Commands::Seed { count, yes } => cmd_seed(count, yes).await,
        Commands::Config => cmd_config(),
    }
}

fn build_client(config: &Config) -> Result<CallboardClient> {
    CallboardClient::new(ClientConfig::new(
        &config.base_url,
        config.api_key.clone(),
    ))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);

    let client = build_client(&config)?;
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
        }
        _ => {
            println!("{}", "Failed".red());
            bail!(
                "Could not connect to Callboard API at {}. Check the server and base_url.",
                config.base_url
            );
        }
    }

    config.save()?;
    println!(
        "{} API key saved to {:?}",
        "✓".green(),
        Config::config_path()?
    );

    Ok(())
}

async fn cmd_replay(action: ReplayAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config)?;
    let send_delay = Duration::from_millis(config.send_delay_ms);

    let (batch, skip) = match action {
        ReplayAction::Aggregate { file, skip } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file))?;
            let entries: Vec<AggregateEntry> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {} as an aggregate export", file))?;

            println!("Loaded {} entries from {}", entries.len(), file);
            println!("Posting to {}\n", config.base_url);

            let batch: Vec<_> = entries
                .iter()
                .map(|entry| (replay::aggregate_label(entry), replay::build_aggregate_payload(entry)))
                .collect();
            (batch, skip)
        }

        ReplayAction::Calls { file, skip, country } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file))?;
            let entries: Vec<CallEntry> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {} as a per-call export", file))?;

            let country_override = match country.as_deref() {
                Some(value) => match value.parse() {
                    Ok(country) => Some(country),
                    Err(_) => bail!("--country must be ES or PT, got '{}'", value),
                },
                None => None,
            };

            println!("Loaded {} calls from {}", entries.len(), file);
            println!("Posting to {}\n", config.base_url);

            let batch: Vec<_> = replay::build_call_payloads(entries, country_override)
                .into_iter()
                .map(|payload| (payload.summary.clone(), payload))
                .collect();
            (batch, skip)
        }
    };

    let stats = replay::run(&client, batch, send_delay, skip).await;

    if stats.failed > 0 {
        bail!("{} entries failed after retry", stats.failed);
    }
    Ok(())
}

async fn cmd_seed(count: usize, yes: bool) -> Result<()> {
    let config = Config::load()?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Post {} mock records to {}?",
                count, config.base_url
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let client = build_client(&config)?;
    let send_delay = Duration::from_millis(config.send_delay_ms);

    let batch: Vec<_> = seed::generate(count)
        .into_iter()
        .map(|payload| (payload.status.clone(), payload))
        .collect();

    let stats = replay::run(&client, batch, send_delay, 0).await;

    if stats.failed > 0 {
        bail!("{} records failed after retry", stats.failed);
    }
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  config file : {:?}", Config::config_path()?);
    println!("  base_url    : {}", config.base_url);
    println!(
        "  api_key     : {}",
        match &config.api_key {
            Some(_) => "set".green().to_string(),
            None => "not set".yellow().to_string(),
        }
    );
    println!("  send delay  : {} ms", config.send_delay_ms);

    Ok(())
}
