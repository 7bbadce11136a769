use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use findserver::config::Config;
use findserver::models::{Endpoint, OutcomeReport};
use findserver::ServerFinder;

#[derive(Parser)]
#[command(
    name = "findserver",
    version,
    about = "Probe candidate servers and pick the online one with the lowest priority",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to FINDSERVER_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Args)]
struct ProbeArgs {
    /// Candidate server as <priority>=<url>; repeat to replace the configured list
    #[arg(short, long = "server", value_name = "PRIORITY=URL")]
    servers: Vec<Endpoint>,

    /// Per-probe timeout in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe all candidates and print the selected server
    Find(ProbeArgs),

    /// Probe all candidates and print every outcome
    Probe(ProbeArgs),

    /// List configured candidates in declaration order
    Servers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        None => Config::from_env()?,
    };

    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Find(args) => {
            apply_overrides(&mut config, &args);
            tracing::info!(
                servers = config.servers.len(),
                timeout_ms = config.probe.timeout_ms,
                "Starting find command"
            );
            find(&config, args.json).await?;
        }

        Commands::Probe(args) => {
            apply_overrides(&mut config, &args);
            tracing::info!(
                servers = config.servers.len(),
                timeout_ms = config.probe.timeout_ms,
                "Starting probe command"
            );
            probe(&config, args.json).await?;
        }

        Commands::Servers => servers(&config),
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &ProbeArgs) {
    if !args.servers.is_empty() {
        config.servers = args.servers.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.probe.timeout_ms = timeout_ms;
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("findserver=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("findserver={level},warn"))
            .context("Invalid log level")?
    };

    // Logs go to stderr so stdout stays parseable
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

async fn find(config: &Config, json: bool) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let finder = ServerFinder::from_config(&config.probe)?;
    let server = finder.find(&config.servers).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&server)?);
    } else {
        println!("{}", server.address());
    }
    Ok(())
}

async fn probe(config: &Config, json: bool) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let finder = ServerFinder::from_config(&config.probe)?;
    let outcomes = finder.probe_all(&config.servers).await;

    if json {
        let reports: Vec<OutcomeReport> = outcomes.iter().map(OutcomeReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for outcome in &outcomes {
            println!("{outcome}");
        }
    }
    Ok(())
}

fn servers(config: &Config) {
    if config.servers.is_empty() {
        println!("No servers configured");
        return;
    }
    for server in &config.servers {
        println!("{server}");
    }
}
