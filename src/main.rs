use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use myparser::client::WorkerClient;
use myparser::config::{Config, LoggingConfig};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "myparser",
    version,
    about = "Query a MyParser parsing farm for worker status",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to MYPARSER_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Worker host, optionally with a port
    #[arg(long, global = true)]
    host: Option<String>,

    /// Basic-auth username
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Basic-auth password
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of the worker behind --host
    Me,

    /// List every worker registered in the farm
    Workers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    setup_tracing(&config.logging, cli.verbose)?;

    tracing::debug!(host = %config.worker.host, auth = config.worker.has_credentials(), "Configuration loaded");

    let client = WorkerClient::new(config.worker).context("Failed to create worker client")?;

    match cli.command {
        Commands::Me => commands::me(&client, cli.output).await?,
        Commands::Workers => commands::workers(&client, cli.output).await?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    if let Some(host) = &cli.host {
        config.worker.host = host.clone();
    }
    if let Some(username) = &cli.username {
        config.worker.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.worker.password = password.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("myparser=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("myparser={},warn", logging.level))
            .context("Invalid log level")?
    };

    match logging.format.as_str() {
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
