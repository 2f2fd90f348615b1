use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sniped::api::state::AppState;
use sniped::config::{AppConfig, LastQuery};
use sniped::fetch::{clamp_match_count, RiotClient};
use sniped::models::Region;
use sniped::pipeline::{PipelineError, SnipeCheck};
use sniped::report;

#[derive(Parser)]
#[command(name = "sniped")]
#[command(about = "Check whether anyone in your live game has recently played with or against you")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// File remembering the last player queried
    #[arg(long, default_value = "./.sniped_memory.json")]
    memory_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a player's live game and check the lobby for snipers
    Check {
        /// Game name (left of the #). Defaults to the last one queried
        #[arg(long)]
        name: Option<String>,

        /// Tag line (right of the #). Defaults to the last one queried
        #[arg(long)]
        tag: Option<String>,

        /// Platform region, e.g. NA1 or EUW1
        #[arg(long)]
        region: Option<Region>,

        /// How many recent matches to scan (1-100)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        matches: Option<u32>,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Validate the API key by resolving a known account
    Integrity {
        #[arg(long, default_value = "Riot")]
        name: String,

        #[arg(long, default_value = "NA1")]
        tag: String,

        #[arg(long)]
        region: Option<Region>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration with the API key masked
    Show,

    /// Store a new API key
    SetKey { key: String },
}

fn snipe_check(config: &AppConfig) -> Result<SnipeCheck> {
    if !config.has_api_key() {
        bail!(
            "API key not configured. Run `sniped config set-key <KEY>` or set {}",
            sniped::config::API_KEY_ENV
        );
    }
    let client = RiotClient::new(&config.riot_api_key, config.http.clone())
        .context("Failed to create API client")?;
    Ok(SnipeCheck::new(Arc::new(client)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting sniped v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command {
        Commands::Check {
            name,
            tag,
            region,
            matches,
        } => {
            let memory = LastQuery::load(&cli.memory_file);
            let game_name = name
                .or_else(|| Some(memory.game_name.clone()).filter(|s| !s.is_empty()))
                .context("No game name given (use --name)")?;
            let tag_line = tag
                .or_else(|| Some(memory.tag_line.clone()).filter(|s| !s.is_empty()))
                .context("No tag line given (use --tag)")?;
            let region = region.or(memory.region).unwrap_or(config.default_region);
            let match_count =
                clamp_match_count(matches.unwrap_or(config.analysis.cli_match_count));

            let remembered = LastQuery {
                game_name: game_name.clone(),
                tag_line: tag_line.clone(),
                region: Some(region),
            };
            if let Err(e) = remembered.save(&cli.memory_file) {
                tracing::warn!("Could not save last query: {}", e);
            }

            let check = snipe_check(&config)?;
            println!("Checking {}#{} on {}...", game_name, tag_line, region);

            match check.run(&game_name, &tag_line, region, match_count).await {
                Ok(result) => {
                    println!("Active Game Found: {}", result.game.game_mode);
                    println!(
                        "{}",
                        report::render(&result.snipers, match_count, Utc::now())
                    );
                }
                Err(PipelineError::PlayerNotFound) => println!("Player not found!"),
                Err(PipelineError::NotInGame) => {
                    println!("Player is not currently in a live game.")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState {
                snipe_check: snipe_check(&config)?,
                default_region: config.default_region,
                match_count: config.analysis.match_count,
            };
            let app = sniped::api::build_router(state, &config.server);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            if config.server.allow_all_origins {
                tracing::warn!("CORS open to all origins");
            } else {
                tracing::info!("CORS enabled for: {:?}", config.server.cors_origins);
            }
            tracing::info!("Listening on http://{}", addr);
            println!("Starting server on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("Config file:    {}", cli.config.display());
                println!("API key:        {}", config.masked_api_key());
                println!("Default region: {}", config.default_region);
                println!(
                    "Match count:    {} (server), {} (cli)",
                    config.analysis.match_count, config.analysis.cli_match_count
                );
                println!(
                    "Server:         {}:{}",
                    config.server.host, config.server.port
                );
            }
            ConfigAction::SetKey { key } => {
                let key = key.trim();
                if key.is_empty() {
                    bail!("API key must not be empty");
                }
                config.riot_api_key = key.to_string();
                config.save(&cli.config)?;
                println!("Configuration saved to {}", cli.config.display());
            }
        },
        Commands::Integrity { name, tag, region } => {
            let region = region.unwrap_or(config.default_region);
            let check = snipe_check(&config)?;
            match check.resolve(&name, &tag, region).await {
                Ok(puuid) => {
                    println!("Success! API key is valid.");
                    println!("Resolved PUUID: {}...", puuid.short(10));
                }
                Err(PipelineError::PlayerNotFound) => {
                    println!("Failed: could not resolve player. The key might be invalid or the player does not exist.");
                }
                Err(e) => bail!("Error during check: {}", e),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_rejects_out_of_range_match_count() {
        let parse = |n: &str| {
            Cli::try_parse_from([
                "sniped", "check", "--name", "a", "--tag", "b", "--matches", n,
            ])
        };
        assert!(parse("0").is_err());
        assert!(parse("101").is_err());

        let cli = parse("100").unwrap();
        assert!(matches!(cli.command, Commands::Check { matches: Some(100), .. }));
    }
}
