//! CLI administration tool for getnews.
//!
//! Talks to the shortlink store directly and exercises the query parser
//! without going through the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Mint (or look up) the shortlink for a URL
//! cargo run --bin admin -- shorten https://example.com/story
//!
//! # Resolve a short code
//! cargo run --bin admin -- resolve abcdefgh12345678
//!
//! # Show how an argument string is parsed
//! cargo run --bin admin -- parse "climate+change,n=5" --subdomain gb
//!
//! # Check the store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` (required for store commands): shortlink store
//! - `BASE_URL`, `SHORTLINK_PREFIX`, `SHORTLINK_TTL_SECONDS`, `SHORT_CODE_LENGTH`:
//!   same meaning as for the server

use getnews::application::services::ShortenerService;
use getnews::application::services::shortener_service::{DEFAULT_PREFIX, DEFAULT_TTL_SECONDS};
use getnews::config::mask_connection_string;
use getnews::domain::entities::HeadlinesRequest;
use getnews::domain::query::{parse_args, parse_subdomain};
use getnews::infrastructure::news::{FALLBACK_COUNTRY, NewsApiClient};
use getnews::infrastructure::store::RedisStore;
use getnews::utils::code_generator::DEFAULT_CODE_LENGTH;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing getnews.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL, reusing its existing shortlink if there is one
    Shorten {
        /// URL to shorten
        url: String,
    },

    /// Look up the URL behind a short code
    Resolve {
        /// Short code, as it appears after `/s/`
        code: String,
    },

    /// Parse an argument string the way the server would
    Parse {
        /// Argument string, e.g. "climate+change,category=science,n=5"
        args: String,

        /// Country subdomain the request would arrive on
        #[arg(short, long)]
        subdomain: Option<String>,
    },

    /// Shortlink store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check the Redis connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shorten { url } => shorten(&url).await?,
        Commands::Resolve { code } => resolve(&code).await?,
        Commands::Parse { args, subdomain } => parse(&args, subdomain.as_deref())?,
        Commands::Store { action } => handle_store_action(action).await?,
    }

    Ok(())
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

async fn connect() -> Result<Arc<RedisStore>> {
    let redis_url = std::env::var("REDIS_URL").context("REDIS_URL must be set")?;
    let store = RedisStore::connect(&redis_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&redis_url)))?;
    Ok(Arc::new(store))
}

async fn shortener() -> Result<ShortenerService> {
    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "https://getnews.tech".to_string());
    let prefix = std::env::var("SHORTLINK_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    Ok(ShortenerService::new(connect().await?, base_url)
        .with_prefix(prefix)
        .with_code_length(env_or("SHORT_CODE_LENGTH", DEFAULT_CODE_LENGTH))
        .with_ttl_seconds(env_or("SHORTLINK_TTL_SECONDS", DEFAULT_TTL_SECONDS)))
}

async fn shorten(url: &str) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let service = shortener().await?;
    let shortlink = service
        .get_shortened_url(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  URL:       {}", url.cyan());
    println!("  Shortlink: {}", shortlink.bright_yellow().bold());
    println!();

    Ok(())
}

async fn resolve(code: &str) -> Result<()> {
    println!("{}", "🔍 Resolve Shortlink".bright_blue().bold());
    println!();

    let service = shortener().await?;
    let original = service
        .get_original_url(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve code: {}", e))?;

    match original {
        Some(url) => println!("  {} → {}", code.bright_black(), url.green()),
        None => println!("  {}", "Shortlink not found".yellow()),
    }
    println!();

    Ok(())
}

/// Prints the upstream request an argument string turns into.
fn parse(args: &str, subdomain: Option<&str>) -> Result<()> {
    println!("{}", "🧩 Parse Arguments".bright_blue().bold());
    println!();

    let labels: Vec<&str> = subdomain.into_iter().collect();
    let outcome = parse_subdomain(labels.as_slice()).and_then(|country| {
        parse_args(args).map(|parsed| (country, parsed))
    });

    let (country, parsed) = match outcome {
        Ok(ok) => ok,
        Err(e) => {
            println!("  {} {}", "❌".red(), e.message().red());
            println!();
            return Ok(());
        }
    };

    let request = HeadlinesRequest::from_query(&parsed, country);
    let params = NewsApiClient::query_params(&request);

    println!(
        "  Query:    {}",
        parsed.query.as_deref().unwrap_or("-").cyan()
    );
    let country = match country {
        Some(code) => code.as_str().to_string(),
        None if params.iter().any(|(name, _)| *name == "country") => {
            format!("{} (default)", FALLBACK_COUNTRY)
        }
        None => "any".to_string(),
    };
    println!("  Country:  {}", country.cyan());
    println!("  Reverse:  {}", parsed.flag("reverse").to_string().cyan());
    println!("  No color: {}", parsed.flag("nocolor").to_string().cyan());
    println!();
    println!("{}", "Upstream parameters:".bright_white().bold());
    for (name, value) in params {
        println!("  {:<10} {}", name.bright_black(), value);
    }
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            connect().await?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
