//! # Menufit Server
//!
//! `menufit` binary: loads the catalog once, builds the engine, and serves it
//! over HTTP or answers single queries from the command line.
//!
//! ## Architecture
//!
//! ```text
//! Cli (clap, MENUFIT_* env)
//!     │
//!     ├──> bootstrap: EngineConfig (TOML) + catalog (JSON/CSV or fallback)
//!     │        └──> EngineState (ready | unavailable)
//!     │
//!     ├──> serve      → axum Router (/, /health, /recommend/advanced, /recommend/simple)
//!     ├──> recommend  → hybrid result JSON on stdout
//!     ├──> simple     → fit-only matches JSON on stdout
//!     └──> status     → service banner JSON on stdout
//! ```

use anyhow::{Context as AnyhowContext, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use menufit_engine::{EngineState, RecommendationResponse, ResponseStatus};
use std::io::{self, Write};
use std::path::PathBuf;

pub mod bootstrap;
pub mod http;

use bootstrap::{build_state, DataSources};
use http::{AppState, RecommendRequest, ServiceBanner, SimpleQueryEcho, SimpleResponse};

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "menufit")]
#[command(about = "Container-fit menu recommendations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Menu records (.csv or JSON array); the built-in dataset is used when unset or unreadable
    #[arg(long, global = true, env = "MENUFIT_MENUS")]
    menus: Option<PathBuf>,

    /// Restaurant records (.csv or JSON array)
    #[arg(long, global = true, env = "MENUFIT_RESTAURANTS")]
    restaurants: Option<PathBuf>,

    /// Engine config (TOML)
    #[arg(long, global = true, env = "MENUFIT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Ranked, explained recommendations for a container
    Recommend(RecommendArgs),

    /// Catalog-order items that fit a container, unscored
    Simple(ContainerArgs),

    /// Print engine readiness and catalog counters
    Status,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:8000
    #[arg(long, env = "MENUFIT_BIND", default_value = "0.0.0.0:8000")]
    bind: String,
}

#[derive(Args)]
struct ContainerArgs {
    /// Container width
    #[arg(long)]
    width: f64,

    /// Container length
    #[arg(long)]
    length: f64,

    /// Container height
    #[arg(long)]
    height: f64,

    /// Number of results (1..=5); defaults to the configured ceiling
    #[arg(long)]
    top_k: Option<i64>,
}

#[derive(Args)]
struct RecommendArgs {
    #[command(flatten)]
    container: ContainerArgs,

    /// Restrict to one category (Korean, Chinese, Japanese, Western, Other)
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    min_price: Option<i64>,

    #[arg(long)]
    max_price: Option<i64>,

    /// Requesting user, logged with the accepted ids
    #[arg(long)]
    user_id: Option<String>,

    /// Weighting time, e.g. 2024-06-04T13:00:00 (defaults to local now)
    #[arg(long)]
    at: Option<NaiveDateTime>,
}

impl ContainerArgs {
    fn request(&self) -> RecommendRequest {
        RecommendRequest {
            width: self.width,
            length: self.length,
            height: self.height,
            category: None,
            top_k: self.top_k,
            min_price: None,
            max_price: None,
            user_id: None,
            timestamp: None,
        }
    }
}

impl RecommendArgs {
    fn request(&self) -> RecommendRequest {
        RecommendRequest {
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            user_id: self.user_id.clone(),
            timestamp: self.at,
            ..self.container.request()
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if !matches!(cli.command, Commands::Serve(_)) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    let sources = DataSources {
        menus: cli.menus,
        restaurants: cli.restaurants,
        config: cli.config,
    };
    let state = build_state(&sources)?;

    match cli.command {
        Commands::Serve(args) => serve(&args.bind, state).await?,
        Commands::Recommend(args) => run_recommend(&args, &state)?,
        Commands::Simple(args) => run_simple(&args, &state)?,
        Commands::Status => run_status(&state)?,
    }

    Ok(())
}

/// Bind and serve the HTTP API until the process is stopped
pub async fn serve(bind: &str, state: EngineState) -> Result<()> {
    let app = http::router(AppState::new(state));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    log::info!("Serving menu recommendations on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn ceiling(state: &EngineState) -> usize {
    state
        .stats()
        .map_or(menufit_engine::DEFAULT_MAX_RECOMMENDATIONS, |stats| {
            stats.max_recommendations
        })
}

fn run_recommend(args: &RecommendArgs, state: &EngineState) -> Result<()> {
    let request = args.request();
    let response = match request.validate(ceiling(state)) {
        Ok(top_k) => RecommendationResponse::from(state.hybrid(&request.hybrid_query(top_k))),
        Err(err) => RecommendationResponse::error(&err),
    };
    print_stdout(&serde_json::to_string_pretty(&response)?)?;

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_simple(args: &ContainerArgs, state: &EngineState) -> Result<()> {
    let request = args.request();
    let outcome = request
        .validate(ceiling(state))
        .and_then(|top_k| Ok((top_k, state.simple(&request.container(), top_k)?)));

    match outcome {
        Ok((top_k, recommendations)) => {
            let response = SimpleResponse {
                status: ResponseStatus::Success,
                count: recommendations.len(),
                recommendations,
                query: SimpleQueryEcho {
                    width: request.width,
                    length: request.length,
                    height: request.height,
                    top_k,
                },
            };
            print_stdout(&serde_json::to_string_pretty(&response)?)
        }
        Err(err) => {
            print_stdout(&serde_json::to_string_pretty(&RecommendationResponse::error(&err))?)?;
            std::process::exit(1);
        }
    }
}

fn run_status(state: &EngineState) -> Result<()> {
    let banner = ServiceBanner::for_state(state);
    print_stdout(&serde_json::to_string_pretty(&banner)?)?;
    if !state.is_ready() {
        std::process::exit(1);
    }
    Ok(())
}
