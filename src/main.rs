//! trainer-router
//!
//! Host binary for the trainer application's navigation service.
//!
//! # Architecture Overview
//!
//! ```text
//!   config (TOML + BASE_URL)
//!        │
//!        ▼
//!   app::create_router ──▶ RouteTable (5 routes, validated)
//!        │                     │
//!        ▼                     ▼
//!   Router ◀──────────── views (eager home, lazy pages)
//!     │  │
//!     │  └──▶ WebHistory (base path, entry stack)
//!     ▼
//!   watch<CurrentRoute> ──▶ subscribers (printed here)
//! ```

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use trainer_router::app;
use trainer_router::config::loader::{resolve_config, ConfigError};
use trainer_router::config::validation::validate_config;
use trainer_router::observability::logging;
use trainer_router::routing::{NavigationError, NavigationOutcome, RouteTarget, Router};

#[derive(Parser)]
#[command(name = "trainer-router")]
#[command(about = "Navigation service for the trainer application", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path override (takes precedence over config and BASE_URL).
    #[arg(short, long)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table
    Routes,
    /// Resolve an app-relative path to a route
    Resolve { path: String },
    /// Navigate through a sequence of targets (paths or name:<route>)
    Navigate {
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Read navigation commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(base) = cli.base {
        config.base_url.0 = base;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    logging::init(&config.observability);

    tracing::info!(
        base_url = %config.base_url.as_str(),
        assets_dir = ?config.assets_dir,
        "Configuration loaded"
    );

    let router = app::create_router_from_config(&config).map_err(|errors| {
        let joined = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
        format!("invalid route table: {joined}")
    })?;
    let router = Arc::new(router);

    match cli.command {
        Commands::Routes => print_routes(&router)?,
        Commands::Resolve { path } => {
            let value = match router.resolve(&path) {
                Some(route) => json!({ "path": route.path(), "name": route.name() }),
                None => json!(null),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Navigate { targets } => run_navigate(&router, &targets).await?,
        Commands::Shell => run_shell(router).await?,
    }

    Ok(())
}

fn print_routes(router: &Router) -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = Vec::new();
    for route in router.table().iter() {
        let href = router.href_for(&RouteTarget::name(route.name()))?;
        routes.push(json!({
            "path": route.path(),
            "name": route.name(),
            "href": href,
            "lazy": route.component().is_lazy(),
            "state": route.component().state().label(),
        }));
    }
    println!("{}", serde_json::to_string_pretty(&routes)?);
    Ok(())
}

async fn navigate(router: &Router, verb: &str, target: &str) -> Result<NavigationOutcome, NavigationError> {
    let target = RouteTarget::parse(target);
    match verb {
        "replace" => router.replace(target).await,
        _ => router.push(target).await,
    }
}

/// One-shot navigation: stops at, and returns, the first failure.
async fn run_navigate(router: &Router, targets: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for target in targets {
        let outcome = navigate(router, "push", target).await?;
        print_outcome(&outcome)?;
    }
    Ok(())
}

fn print_outcome(outcome: &NavigationOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        NavigationOutcome::Navigated(current) => println!("{}", serde_json::to_string(current)?),
        NavigationOutcome::Duplicated => println!("{}", json!({ "duplicated": true })),
    }
    Ok(())
}

/// Shell reporting: failures are printed and the session continues.
fn report(result: Result<NavigationOutcome, NavigationError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            eprintln!("navigation failed: {e}");
            Ok(())
        }
    }
}

async fn run_shell(router: Arc<Router>) -> Result<(), Box<dyn std::error::Error>> {
    // Print every route change, independently of who triggered it.
    let mut updates = router.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            if let Some(current) = updates.borrow_and_update().as_ref() {
                tracing::debug!(route = %current.name, view = %current.view_name, "Current route changed");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(verb @ ("push" | "replace")), Some(target)) => report(navigate(&router, verb, target).await)?,
            (Some("back"), None) => report(router.back().await)?,
            (Some("forward"), None) => report(router.forward().await)?,
            (Some("current"), None) => println!("{}", serde_json::to_string(&router.current())?),
            (Some("routes"), None) => print_routes(&router)?,
            (Some("quit" | "exit"), None) => break,
            (None, _) => continue,
            _ => eprintln!("commands: push <target> | replace <target> | back | forward | current | routes | quit"),
        }
    }

    drop(router);
    watcher.abort();
    tracing::info!("Shell closed");
    Ok(())
}
