//! # incidentsd — incident registry daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and the command argument
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository implementation (adapter)
//! - Construct the application service, injecting the repository via its port trait
//! - `seed`: insert sample incidents into an empty store and exit
//! - otherwise: build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod seed;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use incidents_adapter_http_axum::state::AppState;
use incidents_adapter_storage_sqlite_sqlx::SqliteIncidentRepository;
use incidents_app::services::incident_service::IncidentService;

use crate::config::Config;

/// What the process was asked to do.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Serve,
    Seed,
}

impl Command {
    fn parse(arg: Option<&str>) -> anyhow::Result<Self> {
        match arg {
            None | Some("serve") => Ok(Self::Serve),
            Some("seed") => Ok(Self::Seed),
            Some(other) => anyhow::bail!("unknown command `{other}` (expected `serve` or `seed`)"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1);
    let command = Command::parse(arg.as_deref())?;

    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config);

    // Database
    let db = incidents_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open database")?;

    // Service
    let repo = SqliteIncidentRepository::new(db.pool().clone());
    let service = Arc::new(IncidentService::new(repo));

    match command {
        Command::Seed => {
            seed::run(service.as_ref()).await?;
        }
        Command::Serve => serve(service, &config).await?,
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(
    service: Arc<IncidentService<SqliteIncidentRepository>>,
    config: &Config,
) -> anyhow::Result<()> {
    let state = AppState::from_arc(service);
    let app = incidents_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "incidentsd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("incidentsd shut down");
    Ok(())
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
