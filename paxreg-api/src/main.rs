//! paxreg-api - Passenger registry HTTP service
//!
//! CRUD surface over the passenger store plus a passthrough to the
//! federal cpf-verification API.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use paxreg_api::services::verify_client::VerifyClient;
use paxreg_api::{build_router, AppState};
use paxreg_common::config::AppConfig;
use paxreg_common::db;

#[derive(Debug, Parser)]
#[command(name = "paxreg-api", version, about = "Passenger registry service")]
struct Args {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the SQLite database file
    #[arg(long)]
    database: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:5600
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting passenger registry (paxreg-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let config = AppConfig::resolve(
        args.config.as_deref(),
        args.database.as_deref(),
        args.bind.as_deref(),
    )?;

    let pool = db::init_database(&config.database).await?;

    let token = config.external.token.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "External API token not configured. Please configure using one of:\n\
             1. Environment: {}=your-token-here\n\
             2. TOML config: paxreg.toml ([external] token = \"your-token\")",
            paxreg_common::config::EXTERNAL_TOKEN_ENV
        )
    })?;

    let verifier = VerifyClient::new(
        config.external.url.clone(),
        token,
        Duration::from_secs(config.external.timeout_secs),
    )?;

    let state = AppState::new(pool, verifier);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("paxreg-api listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
