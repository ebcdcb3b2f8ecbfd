//! Lineage server binary

use clap::Parser;
use lineage_server::handlers;
use lineage_server::service::PersonService;
use lineage_storage::{PersonStore, SqliteStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lineage-server")]
#[command(author, version, about = "Family relationship graph service")]
struct Cli {
    /// Directory holding the database file
    #[arg(long, env = "LINEAGE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Database name
    #[arg(long, env = "LINEAGE_DATABASE", default_value = "lineage")]
    database: String,

    /// Listener port
    #[arg(long, env = "LINEAGE_PORT", default_value_t = 8080)]
    port: u16,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    std::fs::create_dir_all(&cli.data_dir)?;
    let db_path = cli.data_dir.join(format!("{}.db", cli.database));
    tracing::debug!("using database at {:?}", db_path);

    let store = Arc::new(SqliteStore::open(&db_path)?);
    store.initialize().await?;

    let service = Arc::new(PersonService::new(store));
    let app = handlers::router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("lineage server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
