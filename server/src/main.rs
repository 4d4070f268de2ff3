mod config;
mod service;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use records::{Database, Registry};
use service::AppState;

/// HTTP front-end for the municipal records store.
#[derive(Debug, Parser)]
#[command(name = "municipal-server", about = "Municipal records HTTP API")]
struct Args {
    /// SQLite database file. Created, with its directory, if missing.
    #[arg(long, default_value_os_t = config::get_db_path())]
    db: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value_t = config::get_bind_addr())]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    tracing::info!("Starting municipal records server");
    tracing::info!("Using database: {}", args.db.display());

    let db = Database::open(&args.db).await?;
    let state = AppState::new(Registry::new(&db));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, service::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down, closing database");
    db.close().await;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                return;
            }
            Err(err) => tracing::warn!(error = %err, "cannot listen for SIGTERM"),
        }
    }
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
