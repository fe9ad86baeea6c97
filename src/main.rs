use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keepnotes_api::app::{app, AppState};
use keepnotes_api::config::{self, AppConfig};
use keepnotes_api::database::{manager, PgQueries};

#[derive(Parser)]
#[command(name = "keepnotes-api", version, about = "Notes, folders and users over HTTP")]
struct Args {
    #[arg(long, help = "Port to listen on (overrides KEEPNOTES_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Directory of static assets served at /")]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, DB_HOST, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keepnotes_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(config::config().clone(), args);
    tracing::info!("Starting keepnotes-api in {:?} mode", config.environment);

    // Fatal: nothing is served without a reachable database
    let pool = manager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(Arc::new(PgQueries::new(pool.clone())));
    let router = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        static_dir = %config.api.static_dir,
        "keepnotes-api listening on http://{}",
        bind_addr
    );

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error");

    manager::close(pool).await;
    served
}

fn resolve_config(mut config: AppConfig, args: Args) -> AppConfig {
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(static_dir) = args.static_dir {
        config.api.static_dir = static_dir;
    }
    config
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
