use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bookstore::AppState;
use bookstore::handlers::http::{build_api_router, serve_request};
use bookstore_shared::config::load_config;

/// Bookstore HTTP API server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let addr = config.server.addr();
    let max_connections = config.server.max_connections;

    let state = AppState::connect(config).await?;
    let router = Arc::new(build_api_router());
    let permits = Arc::new(Semaphore::new(max_connections));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received, no longer accepting connections");
                break;
            }
        };

        let Ok(permit) = Arc::clone(&permits).try_acquire_owned() else {
            warn!("Connection limit reached, dropping {}", peer);
            continue;
        };

        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);
        let state = state.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req| serve_request(Arc::clone(&router), state.clone(), req));

            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service)
                .await
            {
                error!("Error serving connection from {}: {:?}", peer, err);
            }
            drop(permit);
        });
    }

    state.db.close().await;
    info!("Server stopped");
    Ok(())
}
