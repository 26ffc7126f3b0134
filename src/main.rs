//! Mini Proxy - A lightweight caching HTTP proxy
//!
//! Relays HTTP/1.0 requests to origin servers and caches small response
//! bodies with LRU eviction under a total byte budget.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Read the listening port from the command line
//! 3. Load cache sizing from environment variables
//! 4. Create the shared cache store
//! 5. Bind the listener and run the accept loop
//! 6. Handle graceful shutdown on SIGINT/SIGTERM

use std::net::SocketAddr;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_proxy::{run_server, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The listening port is the single positional argument
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <port>", args[0]);
        std::process::exit(1);
    }
    let port: u16 = match args[1].parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("usage: {} <port>", args[0]);
            std::process::exit(1);
        }
    };

    info!("Starting Mini Proxy");

    // Load cache sizing from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_cache_size={}B, max_object_size={}B, port={}",
        config.max_cache_size, config.max_object_size, port
    );

    // Create application state with cache store
    let state = AppState::from_config(&config);
    info!("Cache store initialized");

    // Bind to the configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Proxy listening on {}", addr);

    // Serve until a shutdown signal arrives
    tokio::select! {
        _ = run_server(listener, state) => {}
        _ = shutdown_signal() => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
