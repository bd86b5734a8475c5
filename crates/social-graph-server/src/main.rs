//! Social Graph Server - REST API for users, friendships and graph queries.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use social_graph_core::{open_store, SocialGraphConfig, StoreBackend};
use social_graph_server::{build_app, AppState};

/// Social Graph Server - friendships and degree-of-separation queries
#[derive(Parser, Debug)]
#[command(name = "social-graph-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (default: ./social-graph.toml if present)
    #[arg(short, long, env = "SOCIAL_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL (overrides store.url)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Use the in-memory store; nothing is persisted
    #[arg(long)]
    in_memory: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(self, config: &mut SocialGraphConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.store.url = url;
        }
        if self.in_memory {
            config.store.backend = StoreBackend::Memory;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl-C received. Shutting down gracefully..."),
        () = terminate => tracing::info!("SIGTERM received. Shutting down gracefully..."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let print_config = args.print_config;
    let mut config = SocialGraphConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if print_config {
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    tracing::info!("Starting social graph server...");
    tracing::info!(backend = ?config.store.backend, "Opening edge store");
    let store = open_store(&config.store).await?;

    tracing::info!("Testing database connection...");
    if let Err(e) = store.ping().await {
        tracing::error!(error = %e, "Failed to connect to database. Check store.url.");
        anyhow::bail!("database unreachable: {e}");
    }

    let state = Arc::new(AppState::new(store));
    let app = build_app(state, &config);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Social graph server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
