//! social_chess_server: REST backend for the Social Chess front-end.
//!
//! See `social_chess::config` for the environment variables it reads.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use social_chess::api::build_router;
use social_chess::{store, Config, CrmService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,social_chess=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        backend = ?config.backend,
        static_dir = ?config.static_dir,
        "Loaded configuration"
    );

    let store = store::from_config(&config).context("failed to build record store")?;
    let service = CrmService::new(store);

    let app = build_router(service, config.static_dir.as_deref());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!("social_chess_server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
