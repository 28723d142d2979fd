use std::sync::Arc;

use anyhow::{Context, Result};
use confcentral::{
    ConferenceApi, InMemoryStore, TokenRegistry,
    gateway::{CallerIdentity, IdentityGateway},
    web::{AppConfig, build_router, state::AppState},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let store = Arc::new(InMemoryStore::new());
    let api = Arc::new(ConferenceApi::new(store));

    let registry = TokenRegistry::new();
    for dev_token in &config.dev_tokens {
        registry
            .register(
                dev_token.token.clone(),
                CallerIdentity::new(&dev_token.user_id, &dev_token.email),
            )
            .await;
    }
    if !config.dev_tokens.is_empty() {
        info!(count = config.dev_tokens.len(), "registered dev tokens");
    }
    let gateway: Arc<dyn IdentityGateway> = Arc::new(registry);

    let app = build_router(AppState::new(api, gateway));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "conference backend started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("confcentral=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
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
}
