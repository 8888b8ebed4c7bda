//! Debate rooms backend entrypoint wiring the rotation, listing, and health layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;
mod topics;

use config::AppConfig;
use dao::room_store::RoomStore;
use dao::room_store::rest::{RestConfig, RestRoomStore};
use state::AppState;
use topics::TopicSource;
use topics::{generative::GenerativeTopicSource, pool::PoolTopicSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let app_config = AppConfig::load();

    let rest_config = RestConfig::from_env().context("reading datastore configuration")?;
    let store = Arc::new(RestRoomStore::new(rest_config).context("building datastore client")?);
    if let Err(err) = store.health_check().await {
        // The store is stateless HTTP; keep serving and let the next
        // scheduled run surface the failure if it persists.
        warn!(error = %err, "datastore probe failed at startup");
    }

    let pool_source = Arc::new(PoolTopicSource::new(app_config.into_topic_pool()));

    let generative_source = match env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let source = GenerativeTopicSource::new(key).context("building generation client")?;
            Some(Arc::new(source) as Arc<dyn TopicSource>)
        }
        _ => {
            warn!("GEMINI_API_KEY not set; the generative rotation endpoint will refuse to run");
            None
        }
    };

    let app_state = AppState::new(store, pool_source, generative_source);
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
