/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> shared services -> Router
 * - Middleware order: http (outermost) -> failure rendering -> routes (+ access on /api/v1)
 * - axum::serve() with graceful shutdown
 */
use std::{any::Any, panic, process, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::EnvFilter;

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_auth_pipeline;
use crate::services::responder::{ErrorCatalog, ErrorResponder};
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// `RUST_LOG` directives when they parse, the default filter otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Route panics through tracing; `abort` ends the process right after logging.
fn install_panic_hook(abort: bool) {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(
            location = info.location().map(tracing::field::display),
            message = panic_message(info.payload()),
            "panic"
        );
        if abort {
            process::abort();
        }
        previous(info);
    }));
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;

    install_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        algorithm = ?config.jwt_algorithm,
        locale = ?config.error_locale,
        push_service = config.push_service_endpoint.as_ref().map(|u| u.as_str()),
        "starting API"
    );

    let state = build_state(&config)?;
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    // Process-level services: immutable after this point.
    let auth = build_auth_pipeline(config).context("building token verifier")?;
    let catalog = ErrorCatalog::load(config.error_locale, config.error_messages_path.as_deref())
        .context("loading error messages")?;

    Ok(AppState::new(auth, ErrorResponder::new(catalog)))
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let responder = state.responder.clone();

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::errors::apply(router, responder);
    middleware::http::apply(router, request_timeout)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
