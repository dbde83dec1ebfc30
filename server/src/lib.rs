//! # MindCheck backend
//!
//! Journal-based emotional wellness tracker: accounts, journal entries, a
//! placeholder emotion classifier, and the dashboard/insight aggregations
//! built on top of them.
//!
//!
//!
//! # General Infrastructure
//! - Single axum process serving the JSON API under `/api`
//! - Static pages (landing + journal) served from the configured asset
//!   directory; the page scripts talk to the API with fetch
//! - SQLite is the only store; the schema bootstraps on startup
//! - Auth is cookie-based: `sessionid` (HttpOnly bearer token) plus a
//!   `csrftoken` double-submit pair on every mutating request
//!
//!
//!
//! # Endpoints
//! - `POST /api/register`, `POST /api/login`, `POST /api/logout`
//! - `GET  /api/dashboard` — totals, streak, month calendar
//! - `POST /api/journal` — store an entry and analyze it
//! - `POST /api/predict` — analyze + respond with emotion/confidence/message
//! - `GET  /api/results/{entry_id}` — one analysis with chart data
//! - `GET  /api/insights` — trend, volatility, rule-based guidance
//! - `GET  /api/history`, `POST /api/history/delete`
//! - `GET/POST /api/settings` — profile, preferences, CSV export, account
//!   deletion
//! - `GET  /healthz`
//!
//!
//!
//! # Setup
//!
//! Run the server (env vars all have defaults, see `config.rs`).
//! ```sh
//! cargo run -p mindcheck-server
//! `````
use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod database;
pub mod emotion;
pub mod error;
pub mod insights;
pub mod routes;
pub mod state;
pub mod user;
pub mod utils;

use routes::{
    dashboard_handler, health_handler, history_delete_handler, history_handler, insights_handler,
    journal_handler, login_handler, logout_handler, predict_handler, register_handler,
    results_handler, settings_handler, settings_update_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/journal", post(journal_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/results/{entry_id}", get(results_handler))
        .route("/api/insights", get(insights_handler))
        .route("/api/history", get(history_handler))
        .route("/api/history/delete", post(history_delete_handler))
        .route(
            "/api/settings",
            get(settings_handler).post(settings_update_handler),
        )
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-csrftoken")])
        .max_age(Duration::from_secs(60 * 60));

    let app = router(state.clone()).layer(cors);

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
