#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::Local;
use serde_json::json;
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::export;
use crate::loader::{Snapshot, load_latest_data};
use crate::metrics::{summarize, table_rows};
use crate::page::DashboardPage;

type BuildResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Shared, read-only state behind every request
pub struct AppState {
    pub config: DashboardConfig,
    page: DashboardPage,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config,
            page: DashboardPage::new()?,
        })
    }
}

/// Builds the dashboard router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/refresh", get(refresh))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/zones.csv", get(export_csv))
        .route("/api/zones.xlsx", get(export_xlsx))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn Error>> {
    let addr = config.bind_addr.clone();
    let app_state = Arc::new(AppState::new(config)?);

    let listener = TcpListener::bind(addr.as_str()).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, router(app_state)).await?;

    Ok(())
}

/// One full select, load and render pass
async fn serve_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let rendered = tokio::task::spawn_blocking(move || {
        let pass = load_latest_data(&state.config);
        if let Err(e) = &pass {
            log::warn!("refresh failed: {}", e);
        }
        state.page.render(&state.config, &pass, Local::now())
    })
    .await;

    match rendered {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e),
    }
}

async fn refresh() -> Redirect {
    Redirect::to("/")
}

async fn get_snapshot(State(state): State<Arc<AppState>>) -> Response {
    let threshold = state.config.alert_threshold;
    match with_snapshot(state, move |snapshot| Ok(summarize(snapshot, threshold))).await {
        Ok(summary) => Json(summary).into_response(),
        Err(response) => response,
    }
}

async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    match with_snapshot(state, |snapshot| Ok(export::to_csv(&table_rows(&snapshot.zones)))).await {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"risk_zones.csv\""),
            ],
            csv,
        )
            .into_response(),
        Err(response) => response,
    }
}

async fn export_xlsx(State(state): State<Arc<AppState>>) -> Response {
    let built = with_snapshot(state, |snapshot| {
        Ok(export::to_xlsx(&table_rows(&snapshot.zones))?)
    })
    .await;

    match built {
        Ok(bytes) => (
            [
                (
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"risk_zones.xlsx\""),
            ],
            bytes,
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Loads the latest snapshot on a blocking worker and hands it to `build`
///
/// A failed pass becomes a 503 with a JSON error body; a failing `build` or
/// a crashed worker becomes a 500.
async fn with_snapshot<T, F>(state: Arc<AppState>, build: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&Snapshot) -> BuildResult<T> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        load_latest_data(&state.config).map(|snapshot| build(&snapshot))
    })
    .await;

    match joined {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(internal_error(e)),
        Ok(Err(e)) => Err(unavailable(e)),
        Err(e) => Err(internal_error(e)),
    }
}

fn unavailable(e: DashboardError) -> Response {
    log::warn!("refresh failed: {}", e);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

fn internal_error(e: impl Display) -> Response {
    log::error!("request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Dashboard rendering failed: {}", e),
    )
        .into_response()
}
