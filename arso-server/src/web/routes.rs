//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::warn;

use crate::arso::{Quake, Station};
use crate::cache::{ResponseCache, cache_response};

use super::state::AppState;
use super::xml;

/// Create the application router.
///
/// The response cache wraps every dynamic route; static files from
/// `static_dir` are served as the fallback, outside the cache, matching
/// the original middleware ordering.
pub fn create_router(state: AppState, cache: ResponseCache, static_dir: &str) -> Router {
    Router::new()
        .route("/potresi.json", get(quakes_json))
        .route("/potresi.xml", get(quakes_xml))
        .route("/postaje.json", get(stations_json))
        .route("/postaje.xml", get(stations_xml))
        .route("/vreme/:postaja", get(station_lookup))
        .layer(middleware::from_fn_with_state(cache, cache_response))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Fetch the earthquake list, degrading upstream failure to an empty list.
async fn quakes_or_empty(state: &AppState) -> Vec<Quake> {
    state.arso.fetch_quakes().await.unwrap_or_else(|e| {
        warn!(error = %e, "earthquake fetch failed, serving empty list");
        Vec::new()
    })
}

/// Fetch the station list, degrading upstream failure to an empty list.
async fn stations_or_empty(state: &AppState) -> Vec<Station> {
    state.arso.fetch_stations().await.unwrap_or_else(|e| {
        warn!(error = %e, "station index fetch failed, serving empty list");
        Vec::new()
    })
}

/// `GET /potresi.json`
async fn quakes_json(State(state): State<AppState>) -> Json<Vec<Quake>> {
    Json(quakes_or_empty(&state).await)
}

/// `GET /potresi.xml`
async fn quakes_xml(State(state): State<AppState>) -> Result<Response, AppError> {
    let quakes = quakes_or_empty(&state).await;
    let body = xml::quakes(&quakes)?;
    Ok(xml_response(body))
}

/// `GET /postaje.json`
async fn stations_json(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(stations_or_empty(&state).await)
}

/// `GET /postaje.xml`
async fn stations_xml(State(state): State<AppState>) -> Result<Response, AppError> {
    let stations = stations_or_empty(&state).await;
    let body = xml::stations(&stations)?;
    Ok(xml_response(body))
}

/// `GET /vreme/:postaja`
///
/// Re-scans all stations and returns the one whose token matches the path
/// parameter. Upstream failure during the scan reads as "not found", like
/// the original's empty-scan-then-404 path.
async fn station_lookup(
    State(state): State<AppState>,
    Path(postaja): Path<String>,
) -> Response {
    match state.arso.fetch_station(&postaja).await {
        Ok(Some(station)) => Json(station).into_response(),
        Ok(None) => not_found(&postaja),
        Err(e) => {
            warn!(error = %e, "station scan failed during lookup");
            not_found(&postaja)
        }
    }
}

fn xml_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Status payload for lookup misses: `{"Status": "Not found: <id>"}`.
#[derive(Debug, Serialize)]
struct StatusMessage {
    #[serde(rename = "Status")]
    status: String,
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(StatusMessage {
            status: format!("Not found: {id}"),
        }),
    )
        .into_response()
}

/// Application error type for render failures.
#[derive(Debug)]
enum AppError {
    Internal { message: String },
}

impl From<quick_xml::SeError> for AppError {
    fn from(e: quick_xml::SeError) -> Self {
        AppError::Internal {
            message: format!("XML encoding error: {e}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal { message } = self;
        warn!(message = %message, "internal error");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}
