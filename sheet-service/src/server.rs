use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::error;

use energy_domain::Period;

use crate::export::{self, ExportSelection};
use crate::ingest::{self, IngestError};
use crate::parse::ParseOptions;
use crate::sources::SheetSource;

pub struct AppState {
    pub source: Arc<dyn SheetSource>,
    pub parse: ParseOptions,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/energy-data", get(energy_data).options(preflight))
        .route("/api/energy-data/export", get(export_csv).options(preflight))
        .with_state(state)
}

/// The dashboard is served from a different origin, so every response
/// carries permissive CORS headers and OPTIONS answers with an empty 200.
fn with_cors(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE"),
    );
    resp
}

async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

async fn energy_data(State(state): State<Arc<AppState>>) -> Response {
    metrics::counter!("energy_data_requests_total").increment(1);

    match ingest::load_snapshot(state.source.as_ref(), &state.parse).await {
        Ok(snapshot) => with_cors(Json(snapshot).into_response()),
        Err(e) => ingest_error_response(e),
    }
}

#[derive(serde::Deserialize)]
struct ExportQuery {
    #[serde(default = "default_true")]
    gas: bool,
    #[serde(default = "default_true")]
    power: bool,
    period: Option<String>,
}

fn default_true() -> bool {
    true
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let period = match query.period.as_deref() {
        None => None,
        Some("consolidated") => Some(Period::Consolidated),
        Some("forecast") => Some(Period::Forecast),
        Some(other) => {
            let body = json!({
                "message": "invalid period filter",
                "details": format!("unknown period '{other}', expected 'consolidated' or 'forecast'"),
            });
            return with_cors((StatusCode::BAD_REQUEST, Json(body)).into_response());
        }
    };

    let snapshot = match ingest::load_snapshot(state.source.as_ref(), &state.parse).await {
        Ok(s) => s,
        Err(e) => return ingest_error_response(e),
    };

    let selection = ExportSelection {
        gas: query.gas,
        power: query.power,
        period,
    };
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    match export::write_csv(&snapshot.data, &selection, today) {
        Ok(csv) => with_cors(
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"energy-data.csv\"",
                    ),
                ],
                csv,
            )
                .into_response(),
        ),
        Err(e) => {
            error!(error = %e, "csv export failed");
            let body = json!({
                "message": "failed to export energy data",
                "details": e.to_string(),
            });
            with_cors((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

fn ingest_error_response(e: IngestError) -> Response {
    error!(error = %e, "energy data request failed");
    metrics::counter!("energy_data_failures_total").increment(1);

    let message = match &e {
        IngestError::Transport(_) => "failed to fetch energy data",
        IngestError::Validation(_) => "unexpected sheet structure",
    };
    let body = json!({
        "message": message,
        "details": e.to_string(),
    });
    with_cors((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
}
