//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{
    ConfigurationEntry, ErrorResponse, KpiResponse, RecordsResponse, SelectionQuery,
};
use crate::analysis::{KpiResult, RecordSet};
use crate::catalog::{BatteryType, Configuration, StationType};
use crate::dashboard::RunResults;
use crate::session::DisplayMode;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

/// Lists every configuration with its artifact status.
///
/// `GET /configurations` → 200 + `Vec<ConfigurationEntry>` JSON
pub async fn get_configurations(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ConfigurationEntry>> {
    let layout = state.dashboard.layout();
    Json(
        Configuration::all()
            .map(|cfg| ConfigurationEntry::new(cfg, layout.status(cfg)))
            .collect(),
    )
}

/// Derives KPIs for one configuration.
///
/// `GET /kpi?station=2-clu&battery=mix` → 200 + `KpiResponse` JSON
/// Unknown code → 400, log missing or unreadable → 404
pub async fn get_kpi(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<KpiResponse>, ApiError> {
    let (config, _, kpi) = load(&state, &query)?;
    Ok(Json(KpiResponse {
        station: config.station,
        battery: config.battery,
        kpi,
    }))
}

/// Returns log rows for one configuration.
///
/// `GET /records?station=1-int&battery=1bp` → first preview rows
/// `GET /records?station=1-int&battery=1bp&mode=full` → every row
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let mode = match query.mode.as_deref() {
        None | Some("preview") => DisplayMode::Preview,
        Some("full") => DisplayMode::Full,
        Some(other) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("`mode` must be \"preview\" or \"full\", got \"{other}\""),
            ));
        }
    };
    let (_, records, _) = load(&state, &query)?;
    Ok(Json(RecordsResponse {
        headers: records.headers().to_vec(),
        rows: mode
            .visible_rows(&records, state.dashboard.preview_rows())
            .to_vec(),
        total_rows: records.len(),
    }))
}

/// Parses the selection and loads its log.
///
/// Missing data folders are a 503, a failed load is a 404.
fn load(
    state: &AppState,
    query: &SelectionQuery,
) -> Result<(Configuration, RecordSet, KpiResult), ApiError> {
    let station: StationType = query
        .station
        .parse()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    let battery: BatteryType = query
        .battery
        .parse()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    state
        .dashboard
        .check_folders()
        .map_err(|e| api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))?;
    let RunResults {
        config,
        records,
        kpi,
        ..
    } = state.dashboard.results(Configuration::new(station, battery));
    let records = records.map_err(|e| api_error(StatusCode::NOT_FOUND, e.to_string()))?;
    let kpi = kpi.unwrap_or_default();
    Ok((config, records, kpi))
}
