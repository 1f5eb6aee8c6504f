//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::analysis::KpiResult;
use crate::assets::ArtifactStatus;
use crate::catalog::{BatteryType, Configuration, StationType, graph_filename, log_filename};

/// One configuration with its artifact filenames and readiness.
#[derive(Debug, Serialize)]
pub struct ConfigurationEntry {
    pub station: StationType,
    pub station_label: &'static str,
    pub battery: BatteryType,
    pub battery_label: &'static str,
    pub log_file: &'static str,
    pub graph_file: String,
    pub status: ArtifactStatus,
}

impl ConfigurationEntry {
    pub fn new(config: Configuration, status: ArtifactStatus) -> Self {
        Self {
            station: config.station,
            station_label: config.station.label(),
            battery: config.battery,
            battery_label: config.battery.label(),
            log_file: log_filename(config),
            graph_file: graph_filename(config),
            status,
        }
    }
}

/// Station/battery selection query, by code or label.
#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    pub station: String,
    pub battery: String,
    /// `"preview"` (default) or `"full"`; records endpoint only.
    pub mode: Option<String>,
}

/// Derived KPIs for one configuration.
#[derive(Debug, Serialize)]
pub struct KpiResponse {
    pub station: StationType,
    pub battery: BatteryType,
    pub kpi: KpiResult,
}

/// Visible rows of a configuration's log.
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Row count of the whole log, regardless of mode.
    pub total_rows: usize,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
