//! KPI derivation from logs on disk, with and without reference tables.

mod common;

use std::fs;

use swapdash::analysis::KpiResult;
use swapdash::catalog::{BatteryType, Configuration, StationType};
use swapdash::io::export::export_kpi_csv;
use swapdash::io::{LoadError, load_log};

use common::{DataRoot, SAMPLE_LOG};

const CONFIG: Configuration =
    Configuration::new(StationType::ThreeClustered, BatteryType::ThreeBpMix);

#[test]
fn reference_tables_drive_customer_counts() {
    let root = DataRoot::new();
    root.write_log(CONFIG, SAMPLE_LOG.as_bytes());

    let kpi = root.dashboard(true).results(CONFIG).kpi.expect("kpi");
    assert_eq!(
        kpi,
        KpiResult {
            total_customers: 368,
            avg_battery_count: 9.6,
            first_hour_customers: 35,
            battery_utilization: 71.4,
            peak_hour_customers: 55,
            avg_service_interval: 2.6,
            success_rate: 1.1,
            simulation_duration: 16.0,
        }
    );
}

#[test]
fn log_data_drives_counts_without_tables() {
    let root = DataRoot::new();
    root.write_log(CONFIG, SAMPLE_LOG.as_bytes());

    let kpi = root.dashboard(false).results(CONFIG).kpi.expect("kpi");
    assert_eq!(kpi.total_customers, 41);
    assert_eq!(kpi.first_hour_customers, 4);
    assert_eq!(kpi.peak_hour_customers, 6);
    assert_eq!(kpi.avg_service_interval, 23.4);
    assert_eq!(kpi.success_rate, 9.8);
    assert_eq!(kpi.simulation_duration, 16.0);
}

#[test]
fn minimal_log_falls_back_to_defaults() {
    let root = DataRoot::new();
    root.write_log(CONFIG, b"Customers Served\n3\n");

    let kpi = root.dashboard(false).results(CONFIG).kpi.expect("kpi");
    assert_eq!(kpi.total_customers, 3);
    assert_eq!(kpi.first_hour_customers, 0);
    assert_eq!(kpi.peak_hour_customers, 1);
    assert_eq!(kpi.avg_battery_count, 7.0);
    assert_eq!(kpi.battery_utilization, 100.0);
    assert_eq!(kpi.avg_service_interval, 6.0);
    assert_eq!(kpi.success_rate, 98.5);
    assert_eq!(kpi.simulation_duration, 16.0);
}

#[test]
fn latin1_log_with_padded_headers_loads() {
    let root = DataRoot::new();
    let mut bytes = b" Time , Customers Served , Station\n".to_vec();
    bytes.extend_from_slice(b"7:00:00,0,Caf\xe9\n7:45:00,12,Caf\xe9\n");
    root.write_log(CONFIG, &bytes);

    let path = root.dashboard(false).layout().artifacts(CONFIG).log_csv;
    let records = load_log(&path).expect("load");
    assert_eq!(records.headers(), ["Time", "Customers Served", "Station"]);
    assert_eq!(records.cell(1, 2), Some("Café"));

    let kpi = root.dashboard(false).results(CONFIG).kpi.expect("kpi");
    assert_eq!(kpi.total_customers, 12);
    assert_eq!(kpi.first_hour_customers, 12);
}

#[test]
fn missing_log_reports_path() {
    let root = DataRoot::new();
    let results = root.dashboard(true).results(CONFIG);
    match results.records {
        Err(LoadError::NotFound(path)) => assert!(path.ends_with(
            "Battery Simulation Logs - 3 CLU - MIX 3 BP.csv"
        )),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(results.kpi.is_none());
}

#[test]
fn exported_csv_matches_derived_kpis() {
    let root = DataRoot::new();
    root.write_log(CONFIG, SAMPLE_LOG.as_bytes());
    let kpi = root.dashboard(true).results(CONFIG).kpi.expect("kpi");

    let out = root.path().join("kpi.csv");
    export_kpi_csv(CONFIG, &kpi, &out).expect("export");

    let text = fs::read_to_string(out).expect("read");
    let mut lines = text.lines();
    assert!(lines.next().expect("header").starts_with("station,battery,total_customers"));
    assert_eq!(
        lines.next(),
        Some(
            concat!(
                "\"3 Clustered Stations (45 docks, 44 batteries)\",",
                "3 BP Mix,368,35,16.0,55,2.6,9.6,71.4,1.1"
            )
        )
    );
}
