//! Plain-text rendering of the dashboard screens.

use std::fmt::Write;

use crate::analysis::{KpiResult, RecordSet};
use crate::assets::ArtifactStatus;
use crate::catalog::{BatteryType, Configuration, StationType, Topology, graph_filename};
use crate::dashboard::RunResults;
use crate::session::DisplayMode;

/// Widest a table column is rendered before truncation.
const MAX_CELL_WIDTH: usize = 24;

fn ready(present: bool) -> &'static str {
    if present { "Ready" } else { "Missing" }
}

/// Lists every station and battery pack type.
pub fn welcome() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Battery Analytics Dashboard");
    let _ = writeln!(out, "Select a station and battery configuration to run the simulation.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Station types:");
    for st in StationType::ALL {
        let kind = match st.topology() {
            Topology::Independent => "independent",
            Topology::Clustered => "clustered",
        };
        let _ = writeln!(out, "  {:<6} {} [{kind}]", st.code(), st.label());
    }
    let _ = writeln!(out, "Battery packs:");
    for bt in BatteryType::ALL {
        let mix = if bt.is_mix() { " [mixed]" } else { "" };
        let _ = writeln!(out, "  {:<6} {}{mix}", bt.code(), bt.label());
    }
    out
}

/// Error shown when artifact folders are absent.
pub fn missing_folders(missing: &[&str], expected_tree: &str) -> String {
    format!(
        "Missing folders: {}\nMake sure all folders are in the data directory.\n\
         Expected folder structure:\n{expected_tree}\n",
        missing.join(", ")
    )
}

/// Artifact readiness before the simulation is run.
pub fn configuration_preview(config: Configuration, status: &ArtifactStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current configuration: {config}");
    let _ = writeln!(out, "Simulation logs:     {}", ready(status.log_csv));
    let _ = writeln!(out, "First hour graph:    {}", ready(status.first_hour_graph));
    let _ = writeln!(out, "Customer graph:      {}", ready(status.customers_graph));
    out
}

/// The three headline metrics followed by the full KPI report.
pub fn kpi_dashboard(kpi: &KpiResult) -> String {
    format!(
        "Total customers: {} | First hour served: {} | Simulation duration: {:.1} hrs\n\n{kpi}\n",
        kpi.total_customers, kpi.first_hour_customers, kpi.simulation_duration
    )
}

/// Location of both graphs, or which file is missing.
pub fn graphs(results: &RunResults) -> String {
    let filename = graph_filename(results.config);
    let mut out = String::new();
    for (title, present, path) in [
        (
            "Total Customers Served",
            results.status.customers_graph,
            &results.paths.customers_graph,
        ),
        (
            "First Hour Analysis",
            results.status.first_hour_graph,
            &results.paths.first_hour_graph,
        ),
    ] {
        if present {
            let _ = writeln!(out, "{title}: {}", path.display());
        } else {
            let _ = writeln!(out, "{title}: graph not found: {filename}");
        }
    }
    out
}

/// Renders the visible rows of a log as an aligned text table.
pub fn data_table(records: &RecordSet, mode: DisplayMode, preview_rows: usize) -> String {
    let rows = mode.visible_rows(records, preview_rows);
    let headers = records.headers();

    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell_width(cell));
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} of {} rows)",
        mode.label(preview_rows),
        rows.len(),
        records.len()
    );
    write_row(&mut out, headers.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        let cells = (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str));
        write_row(&mut out, cells, &widths);
    }
    out
}

/// Full results screen for a completed run.
pub fn results(results: &RunResults, mode: DisplayMode, preview_rows: usize) -> String {
    let mut out = String::new();
    if let Some(kpi) = &results.kpi {
        out.push_str(&kpi_dashboard(kpi));
        out.push('\n');
    }
    out.push_str(&graphs(results));
    out.push('\n');
    match &results.records {
        Ok(records) => out.push_str(&data_table(records, mode, preview_rows)),
        Err(e) => {
            let _ = writeln!(out, "Error loading CSV: {e}");
        }
    }
    out
}

fn cell_width(s: &str) -> usize {
    s.chars().count().min(MAX_CELL_WIDTH)
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| {
            let truncated: String = cell.chars().take(w).collect();
            format!("{truncated:<w$}")
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
