//! CSV export of derived KPIs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::KpiResult;
use crate::catalog::Configuration;

/// Column header for KPI export.
const HEADER: &str = "station,battery,total_customers,first_hour_customers,\
                      simulation_duration,peak_hour_customers,avg_service_interval,\
                      avg_battery_count,battery_utilization,success_rate";

/// Exports one KPI result to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_kpi_csv(config: Configuration, kpi: &KpiResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_kpi_csv(&[(config, kpi)], buf)
}

/// Writes KPI rows as CSV to any writer, one row per configuration.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_kpi_csv(rows: &[(Configuration, &KpiResult)], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (config, k) in rows {
        wtr.write_record(&[
            config.station.label().to_string(),
            config.battery.label().to_string(),
            k.total_customers.to_string(),
            k.first_hour_customers.to_string(),
            format!("{:.1}", k.simulation_duration),
            k.peak_hour_customers.to_string(),
            format!("{:.1}", k.avg_service_interval),
            format!("{:.1}", k.avg_battery_count),
            format!("{:.1}", k.battery_utilization),
            format!("{:.1}", k.success_rate),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BatteryType, StationType};

    fn sample() -> KpiResult {
        KpiResult {
            total_customers: 154,
            avg_battery_count: 7.3,
            first_hour_customers: 14,
            battery_utilization: 100.0,
            peak_hour_customers: 23,
            avg_service_interval: 6.2,
            success_rate: 98.5,
            simulation_duration: 16.0,
        }
    }

    #[test]
    fn header_has_ten_columns() {
        let kpi = sample();
        let cfg = Configuration::new(StationType::OneIndependent, BatteryType::OneBp);
        let mut buf = Vec::new();
        write_kpi_csv(&[(cfg, &kpi)], &mut buf).expect("write");

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().expect("headers");
        assert_eq!(headers.len(), 10);
        assert_eq!(&headers[0], "station");
        assert_eq!(&headers[9], "success_rate");
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        let kpi = sample();
        let cfg = Configuration::new(StationType::TwoClustered, BatteryType::ThreeBpMix);
        let mut buf = Vec::new();
        write_kpi_csv(&[(cfg, &kpi)], &mut buf).expect("write");

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let row = rdr.records().next().expect("one row").expect("parses");
        assert_eq!(&row[0], "2 Clustered Stations (30 docks, 29 batteries)");
        assert_eq!(&row[1], "3 BP Mix");
        assert_eq!(&row[2], "154");
        assert_eq!(&row[4], "16.0");
    }

    #[test]
    fn one_line_per_configuration() {
        let kpi = sample();
        let rows: Vec<(Configuration, &KpiResult)> =
            Configuration::all().map(|c| (c, &kpi)).collect();
        let mut buf = Vec::new();
        write_kpi_csv(&rows, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(text.lines().count(), 21);
    }
}
