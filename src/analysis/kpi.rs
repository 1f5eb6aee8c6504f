//! KPI derivation from a loaded simulation log.
//!
//! Derivation never fails. Reference tables are consulted first; anything
//! missing or unparsable in the log degrades to a fixed default.

use std::fmt;

use serde::Serialize;

use super::clock;
use super::records::RecordSet;
use super::reference::ReferenceTables;
use crate::catalog::{BatteryType, Configuration, StationType};

/// Column holding the clock time of each log row.
pub const TIME_COLUMN: &str = "Time";
/// Column holding the number of battery packs left in the station.
pub const BP_COUNT_COLUMN: &str = "BP Count";
/// Column holding the issued battery token, or [`NO_BATTERY`].
pub const BATTERIES_TAKEN_COLUMN: &str = "Batteries Taken";
/// Substring identifying the cumulative customer column.
pub const CUSTOMER_COLUMN_HINT: &str = "customers";
/// `Batteries Taken` value for a visit that left without a battery.
pub const NO_BATTERY: &str = "-";
/// Prefix of time values in the first operating hour.
pub const FIRST_HOUR_PREFIX: &str = "7:";

const DEFAULT_INITIAL_BATTERIES: f64 = 14.0;
const DEFAULT_MIN_BATTERIES: f64 = 0.0;
const DEFAULT_AVG_BATTERIES: f64 = 7.0;
const DEFAULT_DURATION_HOURS: f64 = 16.0;
const DEFAULT_SERVICE_INTERVAL_MIN: f64 = 6.0;
const DEFAULT_UTILIZATION_PCT: f64 = 85.0;
const DEFAULT_SUCCESS_RATE_PCT: f64 = 98.5;
/// Share of all customers assumed to arrive in the busiest hour.
const PEAK_HOUR_SHARE: f64 = 0.15;
/// Operating hours the first-hour fallback divides the row count by.
const OPERATING_HOURS: usize = 16;

/// Summary metrics for one configuration's simulation run.
///
/// Count fields are whole numbers; the rest are rounded to one decimal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiResult {
    /// Customers served over the whole run.
    pub total_customers: u32,
    /// Mean battery packs on hand.
    pub avg_battery_count: f64,
    /// Customers served between 7:00 and 8:00.
    pub first_hour_customers: u32,
    /// Share of the initial packs drawn down at the low point (%).
    pub battery_utilization: f64,
    /// Estimated customers in the busiest hour.
    pub peak_hour_customers: u32,
    /// Minutes between served customers.
    pub avg_service_interval: f64,
    /// Share of visits that left with a battery (%).
    pub success_rate: f64,
    /// Simulated time span (hours).
    pub simulation_duration: f64,
}

/// Derives KPIs using the verified reference tables.
///
/// # Examples
///
/// ```
/// use swapdash::analysis::kpi::derive;
/// use swapdash::catalog::{BatteryType, StationType};
///
/// let kpi = derive(None, StationType::OneIndependent, BatteryType::OneBp);
/// assert_eq!(kpi.total_customers, 0);
/// ```
pub fn derive(
    records: Option<&RecordSet>,
    station: StationType,
    battery: BatteryType,
) -> KpiResult {
    derive_with(
        records,
        Configuration::new(station, battery),
        &ReferenceTables::verified(),
    )
}

/// Derives KPIs against an explicit set of reference tables.
///
/// # Arguments
///
/// * `records` - Loaded simulation log, or `None` when nothing was loaded
/// * `config` - Configuration the log belongs to
/// * `tables` - Reference values that override computed customer counts
///
/// # Returns
///
/// A fully populated [`KpiResult`]; all zero when `records` is absent or empty.
pub fn derive_with(
    records: Option<&RecordSet>,
    config: Configuration,
    tables: &ReferenceTables,
) -> KpiResult {
    let Some(records) = records.filter(|r| !r.is_empty()) else {
        log::debug!("kpi {config}: no records, returning zero result");
        return KpiResult::default();
    };

    let customer_col = records
        .find_column_containing(CUSTOMER_COLUMN_HINT)
        .or_else(|| records.last_column());
    let time_col = records.column_index(TIME_COLUMN);

    let total = total_customers(records, customer_col, config, tables);
    let first_hour = first_hour_customers(records, customer_col, time_col, config, tables);
    let batteries = BatteryStats::from_records(records);
    let (duration, interval) = duration_and_interval(records, time_col, total);

    let peak_hour = ((total * PEAK_HOUR_SHARE).floor() as u32).max(1);

    let utilization = match batteries.initial {
        Some(initial) if initial > 0.0 => (initial - batteries.min) / initial * 100.0,
        _ => {
            log::debug!("kpi {config}: no positive initial pack count, utilization default");
            DEFAULT_UTILIZATION_PCT
        }
    };

    let success_rate = success_rate(records, total).unwrap_or_else(|| {
        log::debug!("kpi {config}: success rate default");
        DEFAULT_SUCCESS_RATE_PCT
    });

    let result = KpiResult {
        total_customers: total as u32,
        avg_battery_count: round1(batteries.avg),
        first_hour_customers: first_hour,
        battery_utilization: round1(utilization),
        peak_hour_customers: peak_hour,
        avg_service_interval: round1(interval),
        success_rate: round1(success_rate),
        simulation_duration: round1(duration),
    };
    log::debug!("kpi {config}: {result:?}");
    result
}

fn total_customers(
    records: &RecordSet,
    customer_col: Option<usize>,
    config: Configuration,
    tables: &ReferenceTables,
) -> f64 {
    if let Some(total) = tables.total_customers(config) {
        return f64::from(total);
    }
    log::debug!("kpi {config}: no reference total, computing from log");
    customer_col
        .map(|col| records.numeric_column(col))
        .and_then(|values| values.into_iter().reduce(f64::max))
        .unwrap_or(records.len() as f64)
}

fn first_hour_customers(
    records: &RecordSet,
    customer_col: Option<usize>,
    time_col: Option<usize>,
    config: Configuration,
    tables: &ReferenceTables,
) -> u32 {
    if let Some(count) = tables.first_hour_customers(config) {
        return count;
    }
    log::debug!("kpi {config}: no reference first-hour count, computing from log");
    first_hour_span(records, customer_col, time_col).unwrap_or_else(|| {
        log::debug!("kpi {config}: first-hour window unusable, estimating from row count");
        (records.len() / OPERATING_HOURS) as u32
    })
}

/// Customers gained across the rows stamped `7:xx:xx`.
fn first_hour_span(
    records: &RecordSet,
    customer_col: Option<usize>,
    time_col: Option<usize>,
) -> Option<u32> {
    let (customer_col, time_col) = (customer_col?, time_col?);
    let values: Vec<f64> = (0..records.len())
        .filter(|&row| {
            records
                .cell(row, time_col)
                .is_some_and(|t| t.starts_with(FIRST_HOUR_PREFIX))
        })
        .filter_map(|row| records.numeric_cell(row, customer_col))
        .collect();
    let max = values.iter().copied().reduce(f64::max)?;
    let min = values.iter().copied().reduce(f64::min)?;
    Some((max - min).max(0.0) as u32)
}

/// Battery pack figures from the `BP Count` column.
struct BatteryStats {
    /// Count on the first row; `None` when that cell is not a number.
    initial: Option<f64>,
    min: f64,
    avg: f64,
}

impl BatteryStats {
    fn from_records(records: &RecordSet) -> Self {
        let column = records.column_index(BP_COUNT_COLUMN);
        let values = column.map(|col| records.numeric_column(col)).unwrap_or_default();
        match column {
            Some(col) if !values.is_empty() => Self {
                initial: records.numeric_cell(0, col),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                avg: values.iter().sum::<f64>() / values.len() as f64,
            },
            _ => {
                log::debug!("kpi: no usable {BP_COUNT_COLUMN} column, pack defaults");
                Self {
                    initial: Some(DEFAULT_INITIAL_BATTERIES),
                    min: DEFAULT_MIN_BATTERIES,
                    avg: DEFAULT_AVG_BATTERIES,
                }
            }
        }
    }
}

/// Simulated span in hours and minutes per customer.
fn duration_and_interval(records: &RecordSet, time_col: Option<usize>, total: f64) -> (f64, f64) {
    let elapsed = time_col.filter(|_| records.len() > 1).and_then(|col| {
        let start = clock::minutes_of_day(records.cell(0, col)?)?;
        let end = clock::minutes_of_day(records.cell(records.len() - 1, col)?)?;
        Some(clock::elapsed_minutes(start, end))
    });

    let Some(elapsed) = elapsed else {
        log::debug!("kpi: run span unavailable, duration and interval defaults");
        return (DEFAULT_DURATION_HOURS, DEFAULT_SERVICE_INTERVAL_MIN);
    };

    let interval = if total > 0.0 {
        elapsed / total
    } else {
        DEFAULT_SERVICE_INTERVAL_MIN
    };
    (elapsed / 60.0, interval)
}

/// Rows that issued a battery, as a share of all customers served.
fn success_rate(records: &RecordSet, total: f64) -> Option<f64> {
    let col = records.column_index(BATTERIES_TAKEN_COLUMN)?;
    if total <= 0.0 {
        return None;
    }
    let served = records.column(col).filter(|v| *v != Some(NO_BATTERY)).count();
    Some(served as f64 / total * 100.0)
}

/// Rounds to one decimal from the exact decimal value, ties to even.
///
/// `{:.1}` rounds the exact binary value, so `0.15` (stored just below
/// 0.15) becomes `0.1` and an exact tie such as `7.25` becomes `7.2`.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

impl fmt::Display for KpiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Total customers:       {}", self.total_customers)?;
        writeln!(f, "First hour served:     {}", self.first_hour_customers)?;
        writeln!(f, "Simulation duration:   {:.1} hrs", self.simulation_duration)?;
        writeln!(f, "Peak hour (est.):      {}", self.peak_hour_customers)?;
        writeln!(f, "Avg service interval:  {:.1} min", self.avg_service_interval)?;
        writeln!(f, "Avg battery count:     {:.1}", self.avg_battery_count)?;
        writeln!(f, "Battery utilization:   {:.1}%", self.battery_utilization)?;
        write!(f, "Success rate:          {:.1}%", self.success_rate)
    }
}
