//! Filename tables for the per-configuration data artifacts.

use super::types::{BatteryType, Configuration, StationType, Topology};

/// Returns the simulation log CSV filename for a configuration.
///
/// The names on disk are not uniform (mixed packs are `MIX 3 BP`), so the
/// table is spelled out rather than formatted.
pub fn log_filename(config: Configuration) -> &'static str {
    use BatteryType::{OneBp, ThreeBp, ThreeBpMix, TwoBp};
    use StationType::{
        OneIndependent, ThreeClustered, ThreeIndependent, TwoClustered, TwoIndependent,
    };

    match (config.station, config.battery) {
        (OneIndependent, OneBp) => "Battery Simulation Logs - 1 INT - 1 BP.csv",
        (OneIndependent, TwoBp) => "Battery Simulation Logs - 1 INT - 2 BP.csv",
        (OneIndependent, ThreeBp) => "Battery Simulation Logs - 1 INT - 3 BP.csv",
        (OneIndependent, ThreeBpMix) => "Battery Simulation Logs - 1 INT - MIX 3 BP.csv",
        (TwoIndependent, OneBp) => "Battery Simulation Logs - 2 INT - 1 BP.csv",
        (TwoIndependent, TwoBp) => "Battery Simulation Logs - 2 INT - 2 BP.csv",
        (TwoIndependent, ThreeBp) => "Battery Simulation Logs - 2 INT - 3 BP.csv",
        (TwoIndependent, ThreeBpMix) => "Battery Simulation Logs - 2 INT - MIX 3 BP.csv",
        (ThreeIndependent, OneBp) => "Battery Simulation Logs - 3 INT - 1 BP.csv",
        (ThreeIndependent, TwoBp) => "Battery Simulation Logs - 3 INT - 2 BP.csv",
        (ThreeIndependent, ThreeBp) => "Battery Simulation Logs - 3 INT - 3 BP.csv",
        (ThreeIndependent, ThreeBpMix) => "Battery Simulation Logs - 3 INT - MIX 3 BP.csv",
        (TwoClustered, OneBp) => "Battery Simulation Logs - 2 CLU - 1 BP.csv",
        (TwoClustered, TwoBp) => "Battery Simulation Logs - 2 CLU - 2 BP.csv",
        (TwoClustered, ThreeBp) => "Battery Simulation Logs - 2 CLU - 3 BP.csv",
        (TwoClustered, ThreeBpMix) => "Battery Simulation Logs - 2 CLU - MIX 3 BP.csv",
        (ThreeClustered, OneBp) => "Battery Simulation Logs - 3 CLU - 1 BP.csv",
        (ThreeClustered, TwoBp) => "Battery Simulation Logs - 3 CLU - 2 BP.csv",
        (ThreeClustered, ThreeBp) => "Battery Simulation Logs - 3 CLU - 3 BP.csv",
        (ThreeClustered, ThreeBpMix) => "Battery Simulation Logs - 3 CLU - MIX 3 BP.csv",
    }
}

/// Returns the graph image filename for a configuration.
///
/// Both graph folders use the same name, e.g.
/// `"2 Clustered Stations (3 BP Mix).png"`. The battery label is kept as-is.
pub fn graph_filename(config: Configuration) -> String {
    let n = config.station.station_count();
    let station_name = match config.station.topology() {
        Topology::Independent if n == 1 => "1 Independent Station".to_string(),
        Topology::Independent => format!("{n} Independent Stations"),
        Topology::Clustered => format!("{n} Clustered Stations"),
    };
    format!("{station_name} ({}).png", config.battery.label())
}
