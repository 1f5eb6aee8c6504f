//! Static catalog of station/battery configurations and their data files.

pub mod files;
pub mod types;

pub use files::{graph_filename, log_filename};
pub use types::{BatteryType, Configuration, StationType, Topology};
