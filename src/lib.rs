//! Battery swap station simulation dashboard.
//!
//! Looks up the pre-computed simulation log and graphs for a
//! station/battery configuration and derives summary KPIs from the log.

/// Log records, clock parsing, reference tables and KPI derivation.
pub mod analysis;
pub mod assets;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod io;
pub mod report;
pub mod session;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
