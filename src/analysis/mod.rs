//! Analysis of loaded simulation logs: record access, clock parsing, KPIs.

/// `H:MM:SS` parsing and elapsed-time arithmetic.
pub mod clock;
pub mod kpi;
pub mod records;
/// Hand-verified customer counts per configuration.
pub mod reference;

pub use kpi::{KpiResult, derive, derive_with};
pub use records::RecordSet;
pub use reference::ReferenceTables;
