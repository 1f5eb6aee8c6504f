//! File input/output: log loading and KPI export.

pub mod export;
pub mod loader;

pub use loader::{LoadError, load_log};
