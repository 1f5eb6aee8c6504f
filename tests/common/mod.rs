//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use swapdash::catalog::Configuration;
use swapdash::config::{DashboardConfig, ProgressConfig};
use swapdash::dashboard::Dashboard;
use tempfile::TempDir;

/// Log with all four columns, 7:00 to 23:00, 41 customers.
pub const SAMPLE_LOG: &str = "\
Time,BP Count,Batteries Taken,Customers Served
7:00:00,14,B1,1
7:30:00,12,B2,5
8:00:00,10,-,9
9:00:00,8,B3,20
23:00:00,4,B4,41
";

/// A temporary data root holding the three artifact folders.
pub struct DataRoot {
    pub dir: TempDir,
}

impl DataRoot {
    /// Creates the root with all three folders, empty.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Self { dir };
        let settings = root.settings(true);
        for name in [
            &settings.data.logs_dir,
            &settings.data.first_hour_dir,
            &settings.data.customers_dir,
        ] {
            fs::create_dir_all(root.path().join(name)).expect("create folder");
        }
        root
    }

    /// Creates the root with no folders at all.
    pub fn bare() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default settings pointed at this root, with an instant progress plan.
    pub fn settings(&self, use_reference_tables: bool) -> DashboardConfig {
        let mut settings = DashboardConfig::default();
        settings.data.root = self.path().to_path_buf();
        settings.kpi.use_reference_tables = use_reference_tables;
        settings.progress = ProgressConfig {
            step_delay_min_ms: 0,
            step_delay_max_ms: 0,
            final_step_ms: 0,
            ready_pause_ms: 0,
            seed: Some(42),
        };
        settings
    }

    pub fn dashboard(&self, use_reference_tables: bool) -> Dashboard {
        Dashboard::new(self.settings(use_reference_tables))
    }

    /// Writes raw bytes as the log of `config`.
    pub fn write_log(&self, config: Configuration, contents: &[u8]) {
        let path = self.dashboard(true).layout().artifacts(config).log_csv;
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write log");
    }

    /// Writes placeholder images for both graphs of `config`.
    pub fn write_graphs(&self, config: Configuration) {
        let paths = self.dashboard(true).layout().artifacts(config);
        for path in [paths.first_hour_graph, paths.customers_graph] {
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(path, b"\x89PNG").expect("write graph");
        }
    }
}
