//! Result assembly shared by the CLI, TUI and API surfaces.

use thiserror::Error;

use crate::analysis::{KpiResult, RecordSet, ReferenceTables, derive_with};
use crate::assets::{ArtifactPaths, ArtifactStatus, DataLayout};
use crate::catalog::Configuration;
use crate::config::DashboardConfig;
use crate::io::{LoadError, load_log};
use crate::report;
use crate::session::ProgressPlan;

/// One or more artifact folders are absent from the data root; no results
/// are shown until they exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing folders: {}", .missing.join(", "))]
pub struct MissingFolders {
    /// Folder names in display order.
    pub missing: Vec<String>,
    /// Folder tree the data root should have.
    pub expected_tree: String,
}

impl MissingFolders {
    /// Full message with the expected folder structure.
    pub fn report(&self) -> String {
        let names: Vec<&str> = self.missing.iter().map(String::as_str).collect();
        report::missing_folders(&names, &self.expected_tree)
    }
}

/// Everything shown once a configuration's simulation has "run".
#[derive(Debug)]
pub struct RunResults {
    pub config: Configuration,
    pub paths: ArtifactPaths,
    pub status: ArtifactStatus,
    /// The loaded log, or the reason it could not be loaded.
    pub records: Result<RecordSet, LoadError>,
    /// Present only when the log loaded.
    pub kpi: Option<KpiResult>,
}

/// Settings, folder layout and reference tables for one data root.
#[derive(Debug, Clone)]
pub struct Dashboard {
    settings: DashboardConfig,
    layout: DataLayout,
    tables: ReferenceTables,
}

impl Dashboard {
    pub fn new(settings: DashboardConfig) -> Self {
        let layout = DataLayout::from_config(&settings.data);
        let tables = if settings.kpi.use_reference_tables {
            ReferenceTables::verified()
        } else {
            log::info!("reference tables disabled, customer counts come from log data");
            ReferenceTables::empty()
        };
        Self {
            settings,
            layout,
            tables,
        }
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn preview_rows(&self) -> usize {
        self.settings.display.preview_rows
    }

    /// Verifies that all three artifact folders exist.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFolders`] naming every absent folder.
    pub fn check_folders(&self) -> Result<(), MissingFolders> {
        let missing = self.layout.missing_folders();
        if missing.is_empty() {
            return Ok(());
        }
        for name in &missing {
            log::warn!("data folder missing: {name}");
        }
        Err(MissingFolders {
            missing: missing.into_iter().map(str::to_string).collect(),
            expected_tree: self.layout.expected_tree(),
        })
    }

    /// A fresh progress animation with newly drawn delays.
    pub fn progress_plan(&self) -> ProgressPlan {
        ProgressPlan::new(&self.settings.progress)
    }

    /// Loads the log for `config` and derives its KPIs.
    pub fn results(&self, config: Configuration) -> RunResults {
        let paths = self.layout.artifacts(config);
        let status = self.layout.status(config);
        if !status.all_ready() {
            log::info!("{config}: artifacts incomplete {status:?}");
        }
        let records = load_log(&paths.log_csv);
        let kpi = match &records {
            Ok(rs) => Some(derive_with(Some(rs), config, &self.tables)),
            Err(e) => {
                log::info!("{config}: {e}");
                None
            }
        };
        RunResults {
            config,
            paths,
            status,
            records,
            kpi,
        }
    }
}
