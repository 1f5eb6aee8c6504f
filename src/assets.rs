//! On-disk layout of the pre-computed logs and graph images.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{Configuration, graph_filename, log_filename};
use crate::config::DataConfig;

/// Resolved folder paths for one data root.
#[derive(Debug, Clone)]
pub struct DataLayout {
    logs: Folder,
    first_hour: Folder,
    customers: Folder,
}

#[derive(Debug, Clone)]
struct Folder {
    name: String,
    path: PathBuf,
}

impl Folder {
    fn new(root: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: root.join(name),
        }
    }
}

/// Paths of the three artifacts belonging to one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub log_csv: PathBuf,
    pub first_hour_graph: PathBuf,
    pub customers_graph: PathBuf,
}

/// Which artifacts of a configuration exist on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub log_csv: bool,
    pub first_hour_graph: bool,
    pub customers_graph: bool,
}

impl ArtifactStatus {
    /// Returns `true` when all three artifacts are present.
    pub fn all_ready(&self) -> bool {
        self.log_csv && self.first_hour_graph && self.customers_graph
    }
}

impl DataLayout {
    /// Builds the layout from the `[data]` settings section.
    pub fn from_config(data: &DataConfig) -> Self {
        Self {
            logs: Folder::new(&data.root, &data.logs_dir),
            first_hour: Folder::new(&data.root, &data.first_hour_dir),
            customers: Folder::new(&data.root, &data.customers_dir),
        }
    }

    /// Stock folder names beneath `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&DataConfig {
            root: root.into(),
            ..DataConfig::default()
        })
    }

    /// Names of the artifact folders that do not exist, in display order.
    pub fn missing_folders(&self) -> Vec<&str> {
        [&self.logs, &self.first_hour, &self.customers]
            .into_iter()
            .filter(|f| !f.path.is_dir())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Folder names in display order: logs, first-hour graphs, customer graphs.
    pub fn folder_names(&self) -> [&str; 3] {
        [
            self.logs.name.as_str(),
            self.first_hour.name.as_str(),
            self.customers.name.as_str(),
        ]
    }

    pub fn artifacts(&self, config: Configuration) -> ArtifactPaths {
        let graph = graph_filename(config);
        ArtifactPaths {
            log_csv: self.logs.path.join(log_filename(config)),
            first_hour_graph: self.first_hour.path.join(&graph),
            customers_graph: self.customers.path.join(&graph),
        }
    }

    /// Checks which artifacts of `config` exist. Touches the filesystem
    /// and logs nothing.
    pub fn status(&self, config: Configuration) -> ArtifactStatus {
        let paths = self.artifacts(config);
        ArtifactStatus {
            log_csv: paths.log_csv.is_file(),
            first_hour_graph: paths.first_hour_graph.is_file(),
            customers_graph: paths.customers_graph.is_file(),
        }
    }

    /// Expected folder tree, shown when folders are missing.
    pub fn expected_tree(&self) -> String {
        let [logs, first_hour, customers] = self.folder_names();
        format!(
            "Project Directory/\n├── {logs}/\n├── {first_hour}/\n└── {customers}/"
        )
    }
}
