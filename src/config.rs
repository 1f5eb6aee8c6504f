//! TOML-based dashboard settings.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level dashboard settings parsed from TOML.
///
/// All fields have defaults matching the stock folder layout next to the
/// binary's working directory. Load from TOML with
/// [`DashboardConfig::from_toml_file`] or use [`DashboardConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Data root and folder names.
    #[serde(default)]
    pub data: DataConfig,
    /// Fake progress animation timing.
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Data table display options.
    #[serde(default)]
    pub display: DisplayConfig,
    /// KPI derivation options.
    #[serde(default)]
    pub kpi: KpiConfig,
}

/// Data root and the three artifact folders beneath it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory containing the artifact folders.
    pub root: PathBuf,
    /// Folder of simulation log CSVs.
    pub logs_dir: String,
    /// Folder of first-hour analysis graphs.
    pub first_hour_dir: String,
    /// Folder of total-customers-served graphs.
    pub customers_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            logs_dir: "Battery Simulation Logs".to_string(),
            first_hour_dir: "First Hour Analysis (Graphs)".to_string(),
            customers_dir: "Total Customers Served (Graphs)".to_string(),
        }
    }
}

/// Fake progress animation timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressConfig {
    /// Shortest delay after an intermediate step (ms).
    pub step_delay_min_ms: u64,
    /// Longest delay after an intermediate step (ms).
    pub step_delay_max_ms: u64,
    /// Delay after the final step (ms).
    pub final_step_ms: u64,
    /// Pause on the "ready" message before results show (ms).
    pub ready_pause_ms: u64,
    /// Seed for the step delays; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step_delay_min_ms: 300,
            step_delay_max_ms: 800,
            final_step_ms: 500,
            ready_pause_ms: 500,
            seed: None,
        }
    }
}

/// Data table display options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Rows shown in preview mode.
    pub preview_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { preview_rows: 20 }
    }
}

/// KPI derivation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KpiConfig {
    /// Report hand-verified customer counts instead of computed ones.
    pub use_reference_tables: bool,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            use_reference_tables: true,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"progress.step_delay_min_ms"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl DashboardConfig {
    /// Parses settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the settings are valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let d = &self.data;
        for (field, value) in [
            ("data.logs_dir", &d.logs_dir),
            ("data.first_hour_dir", &d.first_hour_dir),
            ("data.customers_dir", &d.customers_dir),
        ] {
            if value.trim().is_empty() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must not be empty".into(),
                });
            }
        }

        let p = &self.progress;
        if p.step_delay_min_ms > p.step_delay_max_ms {
            errors.push(ConfigError {
                field: "progress.step_delay_min_ms".into(),
                message: "must be <= progress.step_delay_max_ms".into(),
            });
        }

        if self.display.preview_rows == 0 {
            errors.push(ConfigError {
                field: "display.preview_rows".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = DashboardConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(cfg.display.preview_rows, 20);
        assert!(cfg.kpi.use_reference_tables);
        assert_eq!(cfg.data.logs_dir, "Battery Simulation Logs");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[data]
root = "/srv/swap"
logs_dir = "logs"
first_hour_dir = "fha"
customers_dir = "tcs"

[progress]
step_delay_min_ms = 10
step_delay_max_ms = 20
final_step_ms = 5
ready_pause_ms = 0
seed = 7

[display]
preview_rows = 50

[kpi]
use_reference_tables = false
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.data.root.clone()),
            Some(PathBuf::from("/srv/swap"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.progress.seed), Some(Some(7)));
        assert_eq!(cfg.as_ref().map(|c| c.display.preview_rows), Some(50));
        assert_eq!(cfg.as_ref().map(|c| c.kpi.use_reference_tables), Some(false));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[display]
preview_rows = 5
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.display.preview_rows), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.progress.step_delay_max_ms), Some(800));
        assert_eq!(cfg.as_ref().and_then(|c| c.progress.seed), None);
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[display]
preview_rows = 5
height = 400
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_inverted_delays() {
        let mut cfg = DashboardConfig::default();
        cfg.progress.step_delay_min_ms = 900;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "progress.step_delay_min_ms"));
    }

    #[test]
    fn validation_catches_zero_preview_rows() {
        let mut cfg = DashboardConfig::default();
        cfg.display.preview_rows = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "display.preview_rows"));
    }

    #[test]
    fn validation_catches_blank_folder() {
        let mut cfg = DashboardConfig::default();
        cfg.data.customers_dir = "  ".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "data.customers_dir"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::from_toml_file(Path::new("/nonexistent/swapdash.toml"))
            .unwrap_err();
        assert_eq!(err.field, "config");
        assert!(err.message.contains("swapdash.toml"));
    }
}
