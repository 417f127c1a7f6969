//! Run configuration: input/output locations and report labels.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Paths and labels for one run. Loaded from an optional TOML file; any field
/// left out keeps its default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RO line-item export
    pub ro_file_path: PathBuf,
    /// Weekday contribution table
    pub working_days_file: PathBuf,
    /// Directory the report is written into
    pub report_dir: PathBuf,
    pub file_name_prefix: String,
    /// First banner line of the CSV
    pub organization: String,
    /// Who the report is prepared for, shown in the title line
    pub audience: String,
    /// Rows shown in the console preview
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ro_file_path: PathBuf::from("ROLineItems_File.csv"),
            working_days_file: PathBuf::from("working_days.csv"),
            report_dir: PathBuf::from("."),
            file_name_prefix: "Fixed_Ops_Overview_by_".to_string(),
            organization: "FrogData".to_string(),
            audience: "Demo".to_string(),
            preview_rows: 5,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "report_dir = \"out\"\naudience = \"Service Managers\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.report_dir, PathBuf::from("out"));
        assert_eq!(config.audience, "Service Managers");
        assert_eq!(config.ro_file_path, PathBuf::from("ROLineItems_File.csv"));
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn unreadable_or_invalid_file_is_an_error() {
        assert!(Config::load(Path::new("/nonexistent/fixed_ops.toml")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "preview_rows = \"many\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
