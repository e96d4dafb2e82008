use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EtlError, Result};

/// Paths and table name for one pipeline run. Every stage receives this
/// explicitly; there are no process-wide path constants.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Raw employees CSV, produced externally.
    pub raw_path: PathBuf,
    /// Cleaned CSV written by the transform stage, read by the load stage.
    pub processed_path: PathBuf,
    /// SQLite database file holding the destination table.
    pub store_path: PathBuf,
    /// Destination table name.
    pub table_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("data/raw/employees.csv"),
            processed_path: PathBuf::from("data/processed/employees_cleaned.csv"),
            store_path: PathBuf::from("data/sqlite/employees.db"),
            table_name: "employees".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads `config.toml` from the working directory if present, otherwise
    /// falls back to the default paths under `data/`.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Path::new("config.toml");
        if config_path.exists() {
            Self::load(config_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
raw_path = "in/raw.csv"
processed_path = "out/clean.csv"
store_path = "out/store.db"
table_name = "staff"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.raw_path, PathBuf::from("in/raw.csv"));
        assert_eq!(config.processed_path, PathBuf::from("out/clean.csv"));
        assert_eq!(config.store_path, PathBuf::from("out/store.db"));
        assert_eq!(config.table_name, "staff");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = Config::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, EtlError::Config(_)));
    }
}
