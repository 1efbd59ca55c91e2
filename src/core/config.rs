//! Configuration management

use crate::core::error::{Error, Result};
use crate::output::OutputFormat;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scan: ScanConfig,
    pub types: TypesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Keywords searched for in field names, in reporting priority order
    pub keywords: Vec<String>,
    /// Default output format
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extensions (without the dot)
    pub extensions: Vec<String>,
    /// Files whose name contains this marker are test artifacts
    pub test_marker: String,
    /// Skip test artifacts during discovery and type resolution
    pub exclude_tests: bool,
    /// Maximum file size to consider (bytes)
    pub max_file_size: u64,
    /// Worker threads used to classify candidate files
    pub workers: usize,
    /// Respect .gitignore files while walking
    pub respect_gitignore: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Type names never descended into (primitives, boxed types, String)
    pub primitives: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "ultimateEci".to_string(),
                "parentEci".to_string(),
                "hierarchy".to_string(),
            ],
            format: OutputFormat::Human,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            test_marker: "Test".to_string(),
            exclude_tests: true,
            max_file_size: MAX_FILE_SIZE,
            workers: DEFAULT_WORKERS,
            respect_gitignore: true,
        }
    }
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            primitives: [
                "boolean", "byte", "short", "char", "int", "long", "float", "double", "Integer",
                "Boolean", "String", "Long", "Short", "Byte", "Character", "Float", "Double",
                "Object",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit file (must exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.scan.workers == 0 {
            return Err(Error::ConfigError {
                message: "scan.workers must be at least 1".to_string(),
            });
        }
        if self.scan.extensions.is_empty() {
            return Err(Error::ConfigError {
                message: "scan.extensions must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::fieldtrace_home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the fieldtrace home directory
    pub fn fieldtrace_home() -> Result<PathBuf> {
        // Check FIELDTRACE_HOME env var first
        if let Ok(home) = std::env::var("FIELDTRACE_HOME") {
            return Ok(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "fieldtrace", "fieldtrace")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine fieldtrace home directory".to_string(),
            })
    }
}

pub const MAX_FILE_SIZE: u64 = 1_048_576; // 1MB
pub const DEFAULT_WORKERS: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.general.keywords,
            vec!["ultimateEci", "parentEci", "hierarchy"]
        );
        assert_eq!(config.scan.extensions, vec!["java"]);
        assert_eq!(config.scan.workers, 10);
        assert!(config.types.primitives.iter().any(|p| p == "String"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[general]
keywords = ["tenant"]

[scan]
workers = 4
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.keywords, vec!["tenant"]);
        assert_eq!(config.scan.workers, 4);
        assert_eq!(config.scan.test_marker, "Test");
        assert_eq!(config.general.format, OutputFormat::Human);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[scan]\nworkers = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let rendered = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.general.keywords, Config::default().general.keywords);
    }
}
