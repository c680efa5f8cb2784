//! Configuration for module scanning and categorization.
//!
//! Every section carries `#[serde(default)]`, so a TOML file only needs the
//! keys it wants to change:
//!
//! ```toml
//! [scan]
//! extensions = ["swift"]
//! exclude_dirs = [".build", "Pods"]
//!
//! [categories]
//! main_application = ["AirAsFramework", "UIHome"]
//! core_foundation = ["WalletCore", "WalletContext"]
//! ui_prefix = "UI"
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::CategoryRules;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidValue(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How modules and their source files are discovered
    pub scan: ScanSettings,
    /// Rules used to label modules
    pub categories: CategoryRules,
}

impl Config {
    /// Loads a configuration file from disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every scan come back empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::InvalidValue(
                "scan.extensions must name at least one extension".to_string(),
            ));
        }
        if self.scan.extensions.iter().any(|e| e.trim().trim_start_matches('.').is_empty()) {
            return Err(ConfigError::InvalidValue(
                "scan.extensions contains an empty entry".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for module discovery and source file collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions (without the leading dot) treated as source files
    pub extensions: BTreeSet<String>,
    /// Directory names skipped while walking a module
    pub exclude_dirs: BTreeSet<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: ["swift"].iter().map(|s| s.to_string()).collect(),
            exclude_dirs: [".build", ".git", "DerivedData", "Pods"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ScanSettings {
    /// Returns true if `path` has one of the configured source extensions.
    ///
    /// Matching ignores ASCII case and a leading dot in the configured value.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Returns true if a directory with this name should not be walked.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_default_scan_settings() {
        let scan = ScanSettings::default();
        assert!(scan.is_source_file(Path::new("UIHome/HomeVC.swift")));
        assert!(scan.is_source_file(Path::new("UIHome/Legacy.SWIFT")));
        assert!(!scan.is_source_file(Path::new("UIHome/Info.plist")));
        assert!(!scan.is_source_file(Path::new("UIHome/Makefile")));
        assert!(scan.is_excluded_dir(".build"));
        assert!(!scan.is_excluded_dir("Sources"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [categories]
            ui_prefix = "Feature"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan, ScanSettings::default());
        assert_eq!(config.categories.ui_prefix, "Feature");
        assert!(config.categories.core_foundation.contains("WalletCore"));
    }

    #[test]
    fn test_toml_overrides_category_sets() {
        let config = Config::from_toml_str(
            r#"
            [scan]
            extensions = ["kt", ".java"]

            [categories]
            main_application = ["App"]
            core_foundation = ["Core"]
            "#,
        )
        .unwrap();

        assert!(config.scan.is_source_file(Path::new("a/Main.kt")));
        assert!(config.scan.is_source_file(Path::new("a/Main.java")));
        assert_eq!(config.categories.categorize("App"), Category::MainApplication);
        assert_eq!(config.categories.categorize("Core"), Category::CoreFoundation);
        assert_eq!(
            config.categories.categorize("WalletCore"),
            Category::Infrastructure
        );
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let err = Config::from_toml_str("[scan]\nextensions = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Config::from_toml_str("[scan\nextensions = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modscope.toml");
        fs::write(&path, "[scan]\nexclude_dirs = [\"Generated\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.scan.is_excluded_dir("Generated"));
        assert!(!config.scan.is_excluded_dir(".build"));
    }
}
