//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! discovered files with proper precedence rules. File values sit below
//! CLI flags and above built-in defaults.

use crate::catalog;
use crate::error::DomainReconError;
use crate::types::LookupConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from TOML files.
///
/// ```toml
/// [defaults]
/// timeout_ms = 2500
/// delay_ms = 800
///
/// [catalog]
/// tlds = [".com", ".dev"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for lookup options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Custom TLD catalog for variant expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,
}

/// Default lookup values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// DNS lookup timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Pacing delay between queries in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

/// Custom TLD catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TLDs to expand variants against (normalized before use)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainReconError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainReconError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainReconError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            DomainReconError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Later files override earlier ones: XDG config, then the home
    /// directory, then the current directory.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainReconError> {
        let mut merged = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. XDG config (lowest precedence)
        if let Some(xdg_path) = self.xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged = merge_configs(merged, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Home directory config
        if let Some(home_path) = self.home_config_path() {
            if let Ok(config) = self.load_file(&home_path) {
                merged = merge_configs(merged, config);
                loaded_files.push(home_path);
            }
        }

        // 3. Local config (highest precedence)
        if let Some(local_path) = self.local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged = merge_configs(merged, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found; later files take precedence:");
            for path in &loaded_files {
                eprintln!("   {}", path.display());
            }
        }

        Ok(merged)
    }

    /// Configuration file candidates in the current directory.
    fn local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-recon.toml", "./.domain-recon.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Configuration file candidates in the user's home directory.
    fn home_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".domain-recon.toml", "domain-recon.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// XDG configuration file candidate.
    fn xdg_config_path(&self) -> Option<PathBuf> {
        let base = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg)
        } else if let Some(home) = env::var_os("HOME") {
            Path::new(&home).join(".config")
        } else {
            return None;
        };

        let path = base.join("domain-recon").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}

/// Merge two file configs; fields set in `overlay` win.
pub fn merge_configs(base: FileConfig, overlay: FileConfig) -> FileConfig {
    let defaults = match (base.defaults, overlay.defaults) {
        (Some(base_d), Some(over_d)) => Some(DefaultsConfig {
            timeout_ms: over_d.timeout_ms.or(base_d.timeout_ms),
            delay_ms: over_d.delay_ms.or(base_d.delay_ms),
        }),
        (base_d, over_d) => over_d.or(base_d),
    };

    let catalog = match (base.catalog, overlay.catalog) {
        (Some(base_c), Some(over_c)) => Some(CatalogConfig {
            tlds: over_c.tlds.or(base_c.tlds),
        }),
        (base_c, over_c) => over_c.or(base_c),
    };

    FileConfig { defaults, catalog }
}

/// Apply a file config on top of a lookup config.
///
/// Only fields the file actually sets are overridden; everything else keeps
/// its current value, so CLI flags applied afterwards still win.
pub fn apply_file_config(mut config: LookupConfig, file_config: &FileConfig) -> LookupConfig {
    if let Some(defaults) = &file_config.defaults {
        if let Some(timeout_ms) = defaults.timeout_ms {
            config.dns_timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(delay_ms) = defaults.delay_ms {
            config.pacing_delay = Duration::from_millis(delay_ms);
        }
    }

    if let Some(catalog_config) = &file_config.catalog {
        if let Some(tlds) = &catalog_config.tlds {
            config.tlds = Some(catalog::normalize_catalog(tlds));
        }
    }

    config
}
