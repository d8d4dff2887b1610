//! Configuration Management
//!
//! Handles persistent configuration storage for dashdata.

use crate::resource::{PathTable, Resource};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Dashboard dev server used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dashboard server to fetch snapshots from
    #[serde(default)]
    pub base_url: Option<String>,
    /// Read snapshots from this directory instead of a server
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Per-resource path overrides, keyed by resource key
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dashdata").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective base URL (CLI > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get effective data directory (CLI > config). A base URL given on the
    /// command line wins over a configured directory.
    pub fn effective_data_dir(
        &self,
        cli_dir: Option<&Path>,
        cli_url: Option<&str>,
    ) -> Option<PathBuf> {
        if let Some(dir) = cli_dir {
            return Some(dir.to_path_buf());
        }
        if cli_url.is_some() {
            return None;
        }
        self.data_dir.clone()
    }

    /// Default path table with the configured overrides applied
    pub fn path_table(&self) -> PathTable {
        PathTable::default().with_overrides(&self.paths)
    }

    /// Set base URL and save. Clears any configured directory.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL '{}'", base_url))?;
        self.base_url = Some(base_url.to_string());
        self.data_dir = None;
        self.save()
    }

    /// Set data directory and save
    pub fn set_data_dir(&mut self, dir: &Path) -> Result<()> {
        self.data_dir = Some(dir.to_path_buf());
        self.save()
    }

    /// Override one resource path and save
    pub fn set_path(&mut self, resource: Resource, path: &str) -> Result<()> {
        self.paths.insert(resource.key().to_string(), path.to_string());
        self.save()
    }

    /// Drop a resource path override and save
    pub fn reset_path(&mut self, resource: Resource) -> Result<()> {
        self.paths.remove(resource.key());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_corrupt_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config {
            base_url: Some("http://dashboard.local:8080".to_string()),
            ..Config::default()
        };
        config
            .paths
            .insert("kpis".to_string(), "/output/kpi_snapshot.json".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_effective_base_url_precedence() {
        let config = Config {
            base_url: Some("http://configured".to_string()),
            ..Config::default()
        };
        assert_eq!(config.effective_base_url(Some("http://cli")), "http://cli");
        assert_eq!(config.effective_base_url(None), "http://configured");
        assert_eq!(Config::default().effective_base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cli_url_overrides_configured_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/var/dashboard")),
            ..Config::default()
        };
        assert_eq!(config.effective_data_dir(None, Some("http://cli")), None);
        assert_eq!(
            config.effective_data_dir(None, None),
            Some(PathBuf::from("/var/dashboard"))
        );
        assert_eq!(
            config.effective_data_dir(Some(Path::new("/tmp/out")), None),
            Some(PathBuf::from("/tmp/out"))
        );
    }

    #[test]
    fn test_path_table_applies_overrides() {
        let mut config = Config::default();
        config
            .paths
            .insert("denial-trends".to_string(), "/output/denial_trends.json".to_string());

        let table = config.path_table();
        assert_eq!(table.path(Resource::DenialTrends), "/output/denial_trends.json");
        assert_eq!(table.path(Resource::Kpis), Resource::Kpis.default_path());
    }
}
