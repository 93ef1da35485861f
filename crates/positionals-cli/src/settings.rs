//! Config file handling.
//!
//! Values are resolved in order: command-line flags, then the TOML config
//! file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use positionals::{CACHE_FILE, ColumnSchema, ManagerConfig};
use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub source_url: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub columns: Option<ColumnSchema>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("positionals").join("config.toml"))
}

pub fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("positionals").join(CACHE_FILE))
}

/// Load settings from `path`.
///
/// An explicitly named file must exist; the default location may be absent.
pub fn load(path: Option<&Path>) -> Result<FileSettings> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(FileSettings::default()),
        },
    };

    if !explicit && !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(FileSettings::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings: FileSettings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(settings)
}

/// Merge flags over file settings into a manager config
pub fn resolve(cli: &Cli, file: FileSettings) -> ManagerConfig {
    let mut builder = ManagerConfig::builder();

    if let Some(url) = cli.url.clone().or(file.source_url) {
        builder = builder.source_url(url);
    }
    if let Some(path) = cli
        .cache
        .clone()
        .or(file.cache_path)
        .or_else(default_cache_path)
    {
        builder = builder.cache_path(path);
    }
    if let Some(secs) = cli.timeout.or(file.timeout_secs) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(columns) = file.columns {
        builder = builder.columns(columns);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
source_url = "https://example.com/sheet.csv"
cache_path = "/var/cache/positionals.csv"
timeout_secs = 3

[columns]
id = "ActionId"
"#,
        )
        .unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(
            settings.source_url.as_deref(),
            Some("https://example.com/sheet.csv")
        );
        assert_eq!(settings.timeout_secs, Some(3));

        let columns = settings.columns.unwrap();
        assert_eq!(columns.id, "ActionId");
        // Unspecified columns keep their defaults
        assert_eq!(columns.is_hit, "IsHit");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_unknown_key_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sauce_url = \"x\"\n").unwrap();
        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let cli = Cli::parse_from([
            "positionals",
            "--cache",
            "/tmp/flag.csv",
            "--timeout",
            "7",
            "status",
        ]);
        let file = FileSettings {
            source_url: Some("https://example.com/file.csv".to_string()),
            cache_path: Some(PathBuf::from("/tmp/file.csv")),
            timeout_secs: Some(30),
            columns: None,
        };

        let config = resolve(&cli, file);
        assert_eq!(config.source_url, "https://example.com/file.csv");
        assert_eq!(config.cache_path, PathBuf::from("/tmp/flag.csv"));
        assert_eq!(config.timeout, Duration::from_secs(7));
    }
}
