//! Component configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Published CSV export of the positional sheet
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1z2skn_jokyj02Qv2GPEs6HSmAZVLiw2LbwQxkXPjiEs/gviz/tq?tqx=out:csv&sheet=main1";

/// Cache file name
pub const CACHE_FILE: &str = "positionals.csv";

/// Timeout for the whole fetch request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header names of the source table columns.
///
/// Matched case-insensitively, in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub id: String,
    pub action_name: String,
    pub action_position: String,
    pub percent: String,
    pub is_hit: String,
    /// Optional in the source; missing means every comment is empty
    pub comment: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            id: "Id".to_string(),
            action_name: "ActionName".to_string(),
            action_position: "ActionPosition".to_string(),
            percent: "Percent".to_string(),
            is_hit: "IsHit".to_string(),
            comment: "Comment".to_string(),
        }
    }
}

/// Configuration for the PositionalManager
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// URL of the remote table
    pub source_url: String,
    /// Local copy of the last fetched table
    pub cache_path: PathBuf,
    /// Global timeout for the fetch
    pub timeout: Duration,
    pub columns: ColumnSchema,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: PathBuf::from(CACHE_FILE),
            timeout: DEFAULT_TIMEOUT,
            columns: ColumnSchema::default(),
        }
    }
}

impl ManagerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::default()
    }
}

/// Builder for ManagerConfig
#[derive(Debug, Clone, Default)]
pub struct ManagerConfigBuilder {
    source_url: Option<String>,
    cache_path: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    columns: Option<ColumnSchema>,
}

impl ManagerConfigBuilder {
    /// Set the remote table URL
    pub fn source_url<S: Into<String>>(mut self, url: S) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Set the full cache file path
    pub fn cache_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Place the cache file (`positionals.csv`) in a host-provided directory.
    ///
    /// Ignored when `cache_path` is also set.
    pub fn cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn columns(mut self, columns: ColumnSchema) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ManagerConfig {
        let default = ManagerConfig::default();
        let cache_path = match (self.cache_path, self.cache_dir) {
            (Some(path), _) => path,
            (None, Some(dir)) => dir.join(CACHE_FILE),
            (None, None) => default.cache_path,
        };
        ManagerConfig {
            source_url: self.source_url.unwrap_or(default.source_url),
            cache_path,
            timeout: self.timeout.unwrap_or(default.timeout),
            columns: self.columns.unwrap_or(default.columns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ManagerConfig::builder().build();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.cache_path, PathBuf::from(CACHE_FILE));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.columns, ColumnSchema::default());
    }

    #[test]
    fn test_cache_dir_joins_file_name() {
        let config = ManagerConfig::builder().cache_dir("/opt/plugin").build();
        assert_eq!(config.cache_path, PathBuf::from("/opt/plugin/positionals.csv"));
    }

    #[test]
    fn test_cache_path_wins_over_dir() {
        let config = ManagerConfig::builder()
            .cache_dir("/opt/plugin")
            .cache_path("/tmp/p.csv")
            .timeout(Duration::from_secs(3))
            .build();
        assert_eq!(config.cache_path, PathBuf::from("/tmp/p.csv"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
