//! Configuration for the opportunity MCP server
//!
//! Config is searched in order:
//! 1. explicit path (`--config` / `OPPORTUNITY_CONFIG_PATH`)
//! 2. `~/.leadboard/opportunity.toml`
//! 3. `./opportunity-mcp.toml`
//! 4. `opportunity-mcp/config.toml` under the platform config dir
//! 5. built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mcp_common::LogFormat;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which SQL service answers the store's statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local SQLite file
    #[default]
    Sqlite,
    /// Remote SQL execution endpoint
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: Backend,

    /// SQLite database path, `~` is expanded
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Endpoint accepting `POST {sql, params}`
    #[serde(default)]
    pub url: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Expose debug_db_run_sql. Never enable in production.
    #[serde(default)]
    pub allow_raw_sql: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Overrides `LOG_FORMAT` when set
    #[serde(default)]
    pub format: Option<LogFormat>,
}

fn default_db_path() -> String {
    "~/.leadboard/opportunities.db".to_string()
}

fn default_token_env() -> String {
    "OPPORTUNITY_SQL_TOKEN".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            path: default_db_path(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token_env: default_token_env(),
            timeout_secs: default_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// SQLite path with `~` resolved
    pub fn sqlite_path(&self) -> PathBuf {
        resolve_path(&self.path)
    }
}

impl HttpConfig {
    /// Bearer token read from `token_env`, if set and non-empty
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

impl LoggingConfig {
    pub fn resolved_format(&self) -> LogFormat {
        self.format.unwrap_or_else(LogFormat::from_env)
    }
}

impl Config {
    /// Load configuration, returning the file it came from if any
    ///
    /// An explicit path must exist. Discovered files that fail to parse are
    /// an error rather than silently falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }

        for path in Self::search_paths() {
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".leadboard").join("opportunity.toml"));
        }

        paths.push(PathBuf::from("opportunity-mcp.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("opportunity-mcp").join("config.toml"));
        }

        paths
    }
}

/// Resolve ~ to home directory
fn resolve_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.backend, Backend::Sqlite);
        assert_eq!(config.database.http.timeout_secs, 30);
        assert_eq!(config.database.http.token_env, "OPPORTUNITY_SQL_TOKEN");
        assert!(!config.debug.allow_raw_sql);
        assert!(config.logging.format.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.database.path, "~/.leadboard/opportunities.db");
    }

    #[test]
    fn test_full_toml() {
        let config = Config::from_toml(
            r#"
            [database]
            backend = "http"

            [database.http]
            url = "https://sql.example.com/run"
            token_env = "MY_TOKEN"
            timeout_secs = 5

            [debug]
            allow_raw_sql = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, Backend::Http);
        assert_eq!(config.database.http.url, "https://sql.example.com/run");
        assert_eq!(config.database.http.token_env, "MY_TOKEN");
        assert_eq!(config.database.http.timeout_secs, 5);
        assert!(config.debug.allow_raw_sql);
        assert_eq!(config.logging.resolved_format(), LogFormat::Json);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::from_toml("[database]\nbackend = \"postgres\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[debug]\nallow_raw_sql = true").unwrap();

        let (config, source) = Config::load(Some(file.path())).unwrap();
        assert!(config.debug.allow_raw_sql);
        assert_eq!(source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_sqlite_path_expands_home() {
        let config = DatabaseConfig::default();
        let path = config.sqlite_path();
        if let Some(home) = dirs::home_dir() {
            assert!(path.starts_with(home));
        }
        assert!(path.ends_with("opportunities.db"));
    }

    #[test]
    fn test_token_unset_env_is_none() {
        let config = HttpConfig {
            token_env: "OPPORTUNITY_MCP_TEST_TOKEN_NEVER_SET".to_string(),
            ..HttpConfig::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    fn test_search_paths_use_platform_config_dir() {
        let paths = Config::search_paths();
        assert!(paths.contains(&PathBuf::from("opportunity-mcp.toml")));

        if let Some(config_dir) = dirs::config_dir() {
            assert_eq!(
                paths.last(),
                Some(&config_dir.join("opportunity-mcp").join("config.toml"))
            );
        }
    }
}
