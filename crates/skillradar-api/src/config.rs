//! Workspace configuration and client factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use skillradar_core::store::LocalTestStore;

use crate::client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level skillradar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRadarConfig {
    /// Base URL of the remote candidate API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Directory holding the local candidate and test collections.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Timeout for each API request.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./skillradar-data")
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SkillRadarConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            data_dir: default_data_dir(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl SkillRadarConfig {
    /// Client for the configured API.
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_url, self.request_timeout_secs)
            .with_context(|| format!("cannot create API client for '{}'", self.api_url))
    }

    /// File-backed local store under `data_dir`.
    pub fn local_store(&self) -> LocalTestStore {
        LocalTestStore::open_dir(&self.data_dir)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim, never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `skillradar.toml` in the current directory
/// 2. `~/.config/skillradar/config.toml`
///
/// `SKILLRADAR_API_URL` overrides `api_url`.
pub fn load_config_from(path: Option<&Path>) -> Result<SkillRadarConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("skillradar.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SkillRadarConfig::default(),
    };

    if let Ok(url) = std::env::var("SKILLRADAR_API_URL") {
        if !url.trim().is_empty() {
            config.api_url = url;
        }
    }

    Ok(config)
}

/// Parse a TOML config string, expanding `${VAR}` references.
pub fn parse_config(content: &str) -> Result<SkillRadarConfig> {
    let mut config: SkillRadarConfig = toml::from_str(content)?;
    config.api_url = resolve_env_vars(&config.api_url);
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("skillradar"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_SKILLRADAR_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_SKILLRADAR_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_SKILLRADAR_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_close_${brace"), "no_close_${brace");
        std::env::remove_var("_SKILLRADAR_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_reexpand_values() {
        std::env::set_var("_SKILLRADAR_SELF_REF", "${_SKILLRADAR_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_SKILLRADAR_SELF_REF}/x"),
            "${_SKILLRADAR_SELF_REF}/x"
        );
        std::env::remove_var("_SKILLRADAR_SELF_REF");
    }

    #[test]
    fn parse_expands_data_dir() {
        std::env::set_var("_SKILLRADAR_DATA_ROOT", "/srv/radar");
        let config = parse_config("data_dir = \"${_SKILLRADAR_DATA_ROOT}/local\"\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/radar/local"));
        std::env::remove_var("_SKILLRADAR_DATA_ROOT");
    }

    #[test]
    fn env_overrides_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillradar.toml");
        std::fs::write(&path, "api_url = \"http://from-file:8000\"\n").unwrap();

        std::env::set_var("SKILLRADAR_API_URL", "http://from-env:9000");
        let config = load_config_from(Some(&path));
        std::env::remove_var("SKILLRADAR_API_URL");

        assert_eq!(config.unwrap().api_url, "http://from-env:9000");
    }

    #[test]
    fn default_config() {
        let config = SkillRadarConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.data_dir, PathBuf::from("./skillradar-data"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
api_url = "https://radar.example.com"
data_dir = "/var/lib/skillradar"
"#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://radar.example.com");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/skillradar"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillradar.toml");
        std::fs::write(&path, "request_timeout_secs = 5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert!(config.api_client().is_ok());
    }

    #[test]
    fn local_store_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SkillRadarConfig {
            data_dir: dir.path().join("data"),
            ..Default::default()
        };
        let store = config.local_store();
        store
            .create_local_test("cand_1", &[skillradar_core::Skill::Sql])
            .unwrap();
        assert!(dir.path().join("data").exists());
    }
}
