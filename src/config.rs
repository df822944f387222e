// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::DEFAULT_BASE_URL;
use crate::feed::FilterStrategy;

pub const ENV_CONFIG_PATH: &str = "NEWSROOM_CONFIG_PATH";
pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_SNAPSHOT_DIR: &str = "SNAPSHOT_DIR";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_stale_secs() -> u64 {
    24 * 60 * 60
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    4
}
fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("data/api")
}
fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_card_summary_chars() -> usize {
    280
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cached feed data younger than this is served without refetching.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub strategy: FilterStrategy,
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_card_summary_chars")]
    pub card_summary_chars: usize,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stale_secs: default_stale_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            strategy: FilterStrategy::default(),
            snapshot_dir: default_snapshot_dir(),
            bind_addr: default_bind_addr(),
            card_summary_chars: default_card_summary_chars(),
        }
    }
}

impl FeedsConfig {
    /// Load from an explicit path. TOML or JSON, chosen by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feeds config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mut cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing feeds config {}", path.display()))?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Resolution order:
    /// 1) $NEWSROOM_CONFIG_PATH (must exist)
    /// 2) config/newsroom.toml
    /// 3) config/newsroom.json
    /// 4) built-in defaults
    ///
    /// `API_BASE_URL` and `SNAPSHOT_DIR` override the file in every case.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        for candidate in ["config/newsroom.toml", "config/newsroom.json"] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from(&pb);
            }
        }
        let mut cfg = Self::default();
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            let url = url.trim();
            if !url.is_empty() {
                self.base_url = url.to_string();
            }
        }
        if let Ok(dir) = std::env::var(ENV_SNAPSHOT_DIR) {
            if !dir.trim().is_empty() {
                self.snapshot_dir = PathBuf::from(dir.trim());
            }
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedsConfig> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("invalid JSON");
    }
    match toml::from_str(s) {
        Ok(cfg) => Ok(cfg),
        Err(toml_err) => serde_json::from_str(s)
            .map_err(|_| anyhow!(toml_err))
            .context("unsupported feeds config format"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = parse_config(
            r#"
base_url = "http://localhost:9000/api"
strategy = "client"
"#,
            "toml",
        )
        .unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9000/api");
        assert_eq!(cfg.strategy, FilterStrategy::Client);
        assert_eq!(cfg.stale_secs, 86_400);
        assert_eq!(cfg.snapshot_dir, PathBuf::from("data/api"));
    }

    #[test]
    fn json_is_accepted_without_hint() {
        let cfg = parse_config(r#"{"stale_secs": 60}"#, "").unwrap();
        assert_eq!(cfg.stale_secs, 60);
        assert_eq!(cfg.strategy, FilterStrategy::Server);
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_base_url() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);

        env::set_var(ENV_BASE_URL, "http://127.0.0.1:1234/api/");
        let cfg = FeedsConfig::load_default().unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:1234/api");
        env::remove_var(ENV_BASE_URL);

        let cfg = FeedsConfig::load_default().unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);

        env::set_current_dir(&old).unwrap();
    }
}
