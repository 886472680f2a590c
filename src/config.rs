// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::report::ReportLimits;
use crate::stats::StopWords;

pub const ENV_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";
pub const ENV_DATA_BASE: &str = "DIGEST_DATA_BASE";
pub const ENV_CACHE_TTL_SECS: &str = "DIGEST_CACHE_TTL_SECS";
pub const ENV_REFRESH_MINS: &str = "DIGEST_REFRESH_MINS";
pub const DEFAULT_CONFIG_PATH: &str = "config/digest.toml";

/// Runtime settings for loading and summarizing the daily snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Base URL (`http://`, `https://`) or local directory holding the JSON files.
    pub data_base: String,
    pub cache_ttl_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub refresh_interval_mins: u64,
    pub top_topics: usize,
    pub top_keywords: usize,
    pub top_articles: usize,
    pub top_sources: usize,
    pub top_stories: usize,
    pub extra_stop_words: Vec<String>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            data_base: "data".to_string(),
            cache_ttl_secs: 300,
            connect_timeout_secs: 4,
            request_timeout_secs: 10,
            refresh_interval_mins: 30,
            top_topics: 5,
            top_keywords: 50,
            top_articles: 5,
            top_sources: 10,
            top_stories: 10,
            extra_stop_words: Vec::new(),
        }
    }
}

impl DigestConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg = Self::parse(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $DIGEST_CONFIG_PATH (must exist)
    /// 2) config/digest.toml
    /// 3) built-in defaults
    ///
    /// Env overrides are applied in every case.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s)?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(base) = env_non_empty(ENV_DATA_BASE) {
            self.data_base = base;
        }
        if let Some(ttl) = env_non_empty(ENV_CACHE_TTL_SECS) {
            self.cache_ttl_secs = ttl
                .parse()
                .with_context(|| format!("{ENV_CACHE_TTL_SECS} must be whole seconds, got '{ttl}'"))?;
        }
        if let Some(mins) = env_non_empty(ENV_REFRESH_MINS) {
            self.refresh_interval_mins = mins
                .parse()
                .with_context(|| format!("{ENV_REFRESH_MINS} must be whole minutes, got '{mins}'"))?;
        }
        Ok(())
    }

    /// Whether `data_base` names a remote HTTP location.
    pub fn is_remote(&self) -> bool {
        let b = self.data_base.trim().to_ascii_lowercase();
        b.starts_with("http://") || b.starts_with("https://")
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Refresh period; a zero setting is clamped to one minute.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_mins.max(1) * 60)
    }

    pub fn limits(&self) -> ReportLimits {
        ReportLimits {
            topics: self.top_topics,
            keywords: self.top_keywords,
            articles: self.top_articles,
            sources: self.top_sources,
            stories: self.top_stories,
        }
    }

    pub fn stop_words(&self) -> StopWords {
        StopWords::default().with_extra(&self.extra_stop_words)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn clear_env() {
        for k in [ENV_CONFIG_PATH, ENV_DATA_BASE, ENV_CACHE_TTL_SECS, ENV_REFRESH_MINS] {
            env::remove_var(k);
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = DigestConfig::parse(
            r#"
            data_base = "https://example.org/data"
            top_keywords = 20
            extra_stop_words = ["reuters"]
            "#,
        )
        .unwrap();
        assert!(cfg.is_remote());
        assert_eq!(cfg.top_keywords, 20);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(300));
        assert_eq!(cfg.limits().sources, 10);
        assert!(cfg.stop_words().contains("Reuters"));
    }

    #[test]
    fn local_paths_are_not_remote() {
        let cfg = DigestConfig {
            data_base: "./exports/today".into(),
            ..Default::default()
        };
        assert!(!cfg.is_remote());
    }

    #[test]
    fn refresh_interval_never_zero() {
        let cfg = DigestConfig {
            refresh_interval_mins: 0,
            ..Default::default()
        };
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(60));
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_path_then_file_then_builtin() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        clear_env();

        // nothing on disk → built-in defaults
        assert_eq!(DigestConfig::load_default().unwrap(), DigestConfig::default());

        // config/digest.toml is picked up
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join(DEFAULT_CONFIG_PATH), "top_articles = 8\n").unwrap();
        assert_eq!(DigestConfig::load_default().unwrap().top_articles, 8);

        // env path wins over the default file
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "top_articles = 3\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, explicit.display().to_string());
        assert_eq!(DigestConfig::load_default().unwrap().top_articles, 3);

        // missing env path is an error, not a silent fallback
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        assert!(DigestConfig::load_default().is_err());

        clear_env();
        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_apply_after_file() {
        clear_env();
        env::set_var(ENV_DATA_BASE, "http://127.0.0.1:9/data");
        env::set_var(ENV_CACHE_TTL_SECS, "12");
        env::set_var(ENV_REFRESH_MINS, "2");
        let cfg = DigestConfig::parse("data_base = \"local\"\ncache_ttl_secs = 99\n")
            .and_then(|mut c| c.apply_env_overrides().map(|_| c))
            .unwrap();
        assert_eq!(cfg.data_base, "http://127.0.0.1:9/data");
        assert_eq!(cfg.cache_ttl_secs, 12);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(120));

        env::set_var(ENV_CACHE_TTL_SECS, "soon");
        assert!(DigestConfig::default().apply_env_overrides().is_err());
        clear_env();
    }
}
