use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DoiscopeError, Result};

/// Root application configuration, loaded from `~/.config/doiscope/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub hosts: HostsConfig,
    pub schedule: ScheduleConfig,
}

/// Host scopes of the publisher-specific strategies.
///
/// A scope matches any hostname that contains it, so `sciencedirect.com`
/// also covers `www.sciencedirect.com`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostsConfig {
    pub sciencedirect: String,
    pub ieee: String,
    pub preprint_label: String,
    pub psycnet: String,
    pub pubmed: String,
}

/// Delay before the single extraction attempt on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub default_delay_ms: u64,
    pub spa_delay_ms: u64,
    /// Hosts that render their content client-side after the initial load.
    pub spa_hosts: Vec<String>,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            sciencedirect: "sciencedirect.com".to_string(),
            ieee: "ieeexplore.ieee.org".to_string(),
            preprint_label: "ssrn.com".to_string(),
            psycnet: "psycnet.apa.org".to_string(),
            pubmed: "ncbi.nlm.nih.gov".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: 200,
            spa_delay_ms: 2000,
            spa_hosts: vec![
                "ieeexplore.ieee.org".to_string(),
                "sciencedirect.com".to_string(),
                "psycnet.apa.org".to_string(),
                "onlinelibrary.wiley.com".to_string(),
            ],
        }
    }
}

impl ScheduleConfig {
    /// Resolve the delay before extraction for `hostname`.
    pub fn delay_for(&self, hostname: &str) -> Duration {
        let hostname = hostname.to_ascii_lowercase();
        let is_spa = !hostname.is_empty()
            && self
                .spa_hosts
                .iter()
                .any(|h| !h.is_empty() && hostname.contains(h.to_ascii_lowercase().as_str()));

        if is_spa {
            Duration::from_millis(self.spa_delay_ms)
        } else {
            Duration::from_millis(self.default_delay_ms)
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/doiscope/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("DOISCOPE_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("doiscope")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// An empty host scope would make a publisher heuristic fire everywhere.
    pub fn validate(&self) -> Result<()> {
        let scopes = [
            ("sciencedirect", &self.hosts.sciencedirect),
            ("ieee", &self.hosts.ieee),
            ("preprint_label", &self.hosts.preprint_label),
            ("psycnet", &self.hosts.psycnet),
            ("pubmed", &self.hosts.pubmed),
        ];
        for (key, scope) in scopes {
            if scope.trim().is_empty() {
                return Err(DoiscopeError::ConfigError(format!(
                    "hosts.{key} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
