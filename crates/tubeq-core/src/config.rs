//! Configuration: backend origin and polling intervals.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured backend origin.
pub const API_URL_ENV: &str = "TUBEQ_API_URL";

/// Global configuration loaded from `~/.config/tubeq/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeqConfig {
    /// Backend origin including the API prefix, e.g. "https://host/api".
    pub api_base_url: String,
    /// Seconds between authoritative listing refreshes in `watch`.
    pub refresh_interval_secs: u64,
    /// Seconds between simulated progress ticks in `watch`.
    pub tick_interval_secs: u64,
    /// Optional default directory for fetched files (None = current dir).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for TubeqConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://video-e-audio.onrender.com/api".to_string(),
            refresh_interval_secs: 30,
            tick_interval_secs: 2,
            download_dir: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tubeq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// `TUBEQ_API_URL` overrides the configured backend origin.
pub fn load_or_init() -> Result<TubeqConfig> {
    let path = config_path()?;
    let mut cfg: TubeqConfig = if path.exists() {
        let data = fs::read_to_string(&path)?;
        toml::from_str(&data)?
    } else {
        let default_cfg = TubeqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    };
    apply_base_url_override(&mut cfg, std::env::var(API_URL_ENV).ok());
    Ok(cfg)
}

/// Apply the environment override, ignoring empty values.
pub fn apply_base_url_override(cfg: &mut TubeqConfig, override_url: Option<String>) {
    if let Some(url) = override_url {
        let url = url.trim();
        if !url.is_empty() {
            cfg.api_base_url = url.trim_end_matches('/').to_string();
        }
    }
}
