use crate::trivia::RetrievalSettings;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub genius: GeniusConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeniusConfig {
    /// API client access token (https://genius.com/api-clients).
    pub token: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Concurrent attempts per retrieval round.
    pub batch_size: usize,
    pub max_rounds: usize,
    /// Seconds between the challenge and the reveal.
    pub reveal_delay_secs: u64,
    pub catalog_page_size: u32,
    pub catalog_max_pages: u32,
    pub catalog_pool_target: usize,
    pub artist_offset_min: usize,
    pub artist_offset_max: usize,
    /// Wall-clock bound on a whole retrieval (unbounded when unset).
    pub retrieval_timeout_secs: Option<u64>,
}

impl GeniusConfig {
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .context("no Genius token configured (run `lyricsgame auth set <TOKEN>`)")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl GameConfig {
    pub fn retrieval_settings(&self) -> RetrievalSettings {
        RetrievalSettings {
            batch_size: self.batch_size.max(1),
            max_rounds: self.max_rounds.max(1),
            catalog_page_size: self.catalog_page_size.max(1),
            catalog_max_pages: self.catalog_max_pages.max(1),
            catalog_pool_target: self.catalog_pool_target,
            artist_offset_min: self.artist_offset_min.min(self.artist_offset_max),
            artist_offset_max: self.artist_offset_max,
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_secs(self.reveal_delay_secs)
    }

    pub fn retrieval_timeout(&self) -> Option<Duration> {
        self.retrieval_timeout_secs.map(Duration::from_secs)
    }
}

fn write_private(path: &Path, raw: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    // holds the API token
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    write_private(&path, &raw)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "lyricsgame", "lyricsgame")
        .context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = defaults::defaults();
        let raw = toml::to_string_pretty(&cfg).context("serialize default config")?;
        write_private(&path, &raw)?;
        tracing::info!(path = %path.display(), "wrote default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
