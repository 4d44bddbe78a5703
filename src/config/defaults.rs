use super::{Config, GameConfig, GeniusConfig};
use crate::genius::GeniusClient;
use crate::trivia;

pub const DEFAULT_REVEAL_DELAY_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: GeniusClient::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            batch_size: trivia::DEFAULT_BATCH_SIZE,
            max_rounds: trivia::DEFAULT_MAX_ROUNDS,
            reveal_delay_secs: DEFAULT_REVEAL_DELAY_SECS,
            catalog_page_size: trivia::DEFAULT_CATALOG_PAGE_SIZE,
            catalog_max_pages: trivia::DEFAULT_CATALOG_MAX_PAGES,
            catalog_pool_target: trivia::DEFAULT_CATALOG_POOL_TARGET,
            artist_offset_min: trivia::DEFAULT_ARTIST_OFFSET_MIN,
            artist_offset_max: trivia::DEFAULT_ARTIST_OFFSET_MAX,
            retrieval_timeout_secs: None,
        }
    }
}
