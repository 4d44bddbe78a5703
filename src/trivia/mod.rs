//! Lyrics section retrieval engine
//!
//! Turns an artist name into a spoiler-safe lyric excerpt:
//! - `catalog`: artist resolution, catalog sampling and lyrics lookup
//! - `section`: section slicing and the title leak check
//! - `retriever`: concurrent attempts in bounded retry rounds

pub mod catalog;
pub mod error;
pub mod models;
pub mod provider;
pub mod random;
pub mod retriever;
pub mod section;

#[cfg(test)]
pub(crate) mod fake;

pub use models::{ArtistRef, Excerpt, SongHit};
pub use provider::LyricsProvider;
pub use random::RandomSource;
pub use retriever::Retriever;

/// Concurrent attempts launched per round.
pub const DEFAULT_BATCH_SIZE: usize = 5;
/// Rounds tried before giving up.
pub const DEFAULT_MAX_ROUNDS: usize = 5;
/// Catalog songs requested per page.
pub const DEFAULT_CATALOG_PAGE_SIZE: u32 = 50;
/// Catalog pages loaded at most.
pub const DEFAULT_CATALOG_MAX_PAGES: u32 = 3;
/// Filtered pool size that stops catalog paging early.
pub const DEFAULT_CATALOG_POOL_TARGET: usize = 51;
/// Search results to choose the artist from (0 is the top hit).
pub const DEFAULT_ARTIST_OFFSET_MIN: usize = 1;
pub const DEFAULT_ARTIST_OFFSET_MAX: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSettings {
    pub batch_size: usize,
    pub max_rounds: usize,
    pub catalog_page_size: u32,
    pub catalog_max_pages: u32,
    pub catalog_pool_target: usize,
    pub artist_offset_min: usize,
    pub artist_offset_max: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_rounds: DEFAULT_MAX_ROUNDS,
            catalog_page_size: DEFAULT_CATALOG_PAGE_SIZE,
            catalog_max_pages: DEFAULT_CATALOG_MAX_PAGES,
            catalog_pool_target: DEFAULT_CATALOG_POOL_TARGET,
            artist_offset_min: DEFAULT_ARTIST_OFFSET_MIN,
            artist_offset_max: DEFAULT_ARTIST_OFFSET_MAX,
        }
    }
}
