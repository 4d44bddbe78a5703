use super::models::SongHit;
use std::future::Future;

/// Upstream lyrics/search backend.
///
/// Implementations must return empty vectors for empty result sets; errors
/// are reserved for transport and protocol failures.
pub trait LyricsProvider {
    /// Free-text song search.
    fn search_songs(&self, query: &str) -> impl Future<Output = anyhow::Result<Vec<SongHit>>>;

    /// One page (1-based) of an artist's catalog, most popular first.
    fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = anyhow::Result<Vec<SongHit>>>;

    /// Full lyrics text for a song.
    fn lyrics(&self, song: &SongHit) -> impl Future<Output = anyhow::Result<String>>;
}

impl<T: LyricsProvider> LyricsProvider for &T {
    fn search_songs(&self, query: &str) -> impl Future<Output = anyhow::Result<Vec<SongHit>>> {
        (**self).search_songs(query)
    }

    fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = anyhow::Result<Vec<SongHit>>> {
        (**self).artist_songs(artist_id, page, per_page)
    }

    fn lyrics(&self, song: &SongHit) -> impl Future<Output = anyhow::Result<String>> {
        (**self).lyrics(song)
    }
}
