//! In-memory provider and scripted randomness for engine tests.

use super::models::{ArtistRef, SongHit};
use super::provider::LyricsProvider;
use super::random::RandomSource;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_LYRICS: &str = "[Verse 1]\nLine A\nLine B\n[Chorus]\nLine C\n[Verse 2]\nLine D\n";

/// Always draws the lower or the upper bound.
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    upper: bool,
}

impl Fixed {
    pub fn min() -> Self {
        Self { upper: false }
    }

    pub fn max() -> Self {
        Self { upper: true }
    }
}

impl RandomSource for Fixed {
    fn int_inclusive(&mut self, min: usize, max: usize) -> usize {
        if self.upper && max > min { max } else { min }
    }
}

pub struct FakeProvider {
    band: String,
    artist_hits: Vec<SongHit>,
    own_per_page: usize,
    guests_per_page: usize,
    lyrics: String,
    only_artist_search: Option<usize>,
    last_catalog_page: Option<u32>,
    artist_searches: AtomicUsize,
    song_searches: AtomicUsize,
    catalog_calls: AtomicUsize,
    lyrics_calls: AtomicUsize,
}

fn hit(id: u64, title: &str, artist: Option<ArtistRef>) -> SongHit {
    SongHit {
        id,
        title: title.to_string(),
        url: format!("https://genius.test/songs/{id}"),
        thumbnail: Some(format!("https://img.test/{id}.png")),
        artist,
    }
}

impl FakeProvider {
    fn base(band: &str, artist_hits: Vec<SongHit>) -> Self {
        Self {
            band: band.to_string(),
            artist_hits,
            own_per_page: 10,
            guests_per_page: 5,
            lyrics: DEFAULT_LYRICS.to_string(),
            only_artist_search: None,
            last_catalog_page: None,
            artist_searches: AtomicUsize::new(0),
            song_searches: AtomicUsize::new(0),
            catalog_calls: AtomicUsize::new(0),
            lyrics_calls: AtomicUsize::new(0),
        }
    }

    /// Every search comes back empty.
    pub fn empty() -> Self {
        let mut p = Self::base("", Vec::new());
        p.own_per_page = 0;
        p.guests_per_page = 0;
        p
    }

    /// Searching `band` returns `n` hits, hit `i` by artist id `i`.
    pub fn with_distinct_artists(band: &str, n: u64) -> Self {
        let hits = (0..n)
            .map(|i| {
                hit(
                    100 + i,
                    &format!("Hit {i}"),
                    Some(ArtistRef {
                        id: i,
                        name: format!("{band} {i}"),
                    }),
                )
            })
            .collect();
        Self::base(band, hits)
    }

    /// Searching `band` returns four hits all attributed to the band (id 1).
    pub fn band(band: &str) -> Self {
        let hits = (0..4)
            .map(|i| hit(100 + i, &format!("Hit {i}"), Some(Self::band_artist(band))))
            .collect();
        Self::base(band, hits)
    }

    fn band_artist(band: &str) -> ArtistRef {
        ArtistRef {
            id: 1,
            name: band.to_string(),
        }
    }

    pub fn band_ref(&self) -> ArtistRef {
        Self::band_artist(&self.band)
    }

    pub fn strip_artist_from_search_hits(&mut self) {
        for h in &mut self.artist_hits {
            h.artist = None;
        }
    }

    /// Shape of every catalog page: songs by the band, then songs by others.
    pub fn catalog_page(&mut self, own: usize, guests: usize) {
        self.own_per_page = own;
        self.guests_per_page = guests;
    }

    pub fn set_lyrics(&mut self, lyrics: &str) {
        self.lyrics = lyrics.to_string();
    }

    /// Only the `n`-th (0-based) artist search returns results.
    pub fn succeed_only_on_artist_search(&mut self, n: usize) {
        self.only_artist_search = Some(n);
    }

    /// Pages after `page` come back empty.
    pub fn end_catalog_after(&mut self, page: u32) {
        self.last_catalog_page = Some(page);
    }

    pub fn artist_searches(&self) -> usize {
        self.artist_searches.load(Ordering::SeqCst)
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn lyrics_calls(&self) -> usize {
        self.lyrics_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.artist_searches()
            + self.song_searches.load(Ordering::SeqCst)
            + self.catalog_calls()
            + self.lyrics_calls()
    }

    fn is_artist_query(&self, query: &str) -> bool {
        !self.band.is_empty() && query.trim().eq_ignore_ascii_case(&self.band)
    }
}

impl LyricsProvider for FakeProvider {
    async fn search_songs(&self, query: &str) -> anyhow::Result<Vec<SongHit>> {
        if self.band.is_empty() {
            self.artist_searches.fetch_add(1, Ordering::SeqCst);
            return Ok(Vec::new());
        }
        if self.is_artist_query(query) {
            let n = self.artist_searches.fetch_add(1, Ordering::SeqCst);
            return Ok(match self.only_artist_search {
                Some(only) if only != n => Vec::new(),
                _ => self.artist_hits.clone(),
            });
        }
        self.song_searches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            hit(0, "Song 0", Some(self.band_ref())),
            hit(1, "Song 1", Some(self.band_ref())),
        ])
    }

    async fn artist_songs(
        &self,
        _artist_id: u64,
        page: u32,
        _per_page: u32,
    ) -> anyhow::Result<Vec<SongHit>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if self.last_catalog_page.is_some_and(|last| page > last) {
            return Ok(Vec::new());
        }
        let base = u64::from(page) * 1000;
        let mut songs = Vec::new();
        for i in 0..self.own_per_page as u64 {
            let name = if i % 2 == 0 {
                self.band.to_uppercase()
            } else {
                self.band.clone()
            };
            songs.push(hit(
                base + i,
                &format!("Own {}", base + i),
                Some(ArtistRef { id: 1, name }),
            ));
        }
        for i in 0..self.guests_per_page as u64 {
            let id = base + 500 + i;
            let artist = (i % 3 != 0).then(|| ArtistRef {
                id: 2,
                name: format!("{} & Friends", self.band),
            });
            songs.push(hit(id, &format!("Guest {id}"), artist));
        }
        Ok(songs)
    }

    async fn lyrics(&self, _song: &SongHit) -> anyhow::Result<String> {
        self.lyrics_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lyrics.clone())
    }
}
