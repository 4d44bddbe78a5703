//! Upstream queries of an attempt: artist resolution, song sampling and lyrics lookup.

use super::error::AttemptError;
use super::models::{ArtistRef, SongChoice, SongRecord};
use super::provider::LyricsProvider;
use super::random::RandomSource;
use super::RetrievalSettings;
use once_cell::sync::Lazy;
use regex::Regex;

static QUERY_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(- )?\(with [^)]+\)|\(ft\. [^)]+\)|\(feat\. [^)]+\)|- .+ remix|- .+ version|- live|- remaster.*|- bonus track|\(remaster.*\)",
    )
    .expect("valid query noise regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Resolve a free-text artist query to an artist identity.
///
/// The top hit is skipped on purpose: it is frequently a tribute or remix act
/// tied with the real artist, so the pick is drawn from
/// `[artist_offset_min, artist_offset_max]`.
pub async fn resolve_artist<P: LyricsProvider>(
    provider: &P,
    query: &str,
    settings: &RetrievalSettings,
    rng: &mut impl RandomSource,
) -> Result<ArtistRef, AttemptError> {
    let hits = provider.search_songs(query).await?;
    if hits.is_empty() {
        return Err(AttemptError::NotFound(query.to_string()));
    }

    let index = rng.int_inclusive(settings.artist_offset_min, settings.artist_offset_max);
    let artist = hits
        .get(index)
        .and_then(|hit| hit.artist.clone())
        .ok_or(AttemptError::NoArtist { index })?;

    tracing::debug!(query, index, artist_id = artist.id, artist = %artist.name, "resolved artist");
    Ok(artist)
}

/// Sample one song from the artist's popularity-ranked catalog.
///
/// Songs whose primary artist is someone else (features, compilations) are
/// dropped before sampling.
pub async fn select_song<P: LyricsProvider>(
    provider: &P,
    artist: &ArtistRef,
    settings: &RetrievalSettings,
    rng: &mut impl RandomSource,
) -> Result<SongChoice, AttemptError> {
    let wanted = artist.name.to_lowercase();
    let mut pool = Vec::new();

    for page in 1..=settings.catalog_max_pages {
        let songs = provider
            .artist_songs(artist.id, page, settings.catalog_page_size)
            .await?;
        if songs.is_empty() {
            break;
        }

        pool.extend(songs.into_iter().filter(|song| {
            song.artist
                .as_ref()
                .is_some_and(|a| a.name.to_lowercase() == wanted)
        }));
        if pool.len() >= settings.catalog_pool_target {
            break;
        }
    }

    if pool.is_empty() {
        return Err(AttemptError::NoSongs {
            artist_id: artist.id,
            artist: artist.name.clone(),
        });
    }

    let song = pool.swap_remove(rng.int_inclusive(0, pool.len() - 1));
    let artist_name = song
        .artist
        .map(|a| a.name)
        .unwrap_or_else(|| artist.name.clone());
    Ok(SongChoice {
        title: song.title,
        artist_name,
    })
}

/// Re-search the chosen song by text and fetch its lyrics.
pub async fn fetch_lyrics<P: LyricsProvider>(
    provider: &P,
    choice: SongChoice,
) -> Result<SongRecord, AttemptError> {
    let query = sanitize_query(&format!("{} {}", choice.title, choice.artist_name));
    let hits = provider.search_songs(&query).await?;
    let Some(hit) = hits.into_iter().next() else {
        return Err(AttemptError::NotFound(query));
    };

    let lyrics = provider.lyrics(&hit).await?;
    Ok(SongRecord {
        lyrics,
        title: hit.title,
        artwork_url: hit.thumbnail.unwrap_or_default(),
        page_url: hit.url,
        artist: choice.artist_name,
    })
}

/// Lowercase and strip featuring credits and edition suffixes that confuse search.
pub fn sanitize_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    let stripped = QUERY_NOISE.replace_all(&lowered, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
