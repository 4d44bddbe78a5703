use serde::{Deserialize, Serialize};

/// Canonical upstream artist identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: u64,
    pub name: String,
}

/// A song as listed by the provider's search and catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongHit {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    /// Primary artist; `None` when the provider returned no artist linkage.
    pub artist: Option<ArtistRef>,
}

/// A sampled song, not yet bound to lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongChoice {
    pub title: String,
    pub artist_name: String,
}

/// Full song data as fetched upstream.
#[derive(Debug, Clone, Serialize)]
pub struct SongRecord {
    pub lyrics: String,
    pub title: String,
    pub artwork_url: String,
    pub page_url: String,
    pub artist: String,
}

/// A spoiler-safe lyric section together with the song it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Excerpt {
    #[serde(flatten)]
    pub song: SongRecord,
    pub section: String,
}
