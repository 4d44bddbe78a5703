use crate::trivia::{ArtistRef, SongHit};
use serde::Deserialize;

/// Every API payload is wrapped as `{"meta": {...}, "response": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: ApiSong,
}

#[derive(Debug, Deserialize)]
pub struct ArtistSongsResponse {
    #[serde(default)]
    pub songs: Vec<ApiSong>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSong {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub header_image_thumbnail_url: Option<String>,
    pub song_art_image_thumbnail_url: Option<String>,
    pub primary_artist: Option<ApiArtist>,
}

#[derive(Debug, Deserialize)]
pub struct ApiArtist {
    pub id: u64,
    pub name: String,
}

impl From<ApiSong> for SongHit {
    fn from(song: ApiSong) -> Self {
        Self {
            id: song.id,
            title: song.title,
            url: song.url,
            thumbnail: song
                .header_image_thumbnail_url
                .or(song.song_art_image_thumbnail_url),
            artist: song.primary_artist.map(|a| ArtistRef {
                id: a.id,
                name: a.name,
            }),
        }
    }
}
