use std::fmt;
use thiserror::Error;

/// Pipeline stage an attempt was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveArtist,
    SelectSong,
    FetchLyrics,
    ExtractSection,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::ResolveArtist => "resolve-artist",
            Stage::SelectSong => "select-song",
            Stage::FetchLyrics => "fetch-lyrics",
            Stage::ExtractSection => "extract-section",
        };
        f.write_str(s)
    }
}

/// Why a single pipeline attempt failed. Never leaves the orchestrator.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("no search results for {0:?}")]
    NotFound(String),

    #[error("search result #{index} has no artist attached")]
    NoArtist { index: usize },

    #[error("no songs by {artist} (id {artist_id}) in catalog")]
    NoSongs { artist_id: u64, artist: String },

    #[error("section reveals the title {0:?}")]
    SpoilerLeak(String),

    #[error("empty section extracted from {0:?}")]
    EmptySection(String),

    #[error("upstream request failed: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

/// Error surfaced to callers of the retriever.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("artist query is empty")]
    EmptyQuery,

    #[error("no usable excerpt after {rounds} rounds ({attempts} attempts)")]
    ExhaustedRetries { rounds: usize, attempts: usize },
}
