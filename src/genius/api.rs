use super::models::{ArtistSongsResponse, Envelope, SearchResponse};
use super::scrape;
use crate::trivia::{LyricsProvider, SongHit};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Genius API client
#[derive(Debug, Clone)]
pub struct GeniusClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl GeniusClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.genius.com";
    const USER_AGENT: &'static str = "lyricsgame/0.1.0";

    pub fn new(token: &str, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        if token.trim().is_empty() {
            anyhow::bail!("genius token is empty");
        }
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    /// Song search. Non-song hits are dropped.
    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<SongHit>> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));
        let env: Envelope<SearchResponse> = self.get_api(&url).await.context("genius search")?;
        Ok(env
            .response
            .hits
            .into_iter()
            .filter(|h| h.kind == "song")
            .map(|h| h.result.into())
            .collect())
    }

    /// One page of an artist's songs, most popular first.
    pub async fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> anyhow::Result<Vec<SongHit>> {
        let url = format!(
            "{}/artists/{}/songs?sort=popularity&per_page={}&page={}",
            self.base_url, artist_id, per_page, page
        );
        let env: Envelope<ArtistSongsResponse> = self
            .get_api(&url)
            .await
            .with_context(|| format!("genius artist {artist_id} songs page {page}"))?;
        Ok(env.response.songs.into_iter().map(Into::into).collect())
    }

    /// Scrape the lyrics from the song's public page.
    pub async fn song_lyrics(&self, page_url: &str) -> anyhow::Result<String> {
        let html = self
            .client
            .get(page_url)
            .send()
            .await
            .context("send lyrics page request")?
            .error_for_status()
            .context("lyrics page http status")?
            .text()
            .await
            .context("read lyrics page")?;

        scrape::extract_lyrics(&html)?.with_context(|| format!("no lyrics found on {page_url}"))
    }

    async fn get_api<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("send request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Genius API error: {}", status);
        }
        response.json().await.context("parse json")
    }
}

impl LyricsProvider for GeniusClient {
    async fn search_songs(&self, query: &str) -> anyhow::Result<Vec<SongHit>> {
        self.search(query).await
    }

    async fn artist_songs(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> anyhow::Result<Vec<SongHit>> {
        GeniusClient::artist_songs(self, artist_id, page, per_page).await
    }

    async fn lyrics(&self, song: &SongHit) -> anyhow::Result<String> {
        self.song_lyrics(&song.url).await
    }
}
