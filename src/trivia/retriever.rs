//! Retrieval rounds: concurrent pipeline attempts with bounded retry.

use super::catalog::{fetch_lyrics, resolve_artist, select_song};
use super::error::{AttemptError, RetrievalError, Stage};
use super::models::Excerpt;
use super::provider::LyricsProvider;
use super::random::{RandomSelector, RandomSource};
use super::section::extract_section;
use super::RetrievalSettings;
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};

type RngFactory<R> = Box<dyn Fn() -> R + Send + Sync>;

/// Runs batches of concurrent pipeline attempts until one yields an excerpt.
///
/// Attempts of a round run interleaved on the calling task and are always
/// awaited in full; the accepted result is the first success in launch order.
pub struct Retriever<P, R = RandomSelector> {
    provider: P,
    settings: RetrievalSettings,
    make_rng: RngFactory<R>,
}

impl<P: LyricsProvider> Retriever<P> {
    pub fn new(provider: P, settings: RetrievalSettings) -> Self {
        Self::with_rng(provider, settings, RandomSelector::from_entropy)
    }

    /// Reproducible draws: attempt `n` (counting across rounds) uses seed `seed + n`.
    pub fn seeded(provider: P, settings: RetrievalSettings, seed: u64) -> Self {
        let next = AtomicU64::new(seed);
        Self::with_rng(provider, settings, move || {
            RandomSelector::seeded(next.fetch_add(1, Ordering::Relaxed))
        })
    }
}

impl<P: LyricsProvider, R: RandomSource> Retriever<P, R> {
    /// `make_rng` is called once per attempt.
    pub fn with_rng(
        provider: P,
        settings: RetrievalSettings,
        make_rng: impl Fn() -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            provider,
            settings,
            make_rng: Box::new(make_rng),
        }
    }

    pub async fn retrieve_excerpt(&self, artist_query: &str) -> Result<Excerpt, RetrievalError> {
        let query = artist_query.trim();
        if query.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        let batch = self.settings.batch_size.max(1);
        let rounds = self.settings.max_rounds;
        for round in 1..=rounds {
            tracing::debug!(query, round, batch, "starting retrieval round");
            let attempts = (0..batch).map(|index| {
                let rng = (self.make_rng)();
                self.attempt(query, round, index, rng)
            });
            let settled = join_all(attempts).await;

            if let Some((index, excerpt)) = settled
                .into_iter()
                .enumerate()
                .find_map(|(i, r)| r.map(|e| (i, e)))
            {
                tracing::info!(
                    query,
                    round,
                    attempt = index,
                    title = %excerpt.song.title,
                    "retrieved lyrics excerpt"
                );
                return Ok(excerpt);
            }
            tracing::warn!(query, round, "every attempt in round failed");
        }

        Err(RetrievalError::ExhaustedRetries {
            rounds,
            attempts: rounds * batch,
        })
    }

    async fn attempt(&self, query: &str, round: usize, index: usize, mut rng: R) -> Option<Excerpt> {
        match self.run_pipeline(query, &mut rng).await {
            Ok(excerpt) => Some(excerpt),
            Err((stage, err)) => {
                tracing::warn!(query, round, attempt = index, %stage, error = %err, "attempt failed");
                None
            }
        }
    }

    async fn run_pipeline(&self, query: &str, rng: &mut R) -> Result<Excerpt, (Stage, AttemptError)> {
        let settings = &self.settings;

        let artist = resolve_artist(&self.provider, query, settings, rng)
            .await
            .map_err(|e| (Stage::ResolveArtist, e))?;
        let choice = select_song(&self.provider, &artist, settings, rng)
            .await
            .map_err(|e| (Stage::SelectSong, e))?;
        let title = choice.title.clone();
        let record = fetch_lyrics(&self.provider, choice)
            .await
            .map_err(|e| (Stage::FetchLyrics, e))?;
        let excerpt = extract_section(record, rng).map_err(|e| (Stage::ExtractSection, e))?;

        if excerpt.section.trim().is_empty() {
            return Err((Stage::ExtractSection, AttemptError::EmptySection(title)));
        }
        Ok(excerpt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::fake::{FakeProvider, Fixed};
    use crate::trivia::models::SongHit;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn settings() -> RetrievalSettings {
        RetrievalSettings::default()
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_calls() {
        let provider = FakeProvider::band("Coldplay");
        let retriever = Retriever::new(&provider, settings());
        for q in ["", "   ", "\t\n"] {
            let err = retriever.retrieve_excerpt(q).await.unwrap_err();
            assert!(matches!(err, RetrievalError::EmptyQuery));
        }
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_exhausts_after_configured_rounds() {
        let provider = FakeProvider::empty();
        let retriever = Retriever::new(&provider, settings());
        let err = retriever.retrieve_excerpt("Coldplay").await.unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::ExhaustedRetries {
                rounds: 5,
                attempts: 25
            }
        ));
        assert_eq!(provider.artist_searches(), 5 * 5);
        assert_eq!(provider.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_size_is_configurable() {
        let provider = FakeProvider::empty();
        let retriever = Retriever::new(
            &provider,
            RetrievalSettings {
                batch_size: 3,
                max_rounds: 2,
                ..settings()
            },
        );
        retriever.retrieve_excerpt("Coldplay").await.unwrap_err();
        assert_eq!(provider.artist_searches(), 6);
    }

    #[tokio::test]
    async fn test_single_success_in_first_round() {
        let mut provider = FakeProvider::band("Coldplay");
        provider.succeed_only_on_artist_search(2);
        let retriever = Retriever::with_rng(&provider, settings(), Fixed::max);

        let excerpt = retriever.retrieve_excerpt("Coldplay").await.unwrap();
        assert_eq!(excerpt.section, "Line D\n");
        assert_eq!(excerpt.song.title, "Song 0");
        assert_eq!(excerpt.song.artist.to_lowercase(), "coldplay");
        assert_eq!(provider.artist_searches(), 5);
        assert_eq!(provider.lyrics_calls(), 1);
    }

    #[tokio::test]
    async fn test_first_success_in_launch_order_wins() {
        let provider = FakeProvider::band("Coldplay");
        let retriever = Retriever::with_rng(&provider, settings(), Fixed::max);

        let excerpt = retriever.retrieve_excerpt("Coldplay").await.unwrap();
        assert_eq!(excerpt.section, "Line D\n");
        // all siblings still ran to completion
        assert_eq!(provider.lyrics_calls(), 5);
    }

    #[tokio::test]
    async fn test_spoiler_in_every_section_exhausts() {
        let mut provider = FakeProvider::band("Coldplay");
        provider.set_lyrics("[Verse 1]\nthis is song 0\n[Chorus]\nSONG 0 again\n[Bridge]\nSong 0!\n");
        let retriever = Retriever::seeded(&provider, settings(), 11);

        let err = retriever.retrieve_excerpt("Coldplay").await.unwrap_err();
        assert!(matches!(err, RetrievalError::ExhaustedRetries { .. }));
        assert_eq!(provider.artist_searches(), 25);
    }

    #[tokio::test]
    async fn test_unlabelled_lyrics_exhaust() {
        let mut provider = FakeProvider::band("Coldplay");
        provider.set_lyrics("no labels here\njust text\n");
        let retriever = Retriever::new(&provider, settings());
        let err = retriever.retrieve_excerpt("Coldplay").await.unwrap_err();
        assert!(matches!(err, RetrievalError::ExhaustedRetries { .. }));
    }

    #[tokio::test]
    async fn test_success_never_leaks_title() {
        let mut provider = FakeProvider::band("Coldplay");
        provider.set_lyrics("[Verse 1]\nSong 0 is here\n[Chorus]\nclean line\n[Outro]\nsong 0 again\n");
        let mut successes = 0;
        for seed in 0..30 {
            let retriever = Retriever::seeded(&provider, settings(), seed * 100);
            if let Ok(excerpt) = retriever.retrieve_excerpt("Coldplay").await {
                assert_eq!(excerpt.section, "clean line\n");
                successes += 1;
            }
        }
        assert!(successes > 0);
    }

    /// Lyrics calls finish in reverse order: earlier callers wait longer.
    struct StaggeredLyrics {
        inner: FakeProvider,
        started: AtomicUsize,
    }

    impl LyricsProvider for StaggeredLyrics {
        async fn search_songs(&self, query: &str) -> anyhow::Result<Vec<SongHit>> {
            self.inner.search_songs(query).await
        }

        async fn artist_songs(
            &self,
            artist_id: u64,
            page: u32,
            per_page: u32,
        ) -> anyhow::Result<Vec<SongHit>> {
            self.inner.artist_songs(artist_id, page, per_page).await
        }

        async fn lyrics(&self, _song: &SongHit) -> anyhow::Result<String> {
            let k = self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50 * (5 - k as u64))).await;
            Ok(format!("[Verse]\nattempt {k}\n"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_order_beats_completion_order() {
        let provider = StaggeredLyrics {
            inner: FakeProvider::band("Coldplay"),
            started: AtomicUsize::new(0),
        };
        let retriever = Retriever::with_rng(&provider, settings(), Fixed::max);

        let excerpt = retriever.retrieve_excerpt("Coldplay").await.unwrap();
        assert_eq!(excerpt.section, "attempt 0\n");
        assert_eq!(provider.started.load(Ordering::SeqCst), 5);
    }
}
