//! Guess-the-song flow: post a lyric excerpt as a challenge, then reveal the
//! song after a delay.

pub mod sink;

use crate::trivia::{Excerpt, LyricsProvider, RandomSource, Retriever};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub use sink::{ChannelSink, GameMessage, TerminalSink};

pub const CHALLENGE_THUMBNAIL: &str = "https://ichef.bbci.co.uk/news/976/cpsprodpb/13F53/production/_83874718_thinkstockphotos-104548222.jpg";
pub const FAILURE_TEXT: &str = "An error happened 😬 Please try again, it might work.";
pub const POST_FAILURE_TEXT: &str = "An error happened 😬, try again!";

#[derive(Debug, Clone)]
pub struct GameOptions {
    pub reveal_delay: Duration,
    /// Caller-side bound on the whole retrieval.
    pub retrieval_timeout: Option<Duration>,
}

#[derive(Debug)]
pub enum Outcome {
    /// Blank artist, nothing was posted.
    Skipped,
    /// The players got the generic retry prompt.
    Failed,
    Revealed(Box<Excerpt>),
}

pub async fn play<S, P, R>(
    sink: &S,
    retriever: &Retriever<P, R>,
    artist: &str,
    opts: &GameOptions,
) -> anyhow::Result<Outcome>
where
    S: ChannelSink,
    P: LyricsProvider,
    R: RandomSource,
{
    let artist = artist.trim();
    if artist.is_empty() {
        return Ok(Outcome::Skipped);
    }
    tracing::info!(artist, "starting lyrics game");

    sink.post(GameMessage::text(format!(
        "Starting lyrics game for band {artist}. Please wait while I fetch lyrics..."
    )))
    .await?;
    sink.typing().await?;

    let retrieval = retriever.retrieve_excerpt(artist);
    let result = match opts.retrieval_timeout {
        Some(limit) => match tokio::time::timeout(limit, retrieval).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(artist, timeout_secs = limit.as_secs(), "retrieval timed out");
                sink.post(GameMessage::text(FAILURE_TEXT)).await?;
                return Ok(Outcome::Failed);
            }
        },
        None => retrieval.await,
    };

    let excerpt = match result {
        Ok(excerpt) => excerpt,
        Err(e) => {
            tracing::error!(artist, error = %e, "could not build a challenge");
            sink.post(GameMessage::text(FAILURE_TEXT)).await?;
            return Ok(Outcome::Failed);
        }
    };

    let color = rand::random::<u32>() & 0x00ff_ffff;
    if let Err(e) = sink
        .post(challenge_message(&excerpt, color, opts.reveal_delay))
        .await
    {
        tracing::error!(artist, error = %e, "failed to post challenge");
        sink.post(GameMessage {
            color: Some(color),
            timestamp: now_rfc3339(),
            ..GameMessage::text(POST_FAILURE_TEXT)
        })
        .await?;
        return Ok(Outcome::Failed);
    }

    tokio::time::sleep(opts.reveal_delay).await;
    sink.post(reveal_message(&excerpt, color)).await?;
    Ok(Outcome::Revealed(Box::new(excerpt)))
}

pub fn challenge_message(excerpt: &Excerpt, color: u32, reveal_delay: Duration) -> GameMessage {
    GameMessage {
        title: Some(format!("Guess this song from {}", excerpt.song.artist)),
        description: Some(excerpt.section.clone()),
        thumbnail: Some(CHALLENGE_THUMBNAIL.to_string()),
        footer: Some(format!("💿 Guess in {} seconds", reveal_delay.as_secs())),
        color: Some(color),
        timestamp: now_rfc3339(),
        ..GameMessage::default()
    }
}

pub fn reveal_message(excerpt: &Excerpt, color: u32) -> GameMessage {
    GameMessage {
        title: Some(excerpt.song.title.clone()),
        url: Some(excerpt.song.page_url.clone()),
        image: Some(excerpt.song.artwork_url.clone()).filter(|u| !u.is_empty()),
        footer: Some(format!("💿 - {}", excerpt.song.artist)),
        color: Some(color),
        timestamp: now_rfc3339(),
        ..GameMessage::default()
    }
}

fn now_rfc3339() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}
