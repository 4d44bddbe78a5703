mod config;
mod game;
mod genius;
mod trivia;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lyricsgame", version, about = "Guess-the-song lyrics game")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one round: post a lyric excerpt, then reveal the song.
    Play {
        /// The band to retrieve lyrics for.
        artist: String,
    },
    /// Retrieve an excerpt and print it (headless).
    Excerpt {
        artist: String,
        /// Print the excerpt as JSON.
        #[arg(long)]
        json: bool,
        /// Seed the random draws for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the sections the extractor sees in a local lyrics file.
    Sections {
        path: std::path::PathBuf,
    },
    /// Manage the Genius API token.
    Auth {
        #[command(subcommand)]
        cmd: AuthCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AuthCommand {
    /// Store the API client access token in the config file.
    Set { token: String },
    /// Remove the stored token.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command {
        Command::Play { artist } => {
            let retriever = make_retriever(&cfg, None)?;
            let opts = game::GameOptions {
                reveal_delay: cfg.game.reveal_delay(),
                retrieval_timeout: cfg.game.retrieval_timeout(),
            };
            match game::play(&game::TerminalSink, &retriever, &artist, &opts).await? {
                game::Outcome::Revealed(excerpt) => {
                    tracing::debug!(title = %excerpt.song.title, "round finished");
                }
                game::Outcome::Failed => anyhow::bail!("no challenge could be built for {artist}"),
                game::Outcome::Skipped => anyhow::bail!("artist must not be empty"),
            }
        }
        Command::Excerpt { artist, json, seed } => {
            let retriever = make_retriever(&cfg, seed)?;
            let excerpt = retriever.retrieve_excerpt(&artist).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&excerpt)?);
            } else {
                println!("{} — {}", excerpt.song.title, excerpt.song.artist);
                println!("{}", excerpt.song.page_url);
                println!();
                print!("{}", excerpt.section);
            }
        }
        Command::Sections { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let lyrics = trivia::section::normalize(&raw);
            let count = trivia::section::count_sections(&lyrics);
            println!("{count} label lines");
            for index in 1..=count {
                println!("--- section {index} ---");
                print!("{}", trivia::section::slice_section(&lyrics, index));
            }
        }
        Command::Auth { cmd } => {
            let mut cfg = cfg;
            match cmd {
                AuthCommand::Set { token } => {
                    cfg.genius.token = Some(token.trim().to_string());
                    config::save(&cfg, cli.config.as_deref()).context("save config")?;
                    println!("Stored Genius token in config.");
                }
                AuthCommand::Clear => {
                    cfg.genius.token = None;
                    config::save(&cfg, cli.config.as_deref()).context("save config")?;
                    println!("Cleared Genius token.");
                }
            }
        }
    }

    Ok(())
}

fn make_retriever(
    cfg: &config::Config,
    seed: Option<u64>,
) -> anyhow::Result<trivia::Retriever<genius::GeniusClient>> {
    let token = cfg.genius.require_token()?;
    let client = genius::GeniusClient::new(
        token,
        &cfg.genius.base_url,
        cfg.genius.request_timeout(),
    )?;
    let settings = cfg.game.retrieval_settings();
    Ok(match seed {
        Some(seed) => trivia::Retriever::seeded(client, settings, seed),
        None => trivia::Retriever::new(client, settings),
    })
}
