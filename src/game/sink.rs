use std::future::Future;

/// Rich message posted to a channel (title, body, image, footer...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMessage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    /// 0xRRGGBB
    pub color: Option<u32>,
    /// RFC 3339
    pub timestamp: Option<String>,
}

impl GameMessage {
    /// Plain text message.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            description: Some(body.into()),
            ..Self::default()
        }
    }
}

/// Where the game talks to players.
pub trait ChannelSink {
    /// Show a "typing..." indicator.
    fn typing(&self) -> impl Future<Output = anyhow::Result<()>>;

    fn post(&self, message: GameMessage) -> impl Future<Output = anyhow::Result<()>>;
}

/// Renders messages on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl TerminalSink {
    fn render(message: &GameMessage) -> String {
        let mut out = String::new();
        if let Some(title) = &message.title {
            out.push_str(&format!("== {title} ==\n"));
        }
        if let Some(body) = &message.description {
            out.push_str(body.trim_end());
            out.push('\n');
        }
        if let Some(url) = &message.url {
            out.push_str(&format!("{url}\n"));
        }
        if let Some(image) = &message.image {
            out.push_str(&format!("[image] {image}\n"));
        }
        if let Some(thumbnail) = &message.thumbnail {
            out.push_str(&format!("[thumbnail] {thumbnail}\n"));
        }
        match (&message.footer, &message.timestamp) {
            (Some(footer), Some(ts)) => out.push_str(&format!("-- {footer} ({ts})\n")),
            (Some(footer), None) => out.push_str(&format!("-- {footer}\n")),
            _ => {}
        }
        out
    }
}

impl ChannelSink for TerminalSink {
    async fn typing(&self) -> anyhow::Result<()> {
        println!("...");
        Ok(())
    }

    async fn post(&self, message: GameMessage) -> anyhow::Result<()> {
        println!("{}", Self::render(&message));
        Ok(())
    }
}
