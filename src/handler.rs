use crate::config::Config;
use crate::error::ResolveError;
use crate::resolver::{self, ResolvedVideo};
use crate::{downloader, thumbnail};

/// What the caller should deliver back to the chat, if anything. This crate
/// never talks to the chat platform itself.
#[derive(Debug)]
pub enum Outcome {
    /// Disabled, group not allow-listed, or no share link in the text.
    Ignored,
    Video(VideoReply),
    /// Display-ready failure message.
    Failed(String),
}

#[derive(Debug)]
pub struct VideoReply {
    pub resolved: ResolvedVideo,
    pub video: Vec<u8>,
    /// Base64 JPEG still, when ffmpeg is available and the grab succeeds.
    pub thumbnail: Option<String>,
}

pub struct Handler {
    config: Config,
    ffmpeg_available: bool,
}

impl Handler {
    pub async fn new(config: Config) -> Self {
        let ffmpeg_available = thumbnail::ffmpeg_available(&config.ffmpeg_path).await;
        if !ffmpeg_available {
            eprintln!(
                "ffmpeg not available at {}, thumbnails disabled",
                config.ffmpeg_path
            );
        }
        Self {
            config,
            ffmpeg_available,
        }
    }

    /// Handles one incoming chat message. Messages that do not pass gating or
    /// contain no share link are ignored without any network traffic.
    pub async fn handle_text(&self, group_id: &str, content: &str) -> Outcome {
        if !self.config.enable || !self.config.group_allowed(group_id) {
            return Outcome::Ignored;
        }
        let resolved = match resolver::resolve(content.trim()).await {
            Ok(resolved) => resolved,
            Err(ResolveError::NoUrlFound) => return Outcome::Ignored,
            Err(e) => {
                eprintln!("Failed to resolve share link: {}", e);
                return Outcome::Failed(format!("Failed to parse video: {}", e));
            }
        };
        println!("Resolved video address: {}", resolved.url);

        let video = match downloader::download_video(&resolved.url).await {
            Ok(video) => video,
            Err(e) => {
                eprintln!("Failed to download {}: {}", resolved.url, e);
                return Outcome::Failed(format!("Could not download video: {}", e));
            }
        };

        let thumbnail = if self.ffmpeg_available {
            thumbnail::extract_thumbnail(&self.config.ffmpeg_path, &video).await
        } else {
            None
        };

        Outcome::Video(VideoReply {
            resolved,
            video,
            thumbnail,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn handler(config: Config) -> Handler {
        Handler {
            config,
            ffmpeg_available: false,
        }
    }

    #[tokio::test]
    async fn disabled_config_ignores_everything() {
        let h = handler(Config {
            enable: false,
            ..Config::default()
        });
        let outcome = h
            .handle_text("g", "复制打开抖音 https://v.douyin.com/abc123/")
            .await;
        assert!(matches!(outcome, Outcome::Ignored));
    }

    #[tokio::test]
    async fn unlisted_group_is_ignored() {
        let h = handler(Config {
            allowed_groups: vec!["11111@chatroom".into()],
            ..Config::default()
        });
        let outcome = h
            .handle_text("22222@chatroom", "https://v.douyin.com/abc123/")
            .await;
        assert!(matches!(outcome, Outcome::Ignored));
    }

    #[tokio::test]
    async fn message_without_share_link_is_ignored() {
        let h = handler(Config::default());
        let outcome = h.handle_text("g", "just chatting, no links here").await;
        assert!(matches!(outcome, Outcome::Ignored));
    }
}
