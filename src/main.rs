mod config;
mod downloader;
mod error;
mod handler;
mod resolver;
mod thumbnail;

use std::io::Read;
use std::process::ExitCode;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::{Config, CONFIG_FILE};
use crate::handler::{Handler, Outcome};

static VIDEO_FILE: &str = "video.mp4";
static THUMBNAIL_FILE: &str = "thumbnail.jpg";

/// Standalone driver: feed it a pasted share message, get the resolved video.
#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::get_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", CONFIG_FILE, e);
            return ExitCode::FAILURE;
        }
    };

    let message = match share_message() {
        Some(m) => m,
        None => {
            eprintln!("Usage: douyin-resolver <share message>  (or pipe the message on stdin)");
            return ExitCode::FAILURE;
        }
    };

    let handler = Handler::new(config).await;
    match handler.handle_text("cli", &message).await {
        Outcome::Ignored => {
            eprintln!("No Douyin share link found in message");
            ExitCode::FAILURE
        }
        Outcome::Failed(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
        Outcome::Video(reply) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&reply.resolved).unwrap()
            );
            if let Err(e) = tokio::fs::write(VIDEO_FILE, &reply.video).await {
                eprintln!("Could not write {}: {}", VIDEO_FILE, e);
                return ExitCode::FAILURE;
            }
            println!("Wrote {} ({} bytes)", VIDEO_FILE, reply.video.len());
            if let Some(thumbnail) = &reply.thumbnail {
                match STANDARD.decode(thumbnail) {
                    Ok(image) => match tokio::fs::write(THUMBNAIL_FILE, image).await {
                        Ok(()) => println!("Wrote {}", THUMBNAIL_FILE),
                        Err(e) => eprintln!("Could not write {}: {}", THUMBNAIL_FILE, e),
                    },
                    Err(e) => eprintln!("Invalid thumbnail encoding: {}", e),
                }
            }
            ExitCode::SUCCESS
        }
    }
}

/// The share message, from argv or stdin.
fn share_message() -> Option<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Some(args.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).ok()?;
    let buf = buf.trim().to_string();
    if buf.is_empty() {
        None
    } else {
        Some(buf)
    }
}
