use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs;
use tokio::process::Command;

/// Grab the still one second in; frame zero is often black.
static FRAME_TIME: &str = "00:00:01";

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Probes whether ffmpeg runs at the configured path.
pub async fn ffmpeg_available(ffmpeg_path: &str) -> bool {
    match Command::new(ffmpeg_path)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}

/// Extracts a single frame from the video bytes as a base64-encoded JPEG.
/// Best-effort: every failure maps to None, never an error.
pub async fn extract_thumbnail(ffmpeg_path: &str, video: &[u8]) -> Option<String> {
    let (video_path, thumbnail_path) = temp_paths();
    let thumbnail = run_ffmpeg(ffmpeg_path, &video_path, &thumbnail_path, video).await;
    let _ = fs::remove_file(&video_path).await;
    let _ = fs::remove_file(&thumbnail_path).await;
    thumbnail
}

// Unique per invocation so concurrent resolutions never collide
fn temp_paths() -> (PathBuf, PathBuf) {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    let dir = std::env::temp_dir();
    (
        dir.join(format!("douyin-{}-{}.mp4", pid, id)),
        dir.join(format!("douyin-{}-{}.jpg", pid, id)),
    )
}

async fn run_ffmpeg(
    ffmpeg_path: &str,
    video_path: &Path,
    thumbnail_path: &Path,
    video: &[u8],
) -> Option<String> {
    fs::write(video_path, video).await.ok()?;

    let output = Command::new(ffmpeg_path)
        .arg("-i")
        .arg(video_path)
        .arg("-ss")
        .arg(FRAME_TIME)
        .arg("-vframes")
        .arg("1")
        .arg(thumbnail_path)
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        eprintln!(
            "ffmpeg failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        return None;
    }

    let image = fs::read(thumbnail_path).await.ok()?;
    Some(STANDARD.encode(image))
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn missing_ffmpeg_is_unavailable() {
        assert!(!ffmpeg_available("/nonexistent/ffmpeg").await);
    }

    #[tokio::test]
    async fn missing_ffmpeg_yields_no_thumbnail() {
        assert!(extract_thumbnail("/nonexistent/ffmpeg", b"not a video")
            .await
            .is_none());
    }

    #[test]
    fn temp_paths_are_unique() {
        let (video_a, thumb_a) = temp_paths();
        let (video_b, thumb_b) = temp_paths();
        assert_ne!(video_a, video_b);
        assert_ne!(thumb_a, thumb_b);
    }
}
