use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};

use crate::error::ResolveError;

// Unlike the resolution client, certificates are fully verified here; the
// trust relaxation is scoped to the share-link hops.
static DOWNLOAD_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap()
});

/// Downloads the resolved video. CDN URLs are single-use tokens, so the
/// caller should download immediately after resolution.
pub async fn download_video(url: &str) -> Result<Vec<u8>, ResolveError> {
    let response = DOWNLOAD_CLIENT.get(url).send().await.map_err(classify)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(ResolveError::UnexpectedStatus(status));
    }
    let data = response.bytes().await.map_err(classify)?;
    if data.is_empty() {
        return Err(ResolveError::EmptyDownload);
    }
    Ok(data.to_vec())
}

fn classify(e: reqwest::Error) -> ResolveError {
    if e.is_timeout() {
        ResolveError::DownloadTimeout
    } else {
        ResolveError::Network(e)
    }
}
